//! Per-room occupancy grid
//!
//! Tracks which interior cells of one room are taken by furniture. Cells are
//! addressed locally, `(0, 0)` being the interior's minimum corner.

use std::collections::VecDeque;

/// Occupancy of a room's interior
#[derive(Debug, Clone, PartialEq)]
pub struct RoomGrid {
    width: i32,
    height: i32,
    occupied: Vec<bool>,
    /// Cells that must stay clear, such as the approach to a doorway
    reserved: Vec<bool>,
    free_cells: usize,
}

impl RoomGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            occupied: vec![false; len],
            reserved: vec![false; len],
            free_cells: len,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn idx(&self, x: i32, z: i32) -> usize {
        (z * self.width + x) as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, z: i32) -> bool {
        x >= 0 && x < self.width && z >= 0 && z < self.height
    }

    /// Occupied or out of range
    pub fn is_occupied(&self, x: i32, z: i32) -> bool {
        !self.in_bounds(x, z) || self.occupied[self.idx(x, z)]
    }

    pub fn is_reserved(&self, x: i32, z: i32) -> bool {
        self.in_bounds(x, z) && self.reserved[self.idx(x, z)]
    }

    /// Number of cells not covered by furniture (reserved cells count as free)
    pub fn free_cell_count(&self) -> usize {
        self.free_cells
    }

    /// Mark a cell taken. Out-of-range and already occupied cells are ignored.
    pub fn occupy(&mut self, x: i32, z: i32) -> bool {
        if self.is_occupied(x, z) {
            return false;
        }
        let idx = self.idx(x, z);
        self.occupied[idx] = true;
        self.free_cells -= 1;
        true
    }

    /// Keep a cell clear of furniture
    pub fn reserve(&mut self, x: i32, z: i32) {
        if self.in_bounds(x, z) {
            let idx = self.idx(x, z);
            self.reserved[idx] = true;
        }
    }

    /// Whether a `width` x `height` block at `(x, z)` is in range, free and unreserved
    pub fn can_place(&self, x: i32, z: i32, width: i32, height: i32) -> bool {
        if width < 1 || height < 1 {
            return false;
        }
        for dz in 0..height {
            for dx in 0..width {
                let (cx, cz) = (x + dx, z + dz);
                if self.is_occupied(cx, cz) || self.is_reserved(cx, cz) {
                    return false;
                }
            }
        }
        true
    }

    /// Occupy a whole block; cells that are already taken are skipped
    pub fn occupy_block(&mut self, x: i32, z: i32, width: i32, height: i32) {
        for dz in 0..height {
            for dx in 0..width {
                self.occupy(x + dx, z + dz);
            }
        }
    }

    /// Whether the free cells left after covering a block still form one region
    pub fn stays_connected_without(&self, x: i32, z: i32, width: i32, height: i32) -> bool {
        let covered = |cx: i32, cz: i32| cx >= x && cx < x + width && cz >= z && cz < z + height;
        let is_open = |cx: i32, cz: i32| !self.is_occupied(cx, cz) && !covered(cx, cz);

        let mut open_total = 0;
        let mut start = None;
        for cz in 0..self.height {
            for cx in 0..self.width {
                if is_open(cx, cz) {
                    open_total += 1;
                    start.get_or_insert((cx, cz));
                }
            }
        }

        let Some(start) = start else {
            return true;
        };

        let mut visited = vec![false; self.occupied.len()];
        let mut queue = VecDeque::new();
        visited[self.idx(start.0, start.1)] = true;
        queue.push_back(start);
        let mut reached = 0;

        while let Some((cx, cz)) = queue.pop_front() {
            reached += 1;
            for (dx, dz) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, nz) = (cx + dx, cz + dz);
                if !is_open(nx, nz) {
                    continue;
                }
                let idx = self.idx(nx, nz);
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back((nx, nz));
                }
            }
        }

        reached == open_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_count_tracks_occupancy() {
        let mut grid = RoomGrid::new(4, 3);
        assert_eq!(grid.free_cell_count(), 12);

        assert!(grid.occupy(1, 1));
        assert!(!grid.occupy(1, 1));
        assert!(!grid.occupy(4, 0));
        assert!(!grid.occupy(-1, 2));
        assert_eq!(grid.free_cell_count(), 11);

        grid.occupy_block(0, 0, 2, 2);
        assert_eq!(grid.free_cell_count(), 8);
        let counted = (0..3)
            .flat_map(|z| (0..4).map(move |x| (x, z)))
            .filter(|&(x, z)| !grid.is_occupied(x, z))
            .count();
        assert_eq!(counted, grid.free_cell_count());
    }

    #[test]
    fn test_can_place_rejects_range_occupied_and_reserved() {
        let mut grid = RoomGrid::new(5, 5);
        assert!(grid.can_place(0, 0, 5, 5));
        assert!(!grid.can_place(3, 0, 3, 1));
        assert!(!grid.can_place(0, 0, 0, 1));

        grid.occupy(2, 2);
        assert!(!grid.can_place(1, 1, 2, 2));

        grid.reserve(4, 4);
        assert!(!grid.can_place(4, 4, 1, 1));
        // Reserved cells are still free
        assert_eq!(grid.free_cell_count(), 24);
    }

    #[test]
    fn test_connectivity_guard() {
        let grid = RoomGrid::new(5, 3);
        // A full-height bar through the middle cuts the room in two
        assert!(!grid.stays_connected_without(2, 0, 1, 3));
        // Against a wall it doesn't
        assert!(grid.stays_connected_without(0, 0, 1, 3));
        // Covering everything leaves nothing to disconnect
        assert!(grid.stays_connected_without(0, 0, 5, 3));
    }
}
