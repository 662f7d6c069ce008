//! Cell grid
//!
//! The 2D array of cell tags covering the whole dungeon.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::cell::CellTag;

/// Dungeon-wide grid of cell tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    width: i32,
    height: i32,
    cells: Vec<CellTag>,
}

impl CellGrid {
    /// Create a grid with every cell walkable
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![CellTag::Walkable; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn xz_to_idx(&self, x: i32, z: i32) -> usize {
        (z * self.width + x) as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, z: i32) -> bool {
        x >= 0 && x < self.width && z >= 0 && z < self.height
    }

    /// Tag at a cell, `None` outside the grid
    pub fn get(&self, x: i32, z: i32) -> Option<CellTag> {
        if self.in_bounds(x, z) {
            Some(self.cells[self.xz_to_idx(x, z)])
        } else {
            None
        }
    }

    /// Overwrite a cell. Returns false (and does nothing) outside the grid.
    pub fn set(&mut self, x: i32, z: i32, tag: CellTag) -> bool {
        if !self.in_bounds(x, z) {
            return false;
        }
        let idx = self.xz_to_idx(x, z);
        self.cells[idx] = tag;
        true
    }

    /// Write a tag unless the cell already holds a corner or a corridor
    pub fn set_if_not_corner(&mut self, x: i32, z: i32, tag: CellTag) -> bool {
        match self.get(x, z) {
            Some(existing) if existing.is_corner() || existing.is_corridor() => false,
            Some(_) => self.set(x, z, tag),
            None => false,
        }
    }

    /// Reset every cell to walkable
    pub fn clear(&mut self) {
        self.cells.fill(CellTag::Walkable);
    }

    /// All cells with their coordinates, row by row from z = 0
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, CellTag)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, tag)| (idx as i32 % width, idx as i32 / width, *tag))
    }

    pub fn count(&self, predicate: impl Fn(CellTag) -> bool) -> usize {
        self.cells.iter().filter(|tag| predicate(**tag)).count()
    }

    /// Flood fill over walkable cells (4-neighbour)
    ///
    /// Returns a visited mask indexed like the grid; empty when `start` is not walkable.
    pub fn walkable_region(&self, start: (i32, i32)) -> Vec<bool> {
        let mut visited = vec![false; self.cells.len()];
        if !self.get(start.0, start.1).is_some_and(|t| t.is_walkable()) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited[self.xz_to_idx(start.0, start.1)] = true;
        queue.push_back(start);

        while let Some((x, z)) = queue.pop_front() {
            for (dx, dz) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, nz) = (x + dx, z + dz);
                if !self.get(nx, nz).is_some_and(|t| t.is_walkable()) {
                    continue;
                }
                let idx = self.xz_to_idx(nx, nz);
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back((nx, nz));
                }
            }
        }

        visited
    }

    /// Whether a flood-fill mask from `walkable_region` covers a cell
    pub fn is_visited(&self, mask: &[bool], x: i32, z: i32) -> bool {
        self.in_bounds(x, z) && mask.get(self.xz_to_idx(x, z)).copied().unwrap_or(false)
    }

    /// Text rendering, north row first
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for z in (0..self.height).rev() {
            for x in 0..self.width {
                out.push(self.cells[self.xz_to_idx(x, z)].glyph());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_noop() {
        let mut grid = CellGrid::new(4, 3);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(4, 0), None);
        assert!(!grid.set(0, 3, CellTag::NorthWall));
        assert_eq!(grid.count(|t| t == CellTag::Walkable), 12);
    }

    #[test]
    fn test_corner_protection() {
        let mut grid = CellGrid::new(3, 3);
        grid.set(0, 0, CellTag::BottomLeftCorner);
        grid.set(1, 0, CellTag::CorridorWalkable);

        assert!(!grid.set_if_not_corner(0, 0, CellTag::SouthWall));
        assert!(!grid.set_if_not_corner(1, 0, CellTag::SouthWall));
        assert!(grid.set_if_not_corner(2, 0, CellTag::SouthWall));

        assert_eq!(grid.get(0, 0), Some(CellTag::BottomLeftCorner));
        assert_eq!(grid.get(1, 0), Some(CellTag::CorridorWalkable));
        assert_eq!(grid.get(2, 0), Some(CellTag::SouthWall));
    }

    #[test]
    fn test_walkable_region_stops_at_walls() {
        let mut grid = CellGrid::new(5, 1);
        grid.set(2, 0, CellTag::EastWall);

        let mask = grid.walkable_region((0, 0));
        assert!(grid.is_visited(&mask, 1, 0));
        assert!(!grid.is_visited(&mask, 3, 0));

        grid.set(2, 0, CellTag::CorridorWalkable);
        let mask = grid.walkable_region((0, 0));
        assert!(grid.is_visited(&mask, 4, 0));
    }

    #[test]
    fn test_render_ascii_north_first() {
        let mut grid = CellGrid::new(2, 2);
        grid.set(0, 1, CellTag::NorthWall);
        assert_eq!(grid.render_ascii(), "-.\n..\n");
    }
}
