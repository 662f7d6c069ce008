//! Integer rectangles on the dungeon grid

use serde::{Deserialize, Serialize};

/// An axis-aligned block of cells
///
/// `(x, z)` is the minimum corner. Width runs along x, height along z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub z: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, z: i32, width: i32, height: i32) -> Self {
        debug_assert!(width >= 1 && height >= 1, "empty rect {}x{}", width, height);
        Self { x, z, width, height }
    }

    /// Last column inside the rect
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Last row inside the rect
    #[inline]
    pub fn max_z(&self) -> i32 {
        self.z + self.height - 1
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.z as f32 + self.height as f32 / 2.0,
        )
    }

    /// Center rounded down to a cell
    pub fn center_cell(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.z + self.height / 2)
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.x && x <= self.max_x() && z >= self.z && z <= self.max_z()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.max_x()
            && other.x <= self.max_x()
            && self.z <= other.max_z()
            && other.z <= self.max_z()
    }

    /// The rect without its one-cell border
    pub fn interior(&self) -> Option<Rect> {
        if self.width < 3 || self.height < 3 {
            return None;
        }
        Some(Rect::new(self.x + 1, self.z + 1, self.width - 2, self.height - 2))
    }

    /// Whether the cell lies on the outer ring of the rect
    pub fn is_border(&self, x: i32, z: i32) -> bool {
        self.contains(x, z)
            && (x == self.x || x == self.max_x() || z == self.z || z == self.max_z())
    }

    /// All cells, row by row from the minimum corner
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let rect = *self;
        (rect.z..=rect.max_z()).flat_map(move |z| (rect.x..=rect.max_x()).map(move |x| (x, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_and_center() {
        let rect = Rect::new(2, 3, 4, 6);
        assert_eq!(rect.max_x(), 5);
        assert_eq!(rect.max_z(), 8);
        assert_eq!(rect.center(), (4.0, 6.0));
        assert_eq!(rect.center_cell(), (4, 6));
        assert_eq!(rect.area(), 24);
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 5, 5);
        assert!(a.intersects(&Rect::new(4, 4, 2, 2)));
        assert!(!a.intersects(&Rect::new(5, 0, 2, 2)));
    }

    #[test]
    fn test_interior() {
        assert_eq!(Rect::new(0, 0, 5, 4).interior(), Some(Rect::new(1, 1, 3, 2)));
        assert_eq!(Rect::new(0, 0, 2, 8).interior(), None);
    }

    #[test]
    fn test_cells_cover_area() {
        let rect = Rect::new(1, 1, 3, 2);
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], (1, 1));
        assert_eq!(cells[5], (3, 2));
    }
}
