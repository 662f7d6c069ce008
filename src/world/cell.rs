//! Cell classifications
//!
//! Every cell of the dungeon grid carries exactly one tag.

use serde::{Deserialize, Serialize};

use super::coords::Rotation;

/// Identifier of a placed piece of furniture
pub type FurnitureId = u32;

/// Classification of a single grid cell
///
/// North is +z, east is +x. "Top" corners sit on the north wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellTag {
    #[default]
    Walkable,
    CorridorWalkable,

    // Walls
    NorthWall,
    SouthWall,
    EastWall,
    WestWall,

    // Corners
    TopLeftCorner,
    TopRightCorner,
    BottomLeftCorner,
    BottomRightCorner,

    FurnitureOccupied(FurnitureId),
}

impl CellTag {
    pub fn is_walkable(&self) -> bool {
        matches!(self, CellTag::Walkable | CellTag::CorridorWalkable)
    }

    pub fn is_corridor(&self) -> bool {
        matches!(self, CellTag::CorridorWalkable)
    }

    pub fn is_wall(&self) -> bool {
        matches!(
            self,
            CellTag::NorthWall | CellTag::SouthWall | CellTag::EastWall | CellTag::WestWall
        )
    }

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            CellTag::TopLeftCorner
                | CellTag::TopRightCorner
                | CellTag::BottomLeftCorner
                | CellTag::BottomRightCorner
        )
    }

    /// Walls and corners
    pub fn is_structural(&self) -> bool {
        self.is_wall() || self.is_corner()
    }

    /// Corner that closes this wall's run where an opening lies in direction `(dx, dz)`
    ///
    /// Only plain walls have run ends; the opening must lie along the run.
    pub fn run_end_cap(&self, dx: i32, dz: i32) -> Option<CellTag> {
        match (self, dx, dz) {
            (CellTag::NorthWall, 1, 0) => Some(CellTag::TopRightCorner),
            (CellTag::NorthWall, -1, 0) => Some(CellTag::TopLeftCorner),
            (CellTag::SouthWall, 1, 0) => Some(CellTag::BottomRightCorner),
            (CellTag::SouthWall, -1, 0) => Some(CellTag::BottomLeftCorner),
            (CellTag::WestWall, 0, 1) => Some(CellTag::TopLeftCorner),
            (CellTag::WestWall, 0, -1) => Some(CellTag::BottomLeftCorner),
            (CellTag::EastWall, 0, 1) => Some(CellTag::TopRightCorner),
            (CellTag::EastWall, 0, -1) => Some(CellTag::BottomRightCorner),
            _ => None,
        }
    }

    /// Rotation a structural piece is spawned with so it faces into its room
    pub fn facing(&self) -> Rotation {
        match self {
            CellTag::SouthWall | CellTag::BottomRightCorner => Rotation::Deg0,
            CellTag::WestWall | CellTag::BottomLeftCorner => Rotation::Deg90,
            CellTag::NorthWall | CellTag::TopLeftCorner => Rotation::Deg180,
            CellTag::EastWall | CellTag::TopRightCorner => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            CellTag::Walkable => '.',
            CellTag::CorridorWalkable => '=',
            CellTag::NorthWall | CellTag::SouthWall => '-',
            CellTag::EastWall | CellTag::WestWall => '|',
            CellTag::TopLeftCorner
            | CellTag::TopRightCorner
            | CellTag::BottomLeftCorner
            | CellTag::BottomRightCorner => '+',
            CellTag::FurnitureOccupied(_) => '&',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(CellTag::Walkable.is_walkable());
        assert!(CellTag::CorridorWalkable.is_walkable());
        assert!(!CellTag::FurnitureOccupied(3).is_walkable());
        assert!(CellTag::EastWall.is_wall());
        assert!(!CellTag::EastWall.is_corner());
        assert!(CellTag::TopLeftCorner.is_structural());
    }

    #[test]
    fn test_run_end_caps() {
        assert_eq!(CellTag::NorthWall.run_end_cap(1, 0), Some(CellTag::TopRightCorner));
        assert_eq!(CellTag::EastWall.run_end_cap(0, -1), Some(CellTag::BottomRightCorner));
        // Openings across the run do not end it
        assert_eq!(CellTag::NorthWall.run_end_cap(0, 1), None);
        assert_eq!(CellTag::TopLeftCorner.run_end_cap(1, 0), None);
    }
}
