//! World module
//!
//! Grid geometry, cell classification and the dungeon layout generator.

pub mod cell;
pub mod coords;
pub mod generation;
pub mod grid;
pub mod rect;

pub use cell::{CellTag, FurnitureId};
pub use coords::{cell_to_world_center, cell_to_world_min, world_to_cell, Rotation, Vec3};
pub use grid::CellGrid;
pub use rect::Rect;
