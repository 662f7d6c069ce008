//! Room interiors
//!
//! Occupancy grids, placement strategies and the furnishing pass that turns
//! room definitions into placed furniture.

pub mod furnish;
pub mod placement;
pub mod room_grid;
pub mod strategies;

pub use furnish::{
    assign_room_kinds, furnish_layout, Furnishing, FurniturePlacement, PlacementShortfall,
};
pub use placement::{
    try_candidate, try_place_on_grid, OccupiedProbe, PlacedFootprint, PlacementCandidate,
    PlacementContext, RoomFrame, SpawnTransform,
};
pub use room_grid::RoomGrid;
pub use strategies::{enumerate_candidates, place_archetype, place_with_retry};
