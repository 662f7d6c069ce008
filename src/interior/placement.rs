//! Footprint placement on a room grid
//!
//! Everything that puts furniture into a room ends up in [`try_place_on_grid`].

use serde::{Deserialize, Serialize};

use super::room_grid::RoomGrid;
use crate::config::{FurnitureArchetype, LocationKind};
use crate::world::{cell_to_world_min, Rect, Rotation, Vec3};

/// A possible anchor for a footprint, in room-local cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementCandidate {
    /// Minimum corner of the rotated footprint
    pub anchor: (i32, i32),
    pub rotation: Rotation,
    pub location: LocationKind,
}

/// Where and how the host should spawn a placed item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTransform {
    pub position: Vec3,
    pub rotation: Rotation,
}

/// A footprint that made it onto the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedFootprint {
    pub candidate: PlacementCandidate,
    /// Size after rotation
    pub size: (i32, i32),
    pub transform: SpawnTransform,
}

/// Ties a room grid to the dungeon grid and world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomFrame {
    /// Dungeon cell of local `(0, 0)`
    pub origin: (i32, i32),
    pub cell_size: f32,
}

impl RoomFrame {
    pub fn new(origin: (i32, i32), cell_size: f32) -> Self {
        Self { origin, cell_size }
    }

    /// Dungeon-grid cells covered by a rotated footprint
    pub fn covered_cells(&self, anchor: (i32, i32), size: (i32, i32)) -> Rect {
        Rect::new(
            self.origin.0 + anchor.0,
            self.origin.1 + anchor.1,
            size.0,
            size.1,
        )
    }

    /// World transform of a footprint: its center plus the rotated pivot offset
    pub fn transform(
        &self,
        archetype: &FurnitureArchetype,
        anchor: (i32, i32),
        rotation: Rotation,
    ) -> SpawnTransform {
        let s = self.cell_size;
        let (width, height) = rotation.rotated_size(archetype.footprint.size);
        let min = cell_to_world_min(self.origin.0 + anchor.0, self.origin.1 + anchor.1, s);
        let center = min + Vec3::new(width as f32 * s / 2.0, 0.0, height as f32 * s / 2.0);

        SpawnTransform {
            position: center + rotation.rotate(archetype.pivot_offset * s),
            rotation,
        }
    }

    /// Unrotated half extents of a footprint, one cell tall
    pub fn half_extents(&self, archetype: &FurnitureArchetype) -> Vec3 {
        let (width, height) = archetype.footprint.size;
        Vec3::new(width as f32, 1.0, height as f32) * (self.cell_size / 2.0)
    }
}

/// Host veto on a world-space box, given as center, half extents and rotation
pub type OccupiedProbe<'a> = &'a dyn Fn(Vec3, Vec3, Rotation) -> bool;

/// Guards applied on top of the plain grid check
#[derive(Clone, Copy)]
pub struct PlacementContext<'a> {
    pub frame: RoomFrame,
    /// Reject placements that split the room's free cells
    pub keep_traversable: bool,
    pub occupied_probe: Option<OccupiedProbe<'a>>,
}

impl<'a> PlacementContext<'a> {
    pub fn new(frame: RoomFrame) -> Self {
        Self {
            frame,
            keep_traversable: false,
            occupied_probe: None,
        }
    }

    pub fn keep_traversable(mut self, keep: bool) -> Self {
        self.keep_traversable = keep;
        self
    }

    pub fn with_probe(mut self, probe: Option<OccupiedProbe<'a>>) -> Self {
        self.occupied_probe = probe;
        self
    }
}

/// Occupy the footprint at `anchor` if every covered cell is free
///
/// Width and height trade places at 90 and 270 degrees. Returns `None`, leaving
/// the grid untouched, when any cell is out of range, occupied or reserved.
pub fn try_place_on_grid(
    room: &mut RoomGrid,
    archetype: &FurnitureArchetype,
    frame: &RoomFrame,
    anchor: (i32, i32),
    rotation: Rotation,
) -> Option<SpawnTransform> {
    let (width, height) = rotation.rotated_size(archetype.footprint.size);
    if !room.can_place(anchor.0, anchor.1, width, height) {
        return None;
    }

    room.occupy_block(anchor.0, anchor.1, width, height);
    Some(frame.transform(archetype, anchor, rotation))
}

/// Try a candidate with every guard of the context applied
pub fn try_candidate(
    room: &mut RoomGrid,
    archetype: &FurnitureArchetype,
    ctx: &PlacementContext<'_>,
    candidate: PlacementCandidate,
) -> Option<PlacedFootprint> {
    let (x, z) = candidate.anchor;
    let (width, height) = candidate.rotation.rotated_size(archetype.footprint.size);

    if !room.can_place(x, z, width, height) {
        return None;
    }
    if ctx.keep_traversable && !room.stays_connected_without(x, z, width, height) {
        return None;
    }
    if let Some(probe) = ctx.occupied_probe {
        let transform = ctx.frame.transform(archetype, candidate.anchor, candidate.rotation);
        if probe(transform.position, ctx.frame.half_extents(archetype), candidate.rotation) {
            return None;
        }
    }

    try_place_on_grid(room, archetype, &ctx.frame, candidate.anchor, candidate.rotation).map(
        |transform| PlacedFootprint {
            candidate,
            size: (width, height),
            transform,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bed() -> FurnitureArchetype {
        FurnitureArchetype::new("bed", (2, 3), &[LocationKind::Corner])
    }

    #[test]
    fn test_place_occupies_rotated_footprint() {
        let mut room = RoomGrid::new(6, 6);
        let frame = RoomFrame::new((0, 0), 1.0);

        assert!(try_place_on_grid(&mut room, &bed(), &frame, (0, 0), Rotation::Deg90).is_some());
        assert_eq!(room.free_cell_count(), 30);
        // Rotated 3 wide, 2 deep
        assert!(room.is_occupied(2, 1));
        assert!(!room.is_occupied(0, 2));
    }

    #[test]
    fn test_never_double_occupies() {
        let mut room = RoomGrid::new(6, 6);
        let frame = RoomFrame::new((0, 0), 1.0);

        assert!(try_place_on_grid(&mut room, &bed(), &frame, (1, 1), Rotation::Deg0).is_some());
        let before = room.clone();
        assert!(try_place_on_grid(&mut room, &bed(), &frame, (2, 2), Rotation::Deg0).is_none());
        assert!(try_place_on_grid(&mut room, &bed(), &frame, (5, 5), Rotation::Deg0).is_none());
        assert_eq!(room, before);
        assert_eq!(room.free_cell_count(), 30);
    }

    #[test]
    fn test_transform_is_footprint_center() {
        let mut room = RoomGrid::new(8, 8);
        let frame = RoomFrame::new((10, 20), 4.0);

        let t = try_place_on_grid(&mut room, &bed(), &frame, (1, 2), Rotation::Deg0).unwrap();
        // Cells 11..13 x 22..25, 4 units each
        assert_eq!(t.position, Vec3::new(48.0, 0.0, 94.0));
        assert_eq!(t.rotation, Rotation::Deg0);

        let t = try_place_on_grid(&mut room, &bed(), &frame, (4, 0), Rotation::Deg90).unwrap();
        // Rotated: 3 wide, 2 deep
        assert_eq!(t.position, Vec3::new(62.0, 0.0, 84.0));
    }

    #[test]
    fn test_pivot_offset_follows_rotation() {
        let crate_box = FurnitureArchetype::new("small_box", (2, 2), &[LocationKind::Wall])
            .with_pivot(Vec3::new(0.0, 0.0, -0.25));
        let frame = RoomFrame::new((0, 0), 4.0);

        let t = frame.transform(&crate_box, (0, 0), Rotation::Deg0);
        assert_eq!(t.position, Vec3::new(4.0, 0.0, 3.0));
        let t = frame.transform(&crate_box, (0, 0), Rotation::Deg90);
        assert_eq!(t.position, Vec3::new(3.0, 0.0, 4.0));
    }

    #[test]
    fn test_context_guards() {
        let bar = FurnitureArchetype::new("bar", (1, 3), &[LocationKind::Center]);
        let frame = RoomFrame::new((0, 0), 1.0);
        let splitting = PlacementCandidate {
            anchor: (2, 0),
            rotation: Rotation::Deg0,
            location: LocationKind::Center,
        };

        let mut room = RoomGrid::new(5, 3);
        let strict = PlacementContext::new(frame).keep_traversable(true);
        assert!(try_candidate(&mut room, &bar, &strict, splitting).is_none());
        assert_eq!(room.free_cell_count(), 15);

        let loose = PlacementContext::new(frame);
        assert!(try_candidate(&mut room, &bar, &loose, splitting).is_some());

        let mut room = RoomGrid::new(5, 3);
        let always_taken: OccupiedProbe<'_> = &|_, _, _| true;
        let probed = PlacementContext::new(frame).with_probe(Some(always_taken));
        assert!(try_candidate(&mut room, &bar, &probed, splitting).is_none());
    }
}
