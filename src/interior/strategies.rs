//! Placement strategies
//!
//! Corner, along-wall and center-area anchors for a footprint, either all
//! enumerated up front or drawn at random one attempt at a time.

use rand::seq::SliceRandom;
use rand::Rng;

use super::placement::{try_candidate, PlacedFootprint, PlacementCandidate, PlacementContext};
use super::room_grid::RoomGrid;
use crate::config::{FootprintSpec, FurnitureArchetype, LocationKind, PlacementMode};
use crate::world::Rotation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WallSide {
    South,
    North,
    West,
    East,
}

impl WallSide {
    const ALL: [WallSide; 4] = [WallSide::South, WallSide::North, WallSide::West, WallSide::East];

    /// Rotation that faces away from this wall
    fn facing(self) -> Rotation {
        match self {
            WallSide::South => Rotation::Deg0,
            WallSide::North => Rotation::Deg180,
            WallSide::West => Rotation::Deg90,
            WallSide::East => Rotation::Deg270,
        }
    }
}

/// The four flush corner anchors, each with its inward-facing rotation
pub fn corner_candidates(room: &RoomGrid, size: (i32, i32)) -> Vec<PlacementCandidate> {
    let corners = [
        (Rotation::Deg90, false, false),
        (Rotation::Deg0, true, false),
        (Rotation::Deg180, false, true),
        (Rotation::Deg270, true, true),
    ];

    corners
        .into_iter()
        .filter_map(|(rotation, east, north)| {
            let (width, height) = rotation.rotated_size(size);
            let x = if east { room.width() - width } else { 0 };
            let z = if north { room.height() - height } else { 0 };
            fits(room, (x, z), (width, height)).then_some(PlacementCandidate {
                anchor: (x, z),
                rotation,
                location: LocationKind::Corner,
            })
        })
        .collect()
}

/// Every anchor flush against `side` that keeps a cell clear of both perpendicular walls
fn wall_run(room: &RoomGrid, size: (i32, i32), side: WallSide) -> Vec<PlacementCandidate> {
    let rotation = side.facing();
    let (width, height) = rotation.rotated_size(size);

    let anchors: Vec<(i32, i32)> = match side {
        WallSide::South => (1..room.width() - width).map(|x| (x, 0)).collect(),
        WallSide::North => (1..room.width() - width)
            .map(|x| (x, room.height() - height))
            .collect(),
        WallSide::West => (1..room.height() - height).map(|z| (0, z)).collect(),
        WallSide::East => (1..room.height() - height)
            .map(|z| (room.width() - width, z))
            .collect(),
    };

    anchors
        .into_iter()
        .filter(|&anchor| fits(room, anchor, (width, height)))
        .map(|anchor| PlacementCandidate {
            anchor,
            rotation,
            location: LocationKind::Wall,
        })
        .collect()
}

pub fn wall_candidates(room: &RoomGrid, size: (i32, i32)) -> Vec<PlacementCandidate> {
    WallSide::ALL
        .into_iter()
        .flat_map(|side| wall_run(room, size, side))
        .collect()
}

/// Anchors one cell off every wall, in all four rotations
pub fn center_candidates(room: &RoomGrid, size: (i32, i32)) -> Vec<PlacementCandidate> {
    let mut candidates = Vec::new();
    for rotation in Rotation::ALL {
        let (width, height) = rotation.rotated_size(size);
        for z in 1..room.height() - height {
            for x in 1..room.width() - width {
                candidates.push(PlacementCandidate {
                    anchor: (x, z),
                    rotation,
                    location: LocationKind::Center,
                });
            }
        }
    }
    candidates
}

/// All candidates of the kinds a footprint allows
pub fn enumerate_candidates(room: &RoomGrid, footprint: &FootprintSpec) -> Vec<PlacementCandidate> {
    let mut candidates = Vec::new();
    if footprint.allows(LocationKind::Corner) {
        candidates.extend(corner_candidates(room, footprint.size));
    }
    if footprint.allows(LocationKind::Wall) {
        candidates.extend(wall_candidates(room, footprint.size));
    }
    if footprint.allows(LocationKind::Center) {
        candidates.extend(center_candidates(room, footprint.size));
    }
    candidates
}

pub fn random_corner_candidate<R: Rng + ?Sized>(
    rng: &mut R,
    room: &RoomGrid,
    size: (i32, i32),
) -> Option<PlacementCandidate> {
    corner_candidates(room, size).choose(rng).copied()
}

/// Random wall, then a random offset along it
pub fn random_wall_candidate<R: Rng + ?Sized>(
    rng: &mut R,
    room: &RoomGrid,
    size: (i32, i32),
) -> Option<PlacementCandidate> {
    let side = *WallSide::ALL.choose(rng)?;
    wall_run(room, size, side).choose(rng).copied()
}

/// Random rotation, then a random anchor padded one cell from every wall
pub fn random_center_candidate<R: Rng + ?Sized>(
    rng: &mut R,
    room: &RoomGrid,
    size: (i32, i32),
) -> Option<PlacementCandidate> {
    let rotation = *Rotation::ALL.choose(rng)?;
    let (width, height) = rotation.rotated_size(size);
    let (max_x, max_z) = (room.width() - width, room.height() - height);
    if max_x <= 1 || max_z <= 1 {
        return None;
    }

    Some(PlacementCandidate {
        anchor: (rng.gen_range(1..max_x), rng.gen_range(1..max_z)),
        rotation,
        location: LocationKind::Center,
    })
}

fn fits(room: &RoomGrid, anchor: (i32, i32), size: (i32, i32)) -> bool {
    anchor.0 >= 0
        && anchor.1 >= 0
        && anchor.0 + size.0 <= room.width()
        && anchor.1 + size.1 <= room.height()
}

/// Place up to `count` items of one archetype
///
/// Returns the items that found a spot, in placement order.
pub fn place_archetype<R: Rng + ?Sized>(
    rng: &mut R,
    room: &mut RoomGrid,
    archetype: &FurnitureArchetype,
    ctx: &PlacementContext<'_>,
    count: usize,
    mode: PlacementMode,
    max_attempts: u32,
) -> Vec<PlacedFootprint> {
    if count == 0 {
        return Vec::new();
    }

    match mode {
        PlacementMode::Enumerate => place_enumerated(rng, room, archetype, ctx, count),
        PlacementMode::RandomRetry => {
            let mut placed = Vec::with_capacity(count);
            for _ in 0..count {
                match place_with_retry(rng, room, archetype, ctx, max_attempts) {
                    Some(footprint) => placed.push(footprint),
                    None => break,
                }
            }
            placed
        }
    }
}

/// Shuffle every candidate and keep the first ones that are still valid
fn place_enumerated<R: Rng + ?Sized>(
    rng: &mut R,
    room: &mut RoomGrid,
    archetype: &FurnitureArchetype,
    ctx: &PlacementContext<'_>,
    count: usize,
) -> Vec<PlacedFootprint> {
    let mut candidates = enumerate_candidates(room, &archetype.footprint);
    candidates.shuffle(rng);

    let mut placed = Vec::with_capacity(count);
    for candidate in candidates {
        if placed.len() == count {
            break;
        }
        if let Some(footprint) = try_candidate(room, archetype, ctx, candidate) {
            placed.push(footprint);
        }
    }
    placed
}

/// One item by random attempts of an allowed kind, up to the ceiling
pub fn place_with_retry<R: Rng + ?Sized>(
    rng: &mut R,
    room: &mut RoomGrid,
    archetype: &FurnitureArchetype,
    ctx: &PlacementContext<'_>,
    max_attempts: u32,
) -> Option<PlacedFootprint> {
    let size = archetype.footprint.size;

    for _ in 0..max_attempts {
        let kind = *archetype.footprint.allowed.choose(rng)?;
        let candidate = match kind {
            LocationKind::Corner => random_corner_candidate(rng, room, size),
            LocationKind::Wall => random_wall_candidate(rng, room, size),
            LocationKind::Center => random_center_candidate(rng, room, size),
        };
        if let Some(footprint) = candidate.and_then(|c| try_candidate(room, archetype, ctx, c)) {
            return Some(footprint);
        }
    }

    log::debug!(
        "Gave up placing '{}' after {} attempts",
        archetype.id,
        max_attempts
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interior::placement::RoomFrame;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx() -> PlacementContext<'static> {
        PlacementContext::new(RoomFrame::new((0, 0), 1.0))
    }

    #[test]
    fn test_corner_footprint_in_six_by_six() {
        let room = RoomGrid::new(6, 6);
        let footprint = FootprintSpec::new((2, 2), &[LocationKind::Corner]);
        let candidates = enumerate_candidates(&room, &footprint);

        assert_eq!(candidates.len(), 4);
        let mut anchors: Vec<_> = candidates.iter().map(|c| c.anchor).collect();
        anchors.sort();
        assert_eq!(anchors, vec![(0, 0), (0, 4), (4, 0), (4, 4)]);
    }

    #[test]
    fn test_corner_rotations_face_inward() {
        let room = RoomGrid::new(6, 6);
        let candidates = corner_candidates(&room, (2, 2));
        let rotation_at = |anchor| candidates.iter().find(|c| c.anchor == anchor).unwrap().rotation;

        assert_eq!(rotation_at((0, 0)), Rotation::Deg90);
        assert_eq!(rotation_at((4, 0)), Rotation::Deg0);
        assert_eq!(rotation_at((0, 4)), Rotation::Deg180);
        assert_eq!(rotation_at((4, 4)), Rotation::Deg270);
    }

    #[test]
    fn test_wall_candidates_clear_the_corners() {
        let room = RoomGrid::new(6, 5);
        let candidates = wall_candidates(&room, (2, 1));

        for c in &candidates {
            let (w, h) = c.rotation.rotated_size((2, 1));
            let (x, z) = c.anchor;
            let touches_x = x == 0 || x + w == room.width();
            let touches_z = z == 0 || z + h == room.height();
            assert!(touches_x != touches_z, "{:?} is not on exactly one wall", c);
        }
        // South/north: x in 1..=3, west/east (rotated 1x2): z in 1..=2
        assert_eq!(candidates.len(), 3 + 3 + 2 + 2);
    }

    #[test]
    fn test_center_candidates_padded() {
        let room = RoomGrid::new(6, 6);
        let candidates = center_candidates(&room, (2, 2));
        // 3x3 anchors per rotation
        assert_eq!(candidates.len(), 36);
        assert!(candidates
            .iter()
            .all(|c| c.anchor.0 >= 1 && c.anchor.0 + 2 <= 5 && c.anchor.1 >= 1 && c.anchor.1 + 2 <= 5));

        let tiny = RoomGrid::new(3, 3);
        assert!(center_candidates(&tiny, (2, 2)).is_empty());
        assert!(random_center_candidate(&mut StdRng::seed_from_u64(1), &tiny, (2, 2)).is_none());
    }

    #[test]
    fn test_enumerate_fills_every_corner_then_stops() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut room = RoomGrid::new(6, 6);
        let post = FurnitureArchetype::new("post", (2, 2), &[LocationKind::Corner]);

        let placed = place_archetype(&mut rng, &mut room, &post, &ctx(), 6, PlacementMode::Enumerate, 500);
        assert_eq!(placed.len(), 4);
        assert_eq!(room.free_cell_count(), 36 - 16);
    }

    #[test]
    fn test_random_retry_places_and_gives_up() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut room = RoomGrid::new(8, 8);
        let barrel = FurnitureArchetype::new("barrel", (1, 1), &[LocationKind::Wall, LocationKind::Corner]);

        let placed = place_archetype(&mut rng, &mut room, &barrel, &ctx(), 5, PlacementMode::RandomRetry, 500);
        assert_eq!(placed.len(), 5);
        assert_eq!(room.free_cell_count(), 59);

        let mut cramped = RoomGrid::new(2, 2);
        let table = FurnitureArchetype::new("long_table", (2, 4), &[LocationKind::Center]);
        assert!(place_with_retry(&mut rng, &mut cramped, &table, &ctx(), 20).is_none());
        assert_eq!(cramped.free_cell_count(), 4);
    }
}
