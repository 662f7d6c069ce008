//! Room kinds and furnishing
//!
//! Hands every room of a layout a kind, then fills it with the furniture its
//! room definition asks for.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::placement::{OccupiedProbe, PlacementContext, RoomFrame, SpawnTransform};
use super::room_grid::RoomGrid;
use super::strategies::place_archetype;
use crate::config::{ArchetypeId, DungeonConfig, LocationKind, RoomDefinition, RoomKind};
use crate::world::generation::DungeonLayout;
use crate::world::{CellGrid, CellTag, FurnitureId, Rect};

/// One placed piece of furniture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurniturePlacement {
    pub id: FurnitureId,
    /// Index of the room it stands in
    pub room: usize,
    pub archetype: ArchetypeId,
    pub location: LocationKind,
    /// Dungeon cells it covers
    pub cells: Rect,
    pub transform: SpawnTransform,
}

/// Fewer items fit than a furnishing rule asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementShortfall {
    pub room: usize,
    pub archetype: ArchetypeId,
    pub requested: usize,
    pub placed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Furnishing {
    pub placements: Vec<FurniturePlacement>,
    pub shortfalls: Vec<PlacementShortfall>,
}

/// Decide the kind of every room
///
/// Room 0 goes first and the rest follow in random order. Each definition
/// takes its guaranteed number of rooms in list order; every room left over
/// gets a random filler kind, or `Plain` when nothing is marked as filler.
pub fn assign_room_kinds<R: Rng + ?Sized>(
    rng: &mut R,
    room_count: usize,
    definitions: &[RoomDefinition],
) -> Vec<RoomKind> {
    let mut order: Vec<usize> = (0..room_count).collect();
    if room_count > 1 {
        order[1..].shuffle(rng);
    }

    let mut kinds = vec![RoomKind::Plain; room_count];
    let mut remaining = order.into_iter();

    for definition in definitions {
        for _ in 0..definition.guaranteed {
            match remaining.next() {
                Some(room) => kinds[room] = definition.kind,
                None => {
                    log::debug!(
                        "Not enough rooms for every guaranteed {:?} room",
                        definition.kind
                    );
                    break;
                }
            }
        }
    }

    let fillers: Vec<RoomKind> = definitions
        .iter()
        .filter(|d| d.filler)
        .map(|d| d.kind)
        .collect();
    for room in remaining {
        kinds[room] = fillers.choose(rng).copied().unwrap_or(RoomKind::Plain);
    }

    kinds
}

/// Occupancy grid for a room's interior, with doorway approaches reserved
pub fn room_grid_for(grid: &CellGrid, bounds: &Rect, interior: &Rect) -> RoomGrid {
    let mut room_grid = RoomGrid::new(interior.width, interior.height);

    for (x, z) in interior.cells() {
        let next_to_opening = [(1, 0), (-1, 0), (0, 1), (0, -1)].iter().any(|(dx, dz)| {
            let (nx, nz) = (x + dx, z + dz);
            bounds.is_border(nx, nz) && grid.get(nx, nz).is_some_and(|t| t.is_corridor())
        });
        if next_to_opening {
            room_grid.reserve(x - interior.x, z - interior.z);
        }
    }

    room_grid
}

/// Assign room kinds and place furniture in every room
///
/// Placed furniture is written into the layout grid. Rules that could not be
/// met in full are reported as shortfalls.
pub fn furnish_layout<R: Rng + ?Sized>(
    rng: &mut R,
    layout: &mut DungeonLayout,
    config: &DungeonConfig,
    probe: Option<OccupiedProbe<'_>>,
) -> Furnishing {
    let kinds = assign_room_kinds(rng, layout.rooms.len(), &config.rooms);
    for (room, kind) in layout.rooms.iter_mut().zip(kinds) {
        room.kind = kind;
    }

    let mut furnishing = Furnishing::default();

    for index in 0..layout.rooms.len() {
        let (bounds, kind) = (layout.rooms[index].bounds, layout.rooms[index].kind);
        let Some(interior) = bounds.interior() else {
            continue;
        };
        let Some(definition) = config.room_definition(kind) else {
            continue;
        };

        let mut room_grid = room_grid_for(&layout.grid, &bounds, &interior);
        let ctx = PlacementContext::new(RoomFrame::new((interior.x, interior.z), config.cell_size))
            .keep_traversable(config.placement.keep_rooms_traversable)
            .with_probe(probe);

        for rule in &definition.furnishing {
            let Some(archetype) = config.archetype(&rule.archetype) else {
                continue;
            };
            let requested = rng.gen_range(rule.min_count..=rule.max_count) as usize;
            let placed = place_archetype(
                rng,
                &mut room_grid,
                archetype,
                &ctx,
                requested,
                config.placement.mode,
                config.placement.max_attempts,
            );

            for footprint in &placed {
                let id = furnishing.placements.len() as FurnitureId;
                let cells = ctx.frame.covered_cells(footprint.candidate.anchor, footprint.size);
                for (x, z) in cells.cells() {
                    layout.grid.set(x, z, CellTag::FurnitureOccupied(id));
                }
                furnishing.placements.push(FurniturePlacement {
                    id,
                    room: index,
                    archetype: archetype.id.clone(),
                    location: footprint.candidate.location,
                    cells,
                    transform: footprint.transform,
                });
            }

            if placed.len() < requested {
                log::warn!(
                    "Room {} ({:?}): placed {} of {} '{}'",
                    index,
                    kind,
                    placed.len(),
                    requested,
                    archetype.id
                );
                furnishing.shortfalls.push(PlacementShortfall {
                    room: index,
                    archetype: archetype.id.clone(),
                    requested,
                    placed: placed.len(),
                });
            }
        }
    }

    log::debug!(
        "Furnished {} rooms: {} items, {} shortfalls",
        layout.rooms.len(),
        furnishing.placements.len(),
        furnishing.shortfalls.len()
    );

    furnishing
}
