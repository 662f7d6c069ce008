//! Procedural dungeon layout
//!
//! Partition the bounds into rooms, wall them in, then join them with corridors.

pub mod bsp;
pub mod connectivity;
pub mod corridors;
pub mod walls;

pub use bsp::{partition_all, split};
pub use connectivity::{connect_rooms, Connection};
pub use corridors::{carve_corridor, shared_wall, Corridor, CorridorKind, CorridorOrientation};
pub use walls::{carve_room_walls, carve_walls};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{CellGrid, Rect};
use crate::config::{LayoutConfig, RoomKind};

/// One room of a generated layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRoom {
    pub id: usize,
    /// Full footprint including the wall ring
    pub bounds: Rect,
    pub kind: RoomKind,
}

/// Finished layout: the cell grid plus what was carved into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub bounds: Rect,
    pub grid: CellGrid,
    pub rooms: Vec<LayoutRoom>,
    pub corridors: Vec<Corridor>,
}

impl DungeonLayout {
    pub fn room_rects(&self) -> Vec<Rect> {
        self.rooms.iter().map(|r| r.bounds).collect()
    }

    /// Whether every room interior is reachable from the first room
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.rooms.first() else {
            return true;
        };
        let Some(start) = first_walkable(&self.grid, &first.bounds) else {
            return false;
        };

        let mask = self.grid.walkable_region(start);
        self.rooms.iter().all(|room| {
            room.bounds
                .interior()
                .map(|inner| inner.cells().any(|(x, z)| self.grid.is_visited(&mask, x, z)))
                .unwrap_or(false)
        })
    }

    /// Whether every walkable cell in the grid is reachable from the first room
    pub fn all_walkable_reachable(&self) -> bool {
        let Some(start) = self
            .rooms
            .first()
            .and_then(|room| first_walkable(&self.grid, &room.bounds))
        else {
            return self.grid.count(|t| t.is_walkable()) == 0;
        };

        let mask = self.grid.walkable_region(start);
        self.grid
            .iter()
            .filter(|(_, _, tag)| tag.is_walkable())
            .all(|(x, z, _)| self.grid.is_visited(&mask, x, z))
    }
}

fn first_walkable(grid: &CellGrid, rect: &Rect) -> Option<(i32, i32)> {
    rect.cells()
        .find(|&(x, z)| grid.get(x, z).is_some_and(|t| t.is_walkable()))
}

/// Generate a walled, connected room layout
pub fn generate_layout<R: Rng + ?Sized>(rng: &mut R, config: &LayoutConfig) -> DungeonLayout {
    let bounds = Rect::new(0, 0, config.width.max(1), config.height.max(1));
    let (min_width, min_height) = config.partition_minimum();

    let rects = partition_all(rng, bounds, min_width, min_height);

    let mut grid = CellGrid::new(bounds.width, bounds.height);
    carve_walls(&mut grid, &rects);

    let connections = connect_rooms(&rects);
    let corridors: Vec<Corridor> = connections
        .into_iter()
        .map(|connection| carve_corridor(rng, &mut grid, &rects, connection, config.corridor_width))
        .collect();

    let rooms = rects
        .into_iter()
        .enumerate()
        .map(|(id, bounds)| LayoutRoom {
            id,
            bounds,
            kind: RoomKind::Plain,
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Layout {}x{}: {} rooms, {} corridors",
        bounds.width,
        bounds.height,
        rooms.len(),
        corridors.len()
    );

    DungeonLayout {
        bounds,
        grid,
        rooms,
        corridors,
    }
}
