//! Corridor carving between connected rooms
//!
//! Rooms that share a wall are joined by a straight breach through both facing
//! walls. Rooms that do not touch get an L-shaped dog-leg between their centers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::connectivity::Connection;
use crate::world::{CellGrid, CellTag, Rect};

/// Preferred distance of a breach from the end of the shared wall
pub const CORRIDOR_INSET: i32 = 2;

/// Direction of travel through a corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorridorOrientation {
    /// Runs along x, through east/west walls
    Horizontal,
    /// Runs along z, through north/south walls
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorridorKind {
    Breach(CorridorOrientation),
    DogLeg,
}

/// A carved connection between two rooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub from: usize,
    pub to: usize,
    pub kind: CorridorKind,
    /// Cells that were turned into corridor cells
    pub cells: Vec<(i32, i32)>,
}

/// Wall segment two adjacent rooms have in common
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedWall {
    pub orientation: CorridorOrientation,
    /// Wall line of the room on the low side (west or south)
    pub low_line: i32,
    /// Wall line of the room on the high side (east or north)
    pub high_line: i32,
    /// First usable cell along the wall, clear of both rooms' corners
    pub lo: i32,
    /// Last usable cell along the wall
    pub hi: i32,
}

impl SharedWall {
    pub fn len(&self) -> i32 {
        self.hi - self.lo + 1
    }
}

/// Find the wall segment two rooms share, if they touch side by side
pub fn shared_wall(a: &Rect, b: &Rect) -> Option<SharedWall> {
    let (orientation, low_line, high_line, lo, hi) = if a.max_x() + 1 == b.x {
        let (lo, hi) = overlap_z(a, b);
        (CorridorOrientation::Horizontal, a.max_x(), b.x, lo, hi)
    } else if b.max_x() + 1 == a.x {
        let (lo, hi) = overlap_z(a, b);
        (CorridorOrientation::Horizontal, b.max_x(), a.x, lo, hi)
    } else if a.max_z() + 1 == b.z {
        let (lo, hi) = overlap_x(a, b);
        (CorridorOrientation::Vertical, a.max_z(), b.z, lo, hi)
    } else if b.max_z() + 1 == a.z {
        let (lo, hi) = overlap_x(a, b);
        (CorridorOrientation::Vertical, b.max_z(), a.z, lo, hi)
    } else {
        return None;
    };

    (lo <= hi).then_some(SharedWall {
        orientation,
        low_line,
        high_line,
        lo,
        hi,
    })
}

fn overlap_z(a: &Rect, b: &Rect) -> (i32, i32) {
    (a.z.max(b.z) + 1, a.max_z().min(b.max_z()) - 1)
}

fn overlap_x(a: &Rect, b: &Rect) -> (i32, i32) {
    (a.x.max(b.x) + 1, a.max_x().min(b.max_x()) - 1)
}

/// Carve the corridor for one connection
pub fn carve_corridor<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut CellGrid,
    rooms: &[Rect],
    connection: Connection,
    width: i32,
) -> Corridor {
    let a = &rooms[connection.from];
    let b = &rooms[connection.to];
    let width = width.max(1);

    let (kind, cells) = match shared_wall(a, b).filter(|wall| wall.len() >= width) {
        Some(wall) => (
            CorridorKind::Breach(wall.orientation),
            carve_breach(rng, grid, &wall, width),
        ),
        None => (CorridorKind::DogLeg, carve_dog_leg(rng, grid, a, b, width)),
    };

    repair_run_ends(grid, &cells);
    log::debug!(
        "Corridor {} -> {}: {:?}, {} cells",
        connection.from,
        connection.to,
        kind,
        cells.len()
    );

    Corridor {
        from: connection.from,
        to: connection.to,
        kind,
        cells,
    }
}

/// Open both facing walls at one of two symmetric offsets
fn carve_breach<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut CellGrid,
    wall: &SharedWall,
    width: i32,
) -> Vec<(i32, i32)> {
    let slack = wall.len() - width;
    let inset = CORRIDOR_INSET.min(slack / 2);
    let start = if rng.gen_bool(0.5) {
        wall.lo + inset
    } else {
        wall.hi - width + 1 - inset
    };

    let mut carved = Vec::with_capacity((width * 2) as usize);
    for along in start..start + width {
        for line in [wall.low_line, wall.high_line] {
            let (x, z) = match wall.orientation {
                CorridorOrientation::Horizontal => (line, along),
                CorridorOrientation::Vertical => (along, line),
            };
            carve_cell(grid, x, z, &mut carved);
        }
    }
    carved
}

/// L-shaped corridor from center to center, longer axis first
fn carve_dog_leg<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut CellGrid,
    a: &Rect,
    b: &Rect,
    width: i32,
) -> Vec<(i32, i32)> {
    let (ax, az) = a.center_cell();
    let (bx, bz) = b.center_cell();
    let dx = (bx - ax).abs();
    let dz = (bz - az).abs();

    let horizontal_first = match dx.cmp(&dz) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => rng.gen_bool(0.5),
    };

    let mut carved = Vec::new();
    if horizontal_first {
        carve_strip(grid, ax.min(bx), ax.max(bx) + width - 1, az, az + width - 1, &mut carved);
        carve_strip(grid, bx, bx + width - 1, az.min(bz), az.max(bz) + width - 1, &mut carved);
    } else {
        carve_strip(grid, ax, ax + width - 1, az.min(bz), az.max(bz) + width - 1, &mut carved);
        carve_strip(grid, ax.min(bx), ax.max(bx) + width - 1, bz, bz + width - 1, &mut carved);
    }
    carved
}

fn carve_strip(
    grid: &mut CellGrid,
    x0: i32,
    x1: i32,
    z0: i32,
    z1: i32,
    carved: &mut Vec<(i32, i32)>,
) {
    for z in z0..=z1 {
        for x in x0..=x1 {
            carve_cell(grid, x, z, carved);
        }
    }
}

/// Turn a blocking cell into corridor. Walkable cells are left alone.
fn carve_cell(grid: &mut CellGrid, x: i32, z: i32, carved: &mut Vec<(i32, i32)>) {
    match grid.get(x, z) {
        Some(tag) if !tag.is_walkable() => {
            grid.set(x, z, CellTag::CorridorWalkable);
            carved.push((x, z));
        }
        _ => {}
    }
}

/// Cap wall runs that now end at an opening with the matching corner
fn repair_run_ends(grid: &mut CellGrid, carved: &[(i32, i32)]) {
    for &(x, z) in carved {
        for (dx, dz) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let (nx, nz) = (x + dx, z + dz);
            let cap = grid.get(nx, nz).and_then(|tag| tag.run_end_cap(-dx, -dz));
            if let Some(cap) = cap {
                grid.set(nx, nz, cap);
            }
        }
    }
}
