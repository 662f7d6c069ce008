//! Grid coordinate mapping
//!
//! Conversions between integer grid cells and world-space positions, plus the
//! quarter-turn rotations everything on the grid is spawned with.
//! The grid lies on the horizontal x/z plane; y is up.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// A world-space position or offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Yaw rotation in quarter turns
///
/// Positive turns are clockwise seen from above: a 90 degree turn points the
/// local forward axis (+z) at +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn degrees(&self) -> f32 {
        match self {
            Rotation::Deg0 => 0.0,
            Rotation::Deg90 => 90.0,
            Rotation::Deg180 => 180.0,
            Rotation::Deg270 => 270.0,
        }
    }

    /// Whether width and height trade places under this rotation
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Footprint size on the grid after rotation
    pub fn rotated_size(&self, (width, height): (i32, i32)) -> (i32, i32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Rotate a local offset into world space
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        match self {
            Rotation::Deg0 => v,
            Rotation::Deg90 => Vec3::new(v.z, v.y, -v.x),
            Rotation::Deg180 => Vec3::new(-v.x, v.y, -v.z),
            Rotation::Deg270 => Vec3::new(-v.z, v.y, v.x),
        }
    }
}

/// World position of the minimum corner of a cell
pub fn cell_to_world_min(x: i32, z: i32, cell_size: f32) -> Vec3 {
    Vec3::new(x as f32 * cell_size, 0.0, z as f32 * cell_size)
}

/// World position of the center of a cell
pub fn cell_to_world_center(x: i32, z: i32, cell_size: f32) -> Vec3 {
    let half = cell_size / 2.0;
    cell_to_world_min(x, z, cell_size) + Vec3::new(half, 0.0, half)
}

/// Cell containing a world position
pub fn world_to_cell(position: Vec3, cell_size: f32) -> (i32, i32) {
    (
        (position.x / cell_size).floor() as i32,
        (position.z / cell_size).floor() as i32,
    )
}
