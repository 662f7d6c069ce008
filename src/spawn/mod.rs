//! Host spawning interface
//!
//! The generator never creates scene objects itself. It asks a [`Spawner`]
//! to instantiate archetypes and keeps the handles it gets back.

pub mod arena;

pub use arena::{InstanceArena, SpawnedInstance};

use serde::{Deserialize, Serialize};

use crate::config::ArchetypeId;
use crate::error::SpawnError;
use crate::world::{Rotation, Vec3};

/// Opaque reference to something the host spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceHandle(pub u64);

/// What a host has to provide to receive a dungeon
pub trait Spawner {
    /// Instantiate an archetype at a world position
    fn spawn_instance(
        &mut self,
        archetype: &ArchetypeId,
        position: Vec3,
        rotation: Rotation,
    ) -> Result<InstanceHandle, SpawnError>;

    /// Remove instances; unknown handles are ignored
    fn destroy_all(&mut self, handles: &[InstanceHandle]);

    /// Whether anything already occupies a box
    fn query_occupied_volume(&self, _center: Vec3, _half_extents: Vec3, _rotation: Rotation) -> bool {
        false
    }
}
