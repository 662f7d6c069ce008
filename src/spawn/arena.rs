//! In-memory spawner
//!
//! Records every spawned instance in a map. Used by the CLI, the benchmarks
//! and the tests. A capacity limit stands in for a host that runs out of room.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{InstanceHandle, Spawner};
use crate::config::{ArchetypeId, DungeonConfig};
use crate::error::SpawnError;
use crate::world::{Rotation, Vec3};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnedInstance {
    pub archetype: ArchetypeId,
    pub position: Vec3,
    pub rotation: Rotation,
    /// Half extents registered for volume queries, if any
    pub half_extents: Option<Vec3>,
}

#[derive(Debug, Clone, Default)]
pub struct InstanceArena {
    instances: BTreeMap<InstanceHandle, SpawnedInstance>,
    next_handle: u64,
    capacity: Option<usize>,
    /// When set, only these archetypes can be spawned
    known: Option<HashSet<ArchetypeId>>,
    /// Box sizes of archetypes, for volume queries
    extents: Vec<(ArchetypeId, Vec3)>,
}

impl InstanceArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena that only accepts the config's archetypes and knows every
    /// furniture box, so volume queries see placed furniture
    pub fn for_config(config: &DungeonConfig) -> Self {
        let structure = &config.structure;
        let known = [structure.wall.clone(), structure.corner.clone()]
            .into_iter()
            .chain(structure.corridor.clone())
            .chain(config.archetypes.iter().map(|a| a.id.clone()));

        config.archetypes.iter().fold(
            Self::new().with_known_archetypes(known),
            |arena, archetype| {
                let (width, height) = archetype.footprint.size;
                let half = Vec3::new(width as f32, 1.0, height as f32) * (config.cell_size / 2.0);
                arena.with_extents(archetype.id.clone(), half)
            },
        )
    }

    /// Fail spawns once `capacity` instances are alive
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Reject any archetype not in `ids`
    pub fn with_known_archetypes<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = ArchetypeId>,
    {
        self.known = Some(ids.into_iter().collect());
        self
    }

    /// Give an archetype a box so volume queries can see it
    pub fn with_extents(mut self, archetype: ArchetypeId, half_extents: Vec3) -> Self {
        self.extents.push((archetype, half_extents));
        self
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, handle: InstanceHandle) -> Option<&SpawnedInstance> {
        self.instances.get(&handle)
    }

    /// Live instances in spawn order
    pub fn instances(&self) -> impl Iterator<Item = (InstanceHandle, &SpawnedInstance)> {
        self.instances.iter().map(|(handle, instance)| (*handle, instance))
    }

    pub fn count_of(&self, archetype: &str) -> usize {
        self.instances
            .values()
            .filter(|i| i.archetype.as_str() == archetype)
            .count()
    }
}

impl Spawner for InstanceArena {
    fn spawn_instance(
        &mut self,
        archetype: &ArchetypeId,
        position: Vec3,
        rotation: Rotation,
    ) -> Result<InstanceHandle, SpawnError> {
        if let Some(known) = &self.known {
            if !known.contains(archetype) {
                return Err(SpawnError::UnknownArchetype(archetype.clone()));
            }
        }
        if let Some(capacity) = self.capacity {
            if self.instances.len() >= capacity {
                return Err(SpawnError::CapacityExhausted(capacity));
            }
        }

        let half_extents = self
            .extents
            .iter()
            .find(|(id, _)| id == archetype)
            .map(|(_, extents)| *extents);

        let handle = InstanceHandle(self.next_handle);
        self.next_handle += 1;
        self.instances.insert(
            handle,
            SpawnedInstance {
                archetype: archetype.clone(),
                position,
                rotation,
                half_extents,
            },
        );
        Ok(handle)
    }

    fn destroy_all(&mut self, handles: &[InstanceHandle]) {
        for handle in handles {
            self.instances.remove(handle);
        }
    }

    /// Axis-aligned overlap test against every instance with a registered box
    fn query_occupied_volume(&self, center: Vec3, half_extents: Vec3, rotation: Rotation) -> bool {
        let (hx, hz) = if rotation.swaps_axes() {
            (half_extents.z, half_extents.x)
        } else {
            (half_extents.x, half_extents.z)
        };

        self.instances.values().any(|instance| {
            let Some(other) = instance.half_extents else {
                return false;
            };
            let (ox, oz) = if instance.rotation.swaps_axes() {
                (other.z, other.x)
            } else {
                (other.x, other.z)
            };
            (center.x - instance.position.x).abs() < hx + ox
                && (center.z - instance.position.z).abs() < hz + oz
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_destroy() {
        let mut arena = InstanceArena::new();
        let wall = ArchetypeId::new("wall");

        let a = arena.spawn_instance(&wall, Vec3::ZERO, Rotation::Deg0).unwrap();
        let b = arena.spawn_instance(&wall, Vec3::new(4.0, 0.0, 0.0), Rotation::Deg90).unwrap();
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(b).unwrap().rotation, Rotation::Deg90);

        arena.destroy_all(&[a, InstanceHandle(99)]);
        assert_eq!(arena.len(), 1);
        assert!(arena.get(a).is_none());
    }

    #[test]
    fn test_capacity_and_unknown_archetype() {
        let mut arena = InstanceArena::new()
            .with_capacity_limit(1)
            .with_known_archetypes([ArchetypeId::new("wall")]);

        assert!(matches!(
            arena.spawn_instance(&ArchetypeId::new("bed"), Vec3::ZERO, Rotation::Deg0),
            Err(SpawnError::UnknownArchetype(_))
        ));
        assert!(arena
            .spawn_instance(&ArchetypeId::new("wall"), Vec3::ZERO, Rotation::Deg0)
            .is_ok());
        assert!(matches!(
            arena.spawn_instance(&ArchetypeId::new("wall"), Vec3::ZERO, Rotation::Deg0),
            Err(SpawnError::CapacityExhausted(1))
        ));
    }

    #[test]
    fn test_arena_for_config() {
        let config = DungeonConfig::default();
        let mut arena = InstanceArena::for_config(&config);

        assert!(matches!(
            arena.spawn_instance(&ArchetypeId::new("throne"), Vec3::ZERO, Rotation::Deg0),
            Err(SpawnError::UnknownArchetype(_))
        ));
        assert!(arena
            .spawn_instance(&config.structure.wall, Vec3::ZERO, Rotation::Deg0)
            .is_ok());

        let bed = config.archetype(&ArchetypeId::new("bed")).unwrap();
        let handle = arena
            .spawn_instance(&bed.id, Vec3::new(40.0, 0.0, 40.0), Rotation::Deg0)
            .unwrap();
        let (width, height) = bed.footprint.size;
        assert_eq!(
            arena.get(handle).unwrap().half_extents,
            Some(Vec3::new(width as f32 * 2.0, 2.0, height as f32 * 2.0))
        );
        assert!(arena.query_occupied_volume(
            Vec3::new(40.0, 0.0, 40.0),
            Vec3::new(0.5, 0.5, 0.5),
            Rotation::Deg0
        ));
    }

    #[test]
    fn test_volume_query() {
        let pillar = ArchetypeId::new("pillar");
        let mut arena = InstanceArena::new().with_extents(pillar.clone(), Vec3::new(1.0, 1.0, 3.0));
        arena
            .spawn_instance(&pillar, Vec3::new(10.0, 0.0, 10.0), Rotation::Deg90)
            .unwrap();

        let unit = Vec3::new(0.5, 0.5, 0.5);
        // Rotated, the pillar reaches 3 along x and 1 along z
        assert!(arena.query_occupied_volume(Vec3::new(13.0, 0.0, 10.0), unit, Rotation::Deg0));
        assert!(!arena.query_occupied_volume(Vec3::new(10.0, 0.0, 12.0), unit, Rotation::Deg0));
        assert!(!arena.query_occupied_volume(Vec3::new(20.0, 0.0, 10.0), unit, Rotation::Deg0));
    }
}
