//! Furniture archetypes and room definitions
//!
//! Every piece of furniture is described by an explicit record: how many cells
//! it covers and where in a room it may stand. Room definitions say which
//! furniture goes into which kind of room.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::world::Vec3;

/// Name of something the host knows how to spawn
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchetypeId(String);

impl ArchetypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArchetypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Where in a room a footprint is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    /// Flush against two perpendicular walls
    Corner,
    /// Flush against one wall, clear of the corners
    Wall,
    /// Clear of every wall
    Center,
}

/// Cells a piece of furniture covers and where it may stand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintSpec {
    /// (width, depth) in cells before rotation; depth runs along local forward
    pub size: (i32, i32),
    pub allowed: Vec<LocationKind>,
}

impl FootprintSpec {
    pub fn new(size: (i32, i32), allowed: &[LocationKind]) -> Self {
        Self {
            size,
            allowed: allowed.to_vec(),
        }
    }

    pub fn allows(&self, kind: LocationKind) -> bool {
        self.allowed.contains(&kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureArchetype {
    pub id: ArchetypeId,
    pub footprint: FootprintSpec,
    /// Offset from the footprint center to the model pivot, in cells, local frame
    #[serde(default)]
    pub pivot_offset: Vec3,
}

impl FurnitureArchetype {
    pub fn new(id: &str, size: (i32, i32), allowed: &[LocationKind]) -> Self {
        Self {
            id: ArchetypeId::new(id),
            footprint: FootprintSpec::new(size, allowed),
            pivot_offset: Vec3::ZERO,
        }
    }

    pub fn with_pivot(mut self, pivot_offset: Vec3) -> Self {
        self.pivot_offset = pivot_offset;
        self
    }
}

/// Purpose of a room, which decides its furniture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomKind {
    Starting,
    Bedroom,
    Kitchen,
    Treasure,
    #[default]
    Plain,
}

/// Place between `min_count` and `max_count` of one archetype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnishingRule {
    pub archetype: ArchetypeId,
    pub min_count: u32,
    pub max_count: u32,
}

impl FurnishingRule {
    pub fn new(archetype: &str, min_count: u32, max_count: u32) -> Self {
        Self {
            archetype: ArchetypeId::new(archetype),
            min_count,
            max_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDefinition {
    pub kind: RoomKind,
    /// Rooms that always get this definition, handed out in list order
    #[serde(default)]
    pub guaranteed: u32,
    /// May be picked for rooms left over once guarantees are met
    #[serde(default)]
    pub filler: bool,
    #[serde(default)]
    pub furnishing: Vec<FurnishingRule>,
}

/// Built-in furniture set
pub fn default_archetypes() -> Vec<FurnitureArchetype> {
    use LocationKind::*;

    vec![
        FurnitureArchetype::new("bed", (2, 3), &[Corner]),
        FurnitureArchetype::new("large_treasure_box", (4, 4), &[Corner]),
        FurnitureArchetype::new("small_box", (2, 2), &[Wall])
            .with_pivot(Vec3::new(0.0, 0.0, -0.25)),
        FurnitureArchetype::new("chest", (2, 1), &[Wall]),
        FurnitureArchetype::new("barrel", (1, 1), &[Wall, Corner]),
        FurnitureArchetype::new("bar", (4, 1), &[Wall]),
        FurnitureArchetype::new("long_table", (2, 4), &[Center]),
        FurnitureArchetype::new("coin_stack", (2, 2), &[Center]),
    ]
}

/// Built-in room set
pub fn default_room_set() -> Vec<RoomDefinition> {
    vec![
        RoomDefinition {
            kind: RoomKind::Starting,
            guaranteed: 1,
            filler: false,
            furnishing: vec![FurnishingRule::new("bed", 1, 1)],
        },
        RoomDefinition {
            kind: RoomKind::Treasure,
            guaranteed: 1,
            filler: false,
            furnishing: vec![
                FurnishingRule::new("large_treasure_box", 1, 1),
                FurnishingRule::new("small_box", 0, 3),
                FurnishingRule::new("coin_stack", 0, 5),
            ],
        },
        RoomDefinition {
            kind: RoomKind::Bedroom,
            guaranteed: 0,
            filler: true,
            furnishing: vec![
                FurnishingRule::new("bed", 1, 2),
                FurnishingRule::new("long_table", 0, 1),
                FurnishingRule::new("chest", 0, 3),
            ],
        },
        RoomDefinition {
            kind: RoomKind::Kitchen,
            guaranteed: 0,
            filler: true,
            furnishing: vec![
                FurnishingRule::new("bar", 0, 1),
                FurnishingRule::new("long_table", 0, 2),
                FurnishingRule::new("barrel", 0, 6),
            ],
        },
    ]
}
