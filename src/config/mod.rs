//! Configuration
//!
//! Dungeon settings, furniture archetypes and room definitions, loadable from RON.

pub mod archetypes;
pub mod settings;

pub use archetypes::{
    default_archetypes, default_room_set, ArchetypeId, FootprintSpec, FurnishingRule,
    FurnitureArchetype, LocationKind, RoomDefinition, RoomKind,
};
pub use settings::{
    DungeonConfig, LayoutConfig, PlacementConfig, PlacementMode, StructureArchetypes,
    MAX_DUNGEON_CELLS,
};
