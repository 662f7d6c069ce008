//! Error types
//!
//! Configuration problems fail fast before any generation state changes.
//! Spawn failures abort a generation run and roll it back.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{ArchetypeId, RoomKind};

/// Invalid or unreadable dungeon configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("dungeon size must be at least 1x1, got {width}x{height}")]
    ZeroDungeonSize { width: i32, height: i32 },

    #[error("dungeon {width}x{height} exceeds the limit of {max_cells} cells")]
    DungeonTooLarge {
        width: i32,
        height: i32,
        max_cells: i64,
    },

    #[error("minimum room size must be at least 1x1, got {width}x{height}")]
    InvalidRoomMinimum { width: i32, height: i32 },

    #[error("room padding must leave room for walls on both sides (>= 2), got {0}")]
    InvalidPadding(i32),

    #[error("dungeon {width}x{height} cannot hold a single {needed_width}x{needed_height} padded room")]
    DungeonTooSmall {
        width: i32,
        height: i32,
        needed_width: i32,
        needed_height: i32,
    },

    #[error("corridor width must be at least 1 and fit in the dungeon, got {0}")]
    InvalidCorridorWidth(i32),

    #[error("cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f32),

    #[error("placement attempt ceiling must be at least 1")]
    ZeroAttemptCeiling,

    #[error("archetype id must not be empty")]
    EmptyArchetypeId,

    #[error("archetype '{0}' is defined more than once")]
    DuplicateArchetype(ArchetypeId),

    #[error("archetype '{archetype}' has an empty footprint {width}x{height}")]
    EmptyFootprint {
        archetype: ArchetypeId,
        width: i32,
        height: i32,
    },

    #[error("archetype '{0}' does not allow any placement location")]
    NoAllowedLocations(ArchetypeId),

    #[error("{room:?} room references unknown archetype '{archetype}'")]
    UnknownArchetype { room: RoomKind, archetype: ArchetypeId },

    #[error("{room:?} room asks for {min}..={max} '{archetype}'")]
    InvalidCountRange {
        room: RoomKind,
        archetype: ArchetypeId,
        min: u32,
        max: u32,
    },

    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

/// Failure reported by a host spawner
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("unknown archetype '{0}'")]
    UnknownArchetype(ArchetypeId),

    #[error("spawn capacity of {0} instances exhausted")]
    CapacityExhausted(usize),

    #[error("host error: {0}")]
    Host(String),
}

/// Failure of a whole generation run
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn '{archetype}': {source}")]
    Spawn {
        archetype: ArchetypeId,
        #[source]
        source: SpawnError,
    },
}
