//! Delvegrid - grid-based dungeon layout generator
//!
//! Partitions a rectangle into rooms, walls them in, connects them with
//! corridors and furnishes them, then hands every piece to a host spawner.

pub mod config;
pub mod error;
pub mod generator;
pub mod interior;
pub mod spawn;
pub mod world;

// Re-export commonly used types
pub use config::DungeonConfig;
pub use error::{ConfigError, GenerationError, SpawnError};
pub use generator::{DungeonGenerator, GenerationReport, GeneratorState};
pub use spawn::{InstanceArena, InstanceHandle, Spawner};
pub use world::generation::DungeonLayout;
