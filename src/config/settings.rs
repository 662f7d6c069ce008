//! Dungeon configuration
//!
//! Loaded from RON files, with every field defaulted so partial files work.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::archetypes::{
    default_archetypes, default_room_set, ArchetypeId, FurnitureArchetype, RoomDefinition,
    RoomKind,
};
use crate::error::ConfigError;

/// Largest grid the generator will allocate, in cells
pub const MAX_DUNGEON_CELLS: i64 = 1 << 24;

/// Grid dimensions and room/corridor sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Dungeon extent in cells along x
    pub width: i32,
    /// Dungeon extent in cells along z
    pub height: i32,
    /// Smallest usable interior of a room
    pub min_room_width: i32,
    pub min_room_height: i32,
    /// Cells added to the room minimum before partitioning (the two walls)
    pub padding: i32,
    pub corridor_width: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            min_room_width: 8,
            min_room_height: 8,
            padding: 2,
            corridor_width: 2,
        }
    }
}

impl LayoutConfig {
    /// Minimum leaf size handed to the partitioner
    pub fn partition_minimum(&self) -> (i32, i32) {
        (
            self.min_room_width.saturating_add(self.padding),
            self.min_room_height.saturating_add(self.padding),
        )
    }
}

/// How furniture anchors are searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlacementMode {
    /// Enumerate every candidate, shuffle, take the first valid ones
    #[default]
    Enumerate,
    /// Random corner/wall/center attempts up to the attempt ceiling
    RandomRetry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub mode: PlacementMode,
    /// Attempts per item in `RandomRetry` mode
    pub max_attempts: u32,
    /// Reject placements that would cut a room's free floor in two
    pub keep_rooms_traversable: bool,
    /// Ask the host whether a placement volume is already taken
    pub live_collision_checks: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            mode: PlacementMode::Enumerate,
            max_attempts: 500,
            keep_rooms_traversable: true,
            live_collision_checks: false,
        }
    }
}

/// Archetypes used for the dungeon shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureArchetypes {
    pub wall: ArchetypeId,
    pub corner: ArchetypeId,
    /// Corridor floor pieces; `None` spawns nothing for corridor cells
    pub corridor: Option<ArchetypeId>,
}

impl Default for StructureArchetypes {
    fn default() -> Self {
        Self {
            wall: ArchetypeId::new("wall"),
            corner: ArchetypeId::new("corner"),
            corridor: Some(ArchetypeId::new("corridor")),
        }
    }
}

/// Everything a generation run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Fixed seed for reproducible dungeons; `None` draws one from entropy
    pub seed: Option<u64>,
    /// World units per cell
    pub cell_size: f32,
    pub layout: LayoutConfig,
    pub placement: PlacementConfig,
    pub structure: StructureArchetypes,
    pub archetypes: Vec<FurnitureArchetype>,
    pub rooms: Vec<RoomDefinition>,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            seed: None,
            cell_size: 4.0,
            layout: LayoutConfig::default(),
            placement: PlacementConfig::default(),
            structure: StructureArchetypes::default(),
            archetypes: default_archetypes(),
            rooms: default_room_set(),
        }
    }
}

impl DungeonConfig {
    /// Load and validate a RON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&content)?;
        log::info!("Loaded dungeon config from {}", path.display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it is missing or broken
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{}. Using default dungeon config.", e);
            Self::default()
        })
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            ron::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Write this config as pretty RON, creating parent directories
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, self.to_ron_string()?).map_err(io_error)
    }

    pub fn archetype(&self, id: &ArchetypeId) -> Option<&FurnitureArchetype> {
        self.archetypes.iter().find(|a| &a.id == id)
    }

    pub fn room_definition(&self, kind: RoomKind) -> Option<&RoomDefinition> {
        self.rooms.iter().find(|r| r.kind == kind)
    }

    /// Check every constraint generation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;

        if layout.width < 1 || layout.height < 1 {
            return Err(ConfigError::ZeroDungeonSize {
                width: layout.width,
                height: layout.height,
            });
        }
        let cells = i64::from(layout.width) * i64::from(layout.height);
        if cells > MAX_DUNGEON_CELLS {
            return Err(ConfigError::DungeonTooLarge {
                width: layout.width,
                height: layout.height,
                max_cells: MAX_DUNGEON_CELLS,
            });
        }
        if layout.min_room_width < 1 || layout.min_room_height < 1 {
            return Err(ConfigError::InvalidRoomMinimum {
                width: layout.min_room_width,
                height: layout.min_room_height,
            });
        }
        if layout.padding < 2 {
            return Err(ConfigError::InvalidPadding(layout.padding));
        }
        let (needed_width, needed_height) = layout.partition_minimum();
        if layout.width < needed_width || layout.height < needed_height {
            return Err(ConfigError::DungeonTooSmall {
                width: layout.width,
                height: layout.height,
                needed_width,
                needed_height,
            });
        }
        if layout.corridor_width < 1 || layout.corridor_width > layout.width.max(layout.height) {
            return Err(ConfigError::InvalidCorridorWidth(layout.corridor_width));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.placement.max_attempts == 0 {
            return Err(ConfigError::ZeroAttemptCeiling);
        }

        let structure = [
            Some(&self.structure.wall),
            Some(&self.structure.corner),
            self.structure.corridor.as_ref(),
        ];
        if structure.into_iter().flatten().any(|id| id.as_str().is_empty()) {
            return Err(ConfigError::EmptyArchetypeId);
        }

        let mut seen = HashSet::new();
        for archetype in &self.archetypes {
            if archetype.id.as_str().is_empty() {
                return Err(ConfigError::EmptyArchetypeId);
            }
            if !seen.insert(&archetype.id) {
                return Err(ConfigError::DuplicateArchetype(archetype.id.clone()));
            }
            let (width, height) = archetype.footprint.size;
            if width < 1 || height < 1 {
                return Err(ConfigError::EmptyFootprint {
                    archetype: archetype.id.clone(),
                    width,
                    height,
                });
            }
            if archetype.footprint.allowed.is_empty() {
                return Err(ConfigError::NoAllowedLocations(archetype.id.clone()));
            }
        }

        for room in &self.rooms {
            for rule in &room.furnishing {
                if self.archetype(&rule.archetype).is_none() {
                    return Err(ConfigError::UnknownArchetype {
                        room: room.kind,
                        archetype: rule.archetype.clone(),
                    });
                }
                if rule.min_count > rule.max_count {
                    return Err(ConfigError::InvalidCountRange {
                        room: room.kind,
                        archetype: rule.archetype.clone(),
                        min: rule.min_count,
                        max: rule.max_count,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FurnishingRule;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DungeonConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = DungeonConfig::from_ron_str(include_str!("../../assets/dungeon.ron"))
            .expect("bundled config must be valid");
        assert_eq!(config.layout, LayoutConfig::default());
        assert!(config.archetype(&ArchetypeId::new("bed")).is_some());
        assert!(config.room_definition(RoomKind::Treasure).is_some());
    }

    #[test]
    fn test_ron_round_trip() {
        let config = DungeonConfig {
            seed: Some(99),
            ..DungeonConfig::default()
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(DungeonConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = DungeonConfig::from_ron_str("(seed: Some(3), layout: (width: 60))").unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.layout.width, 60);
        assert_eq!(config.layout.height, 40);
        assert_eq!(config.archetypes, default_archetypes());
    }

    #[test]
    fn test_rejects_zero_minimum() {
        let mut config = DungeonConfig::default();
        config.layout.min_room_width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRoomMinimum { .. })
        ));
    }

    #[test]
    fn test_rejects_dungeon_smaller_than_room() {
        let mut config = DungeonConfig::default();
        config.layout.width = 9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DungeonTooSmall { needed_width: 10, .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_dungeon() {
        let mut config = DungeonConfig::default();
        config.layout.width = 50_000;
        config.layout.height = 50_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DungeonTooLarge { width: 50_000, .. })
        ));

        // Exactly at the cap
        config.layout.width = 4096;
        config.layout.height = 4096;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_padding_does_not_overflow() {
        let mut config = DungeonConfig::default();
        config.layout.padding = i32::MAX;
        assert_eq!(config.layout.partition_minimum(), (i32::MAX, i32::MAX));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DungeonTooSmall { .. })
        ));

        let mut config = DungeonConfig::default();
        config.layout.corridor_width = i32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCorridorWidth(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_archetype() {
        let mut config = DungeonConfig::default();
        config.rooms[0].furnishing.push(FurnishingRule::new("throne", 1, 1));
        match config.validate() {
            Err(ConfigError::UnknownArchetype { archetype, .. }) => {
                assert_eq!(archetype.as_str(), "throne")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rejects_duplicate_and_empty_footprints() {
        let mut config = DungeonConfig::default();
        config.archetypes.push(config.archetypes[0].clone());
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateArchetype(_))));

        let mut config = DungeonConfig::default();
        config.archetypes[0].footprint.size = (0, 2);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyFootprint { .. })));

        let mut config = DungeonConfig::default();
        config.archetypes[0].footprint.allowed.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoAllowedLocations(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = DungeonConfig::load_or_default("does/not/exist.ron");
        assert_eq!(config, DungeonConfig::default());
    }
}
