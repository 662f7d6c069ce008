//! Dungeon generator
//!
//! Owns the configuration, the random source and everything one generation
//! run spawned, so the run can be replaced or removed as a whole.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::{ArchetypeId, DungeonConfig};
use crate::error::{ConfigError, GenerationError};
use crate::interior::{furnish_layout, Furnishing, OccupiedProbe, PlacementShortfall};
use crate::spawn::{InstanceHandle, Spawner};
use crate::world::generation::{generate_layout, DungeonLayout};
use crate::world::{cell_to_world_center, Rotation, Vec3};

/// Lifecycle of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeneratorState {
    #[default]
    Idle,
    Generating,
    Generated,
    Deleting,
}

/// Summary of a finished generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub rooms: usize,
    pub corridors: usize,
    pub walls: usize,
    pub corners: usize,
    pub corridor_pieces: usize,
    pub furniture: usize,
    pub shortfalls: Vec<PlacementShortfall>,
}

impl GenerationReport {
    /// Instances spawned in the run
    pub fn spawned(&self) -> usize {
        self.walls + self.corners + self.corridor_pieces + self.furniture
    }
}

pub struct DungeonGenerator<S: Spawner> {
    config: DungeonConfig,
    spawner: S,
    seed: u64,
    rng: StdRng,
    state: GeneratorState,
    layout: Option<DungeonLayout>,
    furnishing: Furnishing,
    report: Option<GenerationReport>,
    spawned: Vec<InstanceHandle>,
}

impl<S: Spawner> DungeonGenerator<S> {
    /// Validate the config and seed the random source from it
    pub fn new(config: DungeonConfig, spawner: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            config,
            spawner,
            seed,
            rng: StdRng::seed_from_u64(seed),
            state: GeneratorState::Idle,
            layout: None,
            furnishing: Furnishing::default(),
            report: None,
            spawned: Vec::new(),
        })
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn layout(&self) -> Option<&DungeonLayout> {
        self.layout.as_ref()
    }

    pub fn furnishing(&self) -> &Furnishing {
        &self.furnishing
    }

    pub fn report(&self) -> Option<&GenerationReport> {
        self.report.as_ref()
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Handles of everything the current generation spawned
    pub fn spawned_handles(&self) -> &[InstanceHandle] {
        &self.spawned
    }

    fn set_state(&mut self, state: GeneratorState) {
        log::debug!("Generator state: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Plan a new dungeon and spawn it, replacing any previous one
    ///
    /// If the host fails to spawn anything, every instance of this run is
    /// destroyed again and the generator is left idle.
    pub fn generate(&mut self) -> Result<GenerationReport, GenerationError> {
        if self.state == GeneratorState::Generated {
            self.delete_generation();
        }
        self.set_state(GeneratorState::Generating);

        let mut layout = generate_layout(&mut self.rng, &self.config.layout);

        let query = |center: Vec3, half_extents: Vec3, rotation: Rotation| {
            self.spawner.query_occupied_volume(center, half_extents, rotation)
        };
        let probe: Option<OccupiedProbe<'_>> = if self.config.placement.live_collision_checks {
            Some(&query)
        } else {
            None
        };
        let furnishing = furnish_layout(&mut self.rng, &mut layout, &self.config, probe);

        let mut report = GenerationReport {
            seed: self.seed,
            rooms: layout.rooms.len(),
            corridors: layout.corridors.len(),
            shortfalls: furnishing.shortfalls.clone(),
            ..GenerationReport::default()
        };
        let mut spawned = Vec::new();

        let result = spawn_dungeon(
            &mut self.spawner,
            &self.config,
            &layout,
            &furnishing,
            &mut spawned,
            &mut report,
        );
        if let Err(e) = result {
            log::warn!("Generation failed, removing {} spawned instances: {}", spawned.len(), e);
            self.spawner.destroy_all(&spawned);
            self.set_state(GeneratorState::Idle);
            return Err(e);
        }

        log::info!(
            "Generated dungeon (seed {}): {} rooms, {} corridors, {} instances",
            self.seed,
            report.rooms,
            report.corridors,
            spawned.len()
        );

        self.layout = Some(layout);
        self.furnishing = furnishing;
        self.spawned = spawned;
        self.report = Some(report.clone());
        self.set_state(GeneratorState::Generated);
        Ok(report)
    }

    /// Destroy everything the last generation spawned. Does nothing when idle.
    pub fn delete_generation(&mut self) {
        if self.state == GeneratorState::Idle {
            return;
        }
        self.set_state(GeneratorState::Deleting);

        let handles = std::mem::take(&mut self.spawned);
        self.spawner.destroy_all(&handles);
        self.layout = None;
        self.furnishing = Furnishing::default();
        self.report = None;

        log::info!("Deleted dungeon ({} instances)", handles.len());
        self.set_state(GeneratorState::Idle);
    }

    /// Swap in a new config, re-seed from it and generate again
    ///
    /// An invalid config is rejected before the current dungeon is touched.
    pub fn regenerate(&mut self, config: DungeonConfig) -> Result<GenerationReport, GenerationError> {
        config.validate()?;
        self.seed = config.seed.unwrap_or_else(rand::random);
        self.rng = StdRng::seed_from_u64(self.seed);
        self.config = config;
        self.generate()
    }
}

/// Spawn walls, corners, corridor floors and furniture, recording every handle
fn spawn_dungeon<S: Spawner>(
    spawner: &mut S,
    config: &DungeonConfig,
    layout: &DungeonLayout,
    furnishing: &Furnishing,
    spawned: &mut Vec<InstanceHandle>,
    report: &mut GenerationReport,
) -> Result<(), GenerationError> {
    let mut spawn = |archetype: &ArchetypeId, position: Vec3, rotation: Rotation| {
        spawner
            .spawn_instance(archetype, position, rotation)
            .map(|handle| spawned.push(handle))
            .map_err(|source| GenerationError::Spawn {
                archetype: archetype.clone(),
                source,
            })
    };

    let s = config.cell_size;
    for (x, z, tag) in layout.grid.iter() {
        let position = cell_to_world_center(x, z, s);
        if tag.is_wall() {
            spawn(&config.structure.wall, position, tag.facing())?;
            report.walls += 1;
        } else if tag.is_corner() {
            spawn(&config.structure.corner, position, tag.facing())?;
            report.corners += 1;
        } else if tag.is_corridor() {
            if let Some(corridor) = &config.structure.corridor {
                spawn(corridor, position, Rotation::Deg0)?;
                report.corridor_pieces += 1;
            }
        }
    }

    for placement in &furnishing.placements {
        spawn(
            &placement.archetype,
            placement.transform.position,
            placement.transform.rotation,
        )?;
        report.furniture += 1;
    }

    Ok(())
}
