//! DREADWALK Simulation Core
//!
//! Enemy AI controller на Bevy 0.16 (headless ECS)
//!
//! Граница с движком хоста:
//! - ECS = perception FSM, locomotion intent, music layers, вокализации
//! - Хост = рендер, pathfinding (NavigationAgent), mixing (AudioSink), animator (AnimationSink)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod audio;
pub mod components;
pub mod config;
pub mod debug;
pub mod logger;
pub mod timer;

// Re-export базовых типов для удобства
pub use ai::{EnemyAiPlugin, EnemyAiSet, Perception, PerceptionChanged, PerceptionState};
pub use audio::{AudioLayerController, AudioSink, ClipId, LayerId};
pub use components::*;
pub use config::{ConfigError, EnemyConfig};
pub use debug::{DebugRings, DebugRingsPlugin};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};

/// Главный plugin симуляции (fixed tick + RNG + enemy AI)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seeded RNG из create_headless_app не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins(EnemyAiPlugin::default());
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Единственный источник случайности: интервалы и выбор клипов вокализаций.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot компонента по всем entity (сравнение прогонов на детерминизм)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
