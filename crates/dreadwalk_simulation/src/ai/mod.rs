//! Enemy AI module
//!
//! Perception FSM по вложенным радиусам (Idle → Alert → Chasing → Attacking),
//! на каждый state: locomotion, ambience music layers и ambient вокализации.

use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;
pub mod transitions;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod transitions_tests;

// Re-export основных типов
pub use components::{AmbientVoice, Perception, PerceptionState};
pub use events::PerceptionChanged;
pub use transitions::{apply_transition, TransitionContext};

use crate::audio::advance_audio_layers;

/// Все enemy AI системы одного тика (для ordering внешних observers)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnemyAiSet;

/// Enemy AI Plugin
///
/// Порядок выполнения внутри тика (`.chain()`):
/// 1. prepare_enemies: init audio pitch, NavMesh агента, supersede флага
/// 2. acquire_targets: поиск цели по tag
/// 3. perceive_targets: дистанция → state, transition side effects, PerceptionChanged
/// 4. steer_towards_targets: поворот и pursuit
/// 5. vocalize: ambient one-shots
/// 6. advance_audio_layers: resume fade/delay tasks (новые ramps резюмятся уже в этом тике)
/// 7. push_animation_params: speed/alert/chasing в animator
pub struct EnemyAiPlugin {
    schedule: InternedScheduleLabel,
}

impl EnemyAiPlugin {
    /// Плагин в произвольном schedule (например `Update` для frame-driven хоста)
    pub fn in_schedule(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for EnemyAiPlugin {
    fn default() -> Self {
        Self::in_schedule(FixedUpdate)
    }
}

impl Plugin for EnemyAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PerceptionChanged>()
            .register_type::<crate::components::Enemy>()
            .register_type::<crate::config::EnemyConfig>()
            .register_type::<Perception>()
            .add_systems(
                self.schedule,
                (
                    systems::prepare_enemies,
                    systems::acquire_targets,
                    systems::perceive_targets,
                    systems::steer_towards_targets,
                    systems::vocalize,
                    advance_audio_layers,
                    systems::push_animation_params,
                )
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(EnemyAiSet),
            );
    }
}
