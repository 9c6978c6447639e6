//! Animation parameter push (speed, alert, chasing).

use bevy::prelude::*;

use crate::ai::{Perception, PerceptionState};
use crate::components::{AnimationLink, AnimationParams, Enemy, NavigationIntent, NavigationLink};
use crate::config::EnemyConfig;

/// Нормализованная скорость для animator'а
///
/// Enabled NavMesh агент в движении → |velocity| / run speed.
/// Direct steering → requested speed / run speed. Иначе 0.
pub fn normalized_speed(navigation: &NavigationLink, intent: &NavigationIntent, run_speed: f32) -> f32 {
    if run_speed <= 0.0 {
        return 0.0;
    }

    if let Some(agent) = navigation.active_agent() {
        if !agent.is_stopped() {
            return agent.velocity().length() / run_speed;
        }
    }

    if intent.direct && !intent.stopped {
        return intent.speed / run_speed;
    }

    0.0
}

/// Система: push параметров в animator (каждый тик с целью)
pub fn push_animation_params(
    mut enemies: Query<
        (
            &EnemyConfig,
            &Perception,
            &NavigationLink,
            &NavigationIntent,
            &mut AnimationLink,
            &mut AnimationParams,
        ),
        With<Enemy>,
    >,
) {
    for (config, perception, navigation, intent, mut animation, mut params) in enemies.iter_mut() {
        if !perception.tracking {
            continue;
        }

        params.speed = normalized_speed(navigation, intent, config.locomotion.run_speed);
        params.alert = perception.current == PerceptionState::Alert;
        params.chasing = perception.current == PerceptionState::Chasing;

        if let Some(sink) = animation.sink_mut() {
            sink.set_speed(params.speed);
            sink.set_alert(params.alert);
            sink.set_chasing(params.chasing);
        }
    }
}
