//! Perception FSM systems (enemy setup, distance → state, transition side effects).

use bevy::prelude::*;

use crate::ai::transitions::{apply_transition, TransitionContext};
use crate::ai::{Perception, PerceptionChanged};
use crate::audio::{AudioLayerController, LayerId};
use crate::components::{AnimationLink, AnimationParams, Enemy, NavigationLink, TargetLink};
use crate::config::EnemyConfig;

/// Система: подготовка врага
///
/// - Спавн: оба ambience слоя на нормальном pitch
/// - Изменение конфига: supersede флаг controller'а
/// - NavMesh агент: walk speed, stopping distance = attack range, stopped (один раз)
pub fn prepare_enemies(
    mut enemies: Query<(Ref<EnemyConfig>, &mut AudioLayerController, &mut NavigationLink), With<Enemy>>,
) {
    for (config, mut audio, mut navigation) in enemies.iter_mut() {
        if config.is_added() {
            for layer in LayerId::AMBIENCE {
                audio.set_pitch(layer, config.music.normal_pitch);
            }
        }
        if config.is_changed() {
            audio.set_supersede_fades(config.music.supersede_fades);
        }

        navigation.ensure_initialized(&config.locomotion, config.detection.attack_range);
    }
}

/// Система: perception + transitions
///
/// Дистанция до цели (3D, включая вертикаль) → PerceptionState.
/// При смене state: side effects нового state, затем PerceptionChanged.
/// Без цели state заморожен, side effects нет.
pub fn perceive_targets(
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &TargetLink,
            &EnemyConfig,
            &mut Perception,
            &mut AudioLayerController,
            &mut NavigationLink,
            &mut AnimationLink,
            &mut AnimationParams,
        ),
        With<Enemy>,
    >,
    targets: Query<&Transform, Without<Enemy>>,
    mut transitions: EventWriter<PerceptionChanged>,
) {
    for (entity, transform, link, config, mut perception, mut audio, mut navigation, mut animation, mut params) in
        enemies.iter_mut()
    {
        let Some(target_transform) = link.entity.and_then(|target| targets.get(target).ok()) else {
            if perception.tracking {
                perception.lose_track();
            }
            continue;
        };

        let distance = transform.translation.distance(target_transform.translation);
        let Some((from, to)) = perception.observe(distance, &config.detection) else {
            continue;
        };

        crate::log(&format!(
            "🧟 Enemy {:?}: {} → {} (distance {:.2})",
            entity, from, to, distance
        ));

        apply_transition(
            to,
            TransitionContext {
                config,
                audio: &mut audio,
                navigation: &mut navigation,
                animation: &mut animation,
                animation_params: &mut params,
            },
        );

        transitions.write(PerceptionChanged {
            entity,
            from,
            to,
            distance,
        });
    }
}
