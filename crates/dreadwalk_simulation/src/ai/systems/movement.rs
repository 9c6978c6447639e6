//! AI locomotion systems (facing, pursuit, direct steering fallback).

use bevy::prelude::*;

use crate::ai::{Perception, PerceptionState};
use crate::components::{Enemy, NavigationIntent, NavigationLink, TargetLink};
use crate::config::EnemyConfig;

/// Yaw-only поворот к точке (slerp factor `speed * delta`, clamp до 1)
///
/// Вертикальная разница игнорируется, совпадение по XZ: поворота нет.
pub fn face_towards(transform: &mut Transform, target: Vec3, speed: f32, delta: f32) {
    let mut direction = target - transform.translation;
    direction.y = 0.0;
    let Some(direction) = direction.try_normalize() else {
        return;
    };

    // Bevy forward = -Z
    let desired = Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z));
    let t = (speed * delta).clamp(0.0, 1.0);
    transform.rotation = transform.rotation.slerp(desired, t);
}

/// Direct steering: шаг к цели по плоскости земли (без overshoot)
pub fn step_towards(transform: &mut Transform, target: Vec3, speed: f32, delta: f32) {
    let mut offset = target - transform.translation;
    offset.y = 0.0;
    let remaining = offset.length();
    let Some(direction) = offset.try_normalize() else {
        return;
    };

    let step = (speed * delta).max(0.0).min(remaining);
    transform.translation += direction * step;
}

/// Система: per-state locomotion
///
/// - Chasing: поворот к цели + pursuit (NavMesh агент или direct steering)
/// - Attacking: поворот с удвоенной скоростью, навигация остановлена
/// - Idle/Alert: стоим
pub fn steer_towards_targets(
    mut enemies: Query<
        (
            &mut Transform,
            &TargetLink,
            &EnemyConfig,
            &Perception,
            &mut NavigationLink,
            &mut NavigationIntent,
        ),
        With<Enemy>,
    >,
    targets: Query<&Transform, Without<Enemy>>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut transform, link, config, perception, mut navigation, mut intent) in enemies.iter_mut() {
        if !perception.tracking {
            continue;
        }
        let Some(target) = link.entity.and_then(|target| targets.get(target).ok()) else {
            continue;
        };
        let target_position = target.translation;
        let locomotion = &config.locomotion;

        match perception.current {
            PerceptionState::Chasing => {
                face_towards(&mut transform, target_position, locomotion.rotation_speed, delta);

                let speed = locomotion.speed_for_distance(perception.distance);
                if let Some(agent) = navigation.active_agent_mut() {
                    agent.set_destination(target_position);
                    agent.set_speed(speed);
                    *intent = NavigationIntent::pursue(target_position, speed, false);
                } else {
                    step_towards(&mut transform, target_position, speed, delta);
                    *intent = NavigationIntent::pursue(target_position, speed, true);
                }
            }
            PerceptionState::Attacking => {
                face_towards(&mut transform, target_position, locomotion.rotation_speed * 2.0, delta);
                navigation.halt();
                *intent = NavigationIntent::hold();
            }
            PerceptionState::Idle | PerceptionState::Alert => {
                if !intent.stopped {
                    *intent = NavigationIntent::hold();
                }
            }
        }
    }
}
