//! Ambient vocalization system (idle groans, chase snarls).

use bevy::prelude::*;
use rand::seq::SliceRandom;

use crate::ai::{AmbientVoice, Perception, PerceptionState};
use crate::audio::AudioLayerController;
use crate::components::Enemy;
use crate::config::EnemyConfig;
use crate::DeterministicRng;

/// Система: ambient вокализации
///
/// Idle → idle таймер, Chasing → chase таймер; Alert/Attacking: оба заморожены.
/// На срабатывании: случайный клип из пула как one-shot (пустой пул → тишина,
/// таймер всё равно сбрасывается).
pub fn vocalize(
    mut enemies: Query<(&EnemyConfig, &Perception, &mut AmbientVoice, &mut AudioLayerController), With<Enemy>>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();
    let rng = &mut rng.rng;

    for (config, perception, mut voice, mut audio) in enemies.iter_mut() {
        if !perception.tracking {
            continue;
        }
        voice.sync_ranges(&config.vocalization);

        let (timer, pool) = match perception.current {
            PerceptionState::Idle => (&mut voice.idle, &config.sounds.idle),
            PerceptionState::Chasing => (&mut voice.chase, &config.sounds.chase),
            PerceptionState::Alert | PerceptionState::Attacking => continue,
        };
        if !timer.advance(delta, rng) {
            continue;
        }

        if let Some(clip) = pool.choose(rng) {
            audio.play_one_shot(clip);
        }
    }
}
