//! Transition side effects (one-shot, выполняются в тике смены state)
//!
//! Музыка:
//! - Idle: fade-out играющих ambience слоёв, через transition_duration полный stop + pitch reset
//! - Alert: inner гасится (fade → stop), затем outer на нормальном pitch
//! - Chasing: outer ускоряется, inner поднимается до volume × multiplier
//! - Attacking: attack cue + one-shot, музыка не меняется
//!
//! Все ramps fire-and-forget: следующий transition их НЕ отменяет (см. `supersede_fades`).

use crate::ai::PerceptionState;
use crate::audio::{AudioLayerController, AudioParam, FadeTask, LayerCommand, LayerId};
use crate::components::{AnimationLink, AnimationParams, NavigationLink};
use crate::config::{EnemyConfig, MusicConfig, SoundBank};

/// Всё, что меняет transition (по ссылкам из ECS query)
pub struct TransitionContext<'a> {
    pub config: &'a EnemyConfig,
    pub audio: &'a mut AudioLayerController,
    pub navigation: &'a mut NavigationLink,
    pub animation: &'a mut AnimationLink,
    pub animation_params: &'a mut AnimationParams,
}

/// Side effects входа в `to`
pub fn apply_transition(to: PerceptionState, ctx: TransitionContext<'_>) {
    match to {
        PerceptionState::Idle => {
            ctx.navigation.halt();
            fade_out_all_music(ctx.audio, &ctx.config.music);
        }
        PerceptionState::Alert => {
            ctx.navigation.halt();
            start_outer_music(ctx.audio, &ctx.config.music, &ctx.config.sounds);
        }
        PerceptionState::Chasing => {
            start_inner_music(ctx.audio, &ctx.config.music, &ctx.config.sounds);
            ctx.navigation.resume();
        }
        PerceptionState::Attacking => {
            ctx.animation_params.attack_cues += 1;
            if let Some(sink) = ctx.animation.sink_mut() {
                sink.trigger_attack();
            }
            if let Some(clip) = &ctx.config.sounds.attack {
                ctx.audio.play_one_shot(clip);
            }
        }
    }
}

/// Alert: outer ambience на нормальном pitch
///
/// Без outer клипа: no-op целиком (inner тоже не трогаем).
/// Если играет inner: сначала гасим его, outer шаг выполняется после stop.
pub fn start_outer_music(audio: &mut AudioLayerController, music: &MusicConfig, sounds: &SoundBank) {
    let Some(outer_clip) = sounds.outer_ambience.clone() else {
        return;
    };
    let duration = music.transition_duration;

    // Outer шаг выбирается сейчас, выполняется сразу или после fade-out inner
    let outer_step = if audio.is_playing(LayerId::OuterAmbience) {
        vec![LayerCommand::Fade {
            layer: LayerId::OuterAmbience,
            param: AudioParam::Pitch,
            to: music.normal_pitch,
            duration,
        }]
    } else {
        vec![
            LayerCommand::Play {
                layer: LayerId::OuterAmbience,
                clip: outer_clip,
                volume: 0.0,
                pitch: music.normal_pitch,
            },
            LayerCommand::Fade {
                layer: LayerId::OuterAmbience,
                param: AudioParam::Volume,
                to: music.volume,
                duration,
            },
        ]
    };

    if audio.is_playing(LayerId::InnerAmbience) {
        let from = audio.layer(LayerId::InnerAmbience).volume;
        let fade_inner = FadeTask::volume(LayerId::InnerAmbience, from, 0.0, duration)
            .then(std::iter::once(LayerCommand::Stop(LayerId::InnerAmbience)).chain(outer_step));
        audio.start_fade(fade_inner);
    } else {
        for command in outer_step {
            audio.execute(command);
        }
    }
}

/// Chasing: outer (стартует если молчит) ускоряется, inner поднимается поверх
pub fn start_inner_music(audio: &mut AudioLayerController, music: &MusicConfig, sounds: &SoundBank) {
    let duration = music.transition_duration;

    if !audio.is_playing(LayerId::OuterAmbience) {
        if let Some(clip) = sounds.outer_ambience.clone() {
            audio.execute(LayerCommand::Play {
                layer: LayerId::OuterAmbience,
                clip,
                volume: music.volume,
                pitch: music.normal_pitch,
            });
        }
    }

    let outer_pitch = audio.layer(LayerId::OuterAmbience).pitch;
    audio.fade_pitch(LayerId::OuterAmbience, outer_pitch, music.fast_pitch, duration);

    if audio.is_playing(LayerId::InnerAmbience) {
        let inner_pitch = audio.layer(LayerId::InnerAmbience).pitch;
        audio.fade_pitch(LayerId::InnerAmbience, inner_pitch, music.fast_pitch, duration);
    } else if let Some(clip) = sounds.inner_ambience.clone() {
        audio.execute(LayerCommand::Play {
            layer: LayerId::InnerAmbience,
            clip,
            volume: 0.0,
            pitch: music.fast_pitch,
        });
        audio.fade_volume(LayerId::InnerAmbience, 0.0, music.inner_volume(), duration);
    }
}

/// Idle: fade-out играющих слоёв, затем stop обоих + pitch reset
pub fn fade_out_all_music(audio: &mut AudioLayerController, music: &MusicConfig) {
    let duration = music.transition_duration;

    for layer in LayerId::AMBIENCE {
        if audio.is_playing(layer) {
            let from = audio.layer(layer).volume;
            audio.fade_volume(layer, from, 0.0, duration);
        }
    }

    audio.schedule(
        duration,
        [LayerCommand::StopAll {
            pitch: music.normal_pitch,
        }],
    );
}
