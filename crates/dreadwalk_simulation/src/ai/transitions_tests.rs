//! Tests for transition side effects.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use bevy::math::Vec3;

    use crate::ai::transitions::{apply_transition, fade_out_all_music, start_inner_music, start_outer_music, TransitionContext};
    use crate::ai::PerceptionState;
    use crate::audio::{AudioCommand, AudioCommandQueue, AudioLayerController, AudioParam, ClipId, LayerId};
    use crate::components::{AnimationLink, AnimationParams, AnimationSink, NavigationAgent, NavigationLink};
    use crate::config::{EnemyConfig, MusicConfig, SoundBank};

    fn sounds() -> SoundBank {
        SoundBank {
            outer_ambience: Some(ClipId::from("drone")),
            inner_ambience: Some(ClipId::from("heartbeat")),
            idle: vec![ClipId::from("groan")],
            chase: vec![ClipId::from("snarl")],
            attack: Some(ClipId::from("bite")),
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[derive(Default)]
    struct AgentState {
        stopped: bool,
    }

    struct FakeAgent(Arc<Mutex<AgentState>>);

    impl NavigationAgent for FakeAgent {
        fn set_destination(&mut self, _destination: Vec3) {}
        fn set_speed(&mut self, _speed: f32) {}
        fn set_stopping_distance(&mut self, _distance: f32) {}
        fn set_stopped(&mut self, stopped: bool) {
            self.0.lock().unwrap().stopped = stopped;
        }
        fn is_stopped(&self) -> bool {
            self.0.lock().unwrap().stopped
        }
        fn velocity(&self) -> Vec3 {
            Vec3::ZERO
        }
    }

    struct CountingAnimator(Arc<Mutex<u32>>);

    impl AnimationSink for CountingAnimator {
        fn set_speed(&mut self, _speed: f32) {}
        fn set_alert(&mut self, _alert: bool) {}
        fn set_chasing(&mut self, _chasing: bool) {}
        fn trigger_attack(&mut self) {
            *self.0.lock().unwrap() += 1;
        }
    }

    #[test]
    fn test_alert_from_silence_fades_outer_in() {
        let music = MusicConfig::default();
        let mut audio = AudioLayerController::default();

        start_outer_music(&mut audio, &music, &sounds());

        let outer = audio.layer(LayerId::OuterAmbience);
        assert!(outer.playing);
        assert_eq!(outer.clip, Some(ClipId::from("drone")));
        assert_eq!(outer.volume, 0.0);
        assert_eq!(outer.pitch, 1.0);

        for _ in 0..4 {
            audio.advance(0.5);
        }
        assert_close(audio.layer(LayerId::OuterAmbience).volume, 0.7);
    }

    #[test]
    fn test_alert_without_outer_clip_is_noop() {
        let music = MusicConfig::default();
        let mut audio = AudioLayerController::default();
        audio.play(LayerId::InnerAmbience);

        let sounds = SoundBank {
            outer_ambience: None,
            ..sounds()
        };
        start_outer_music(&mut audio, &music, &sounds);

        assert!(audio.is_playing(LayerId::InnerAmbience));
        assert!(!audio.is_playing(LayerId::OuterAmbience));
        assert_eq!(audio.active_tasks(), 0);
    }

    #[test]
    fn test_alert_fades_inner_before_outer_step() {
        let music = MusicConfig::default();
        let mut audio = AudioLayerController::default();
        start_inner_music(&mut audio, &music, &sounds());
        for _ in 0..4 {
            audio.advance(0.5);
        }
        assert_close(audio.layer(LayerId::InnerAmbience).volume, 2.1);
        assert_close(audio.layer(LayerId::OuterAmbience).pitch, 1.3);

        start_outer_music(&mut audio, &music, &sounds());
        assert_eq!(audio.active_fades(LayerId::OuterAmbience, AudioParam::Pitch), 0);

        for _ in 0..4 {
            audio.advance(0.5);
        }
        assert!(!audio.is_playing(LayerId::InnerAmbience));
        // Inner погашен → теперь ramp outer pitch к норме
        assert_eq!(audio.active_fades(LayerId::OuterAmbience, AudioParam::Pitch), 1);

        for _ in 0..4 {
            audio.advance(0.5);
        }
        assert_close(audio.layer(LayerId::OuterAmbience).pitch, 1.0);
        assert!(audio.is_playing(LayerId::OuterAmbience));
    }

    #[test]
    fn test_chasing_from_silence_starts_both_layers() {
        let music = MusicConfig::default();
        let mut audio = AudioLayerController::default();

        start_inner_music(&mut audio, &music, &sounds());

        let outer = audio.layer(LayerId::OuterAmbience);
        assert!(outer.playing);
        assert_close(outer.volume, 0.7);
        let inner = audio.layer(LayerId::InnerAmbience);
        assert!(inner.playing);
        assert_eq!(inner.volume, 0.0);
        assert_eq!(inner.pitch, 1.3);

        for _ in 0..4 {
            audio.advance(0.5);
        }
        assert_close(audio.layer(LayerId::OuterAmbience).pitch, 1.3);
        assert_close(audio.layer(LayerId::InnerAmbience).volume, 2.1);
    }

    #[test]
    fn test_chasing_with_inner_playing_only_ramps_pitch() {
        let music = MusicConfig::default();
        let mut audio = AudioLayerController::default();
        audio.play(LayerId::InnerAmbience);
        audio.set_volume(LayerId::InnerAmbience, 1.0);

        start_inner_music(&mut audio, &music, &sounds());

        assert_eq!(audio.active_fades(LayerId::InnerAmbience, AudioParam::Pitch), 1);
        assert_eq!(audio.active_fades(LayerId::InnerAmbience, AudioParam::Volume), 0);
        assert_eq!(audio.layer(LayerId::InnerAmbience).volume, 1.0);
    }

    #[test]
    fn test_idle_fade_out_stops_after_duration() {
        let music = MusicConfig::default();
        let mut audio = AudioLayerController::default();
        start_inner_music(&mut audio, &music, &sounds());
        for _ in 0..4 {
            audio.advance(0.5);
        }

        fade_out_all_music(&mut audio, &music);

        for _ in 0..3 {
            audio.advance(0.5);
            assert!(audio.is_playing(LayerId::OuterAmbience));
        }
        audio.advance(0.5);

        for layer in LayerId::AMBIENCE {
            assert!(!audio.is_playing(layer));
            assert_eq!(audio.layer(layer).pitch, 1.0);
            assert_eq!(audio.layer(layer).volume, 0.0);
        }
    }

    #[test]
    fn test_idle_with_silent_layers_still_schedules_stop() {
        let music = MusicConfig::default();
        let mut audio = AudioLayerController::default();

        fade_out_all_music(&mut audio, &music);

        assert_eq!(audio.active_fades(LayerId::OuterAmbience, AudioParam::Volume), 0);
        assert_eq!(audio.active_tasks(), 1);
    }

    #[test]
    fn test_attacking_fires_cue_and_one_shot() {
        let queue = AudioCommandQueue::new();
        let mut audio = AudioLayerController::with_sink(queue.sink());
        let cues = Arc::new(Mutex::new(0));
        let mut animation = AnimationLink::new(CountingAnimator(cues.clone()));
        let mut params = AnimationParams::default();
        let mut navigation = NavigationLink::none();
        let config = EnemyConfig {
            sounds: sounds(),
            ..Default::default()
        };

        apply_transition(
            PerceptionState::Attacking,
            TransitionContext {
                config: &config,
                audio: &mut audio,
                navigation: &mut navigation,
                animation: &mut animation,
                animation_params: &mut params,
            },
        );

        assert_eq!(*cues.lock().unwrap(), 1);
        assert_eq!(params.attack_cues, 1);
        assert_eq!(
            queue.drain(),
            vec![AudioCommand::PlayOneShot {
                layer: LayerId::Effects,
                clip: ClipId::from("bite")
            }]
        );
    }

    #[test]
    fn test_chasing_resumes_and_alert_halts_navigation() {
        let state = Arc::new(Mutex::new(AgentState { stopped: true }));
        let mut navigation = NavigationLink::new(FakeAgent(state.clone()));
        let mut audio = AudioLayerController::default();
        let mut animation = AnimationLink::default();
        let mut params = AnimationParams::default();
        let config = EnemyConfig::default();

        apply_transition(
            PerceptionState::Chasing,
            TransitionContext {
                config: &config,
                audio: &mut audio,
                navigation: &mut navigation,
                animation: &mut animation,
                animation_params: &mut params,
            },
        );
        assert!(!state.lock().unwrap().stopped);

        apply_transition(
            PerceptionState::Alert,
            TransitionContext {
                config: &config,
                audio: &mut audio,
                navigation: &mut navigation,
                animation: &mut animation,
                animation_params: &mut params,
            },
        );
        assert!(state.lock().unwrap().stopped);
    }
}
