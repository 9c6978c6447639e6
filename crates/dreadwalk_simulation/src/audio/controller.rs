//! AudioLayerController: владелец трёх audio слоёв и всех in-flight ramps
//!
//! Модель конкуренции:
//! - Fade tasks НЕ взаимоисключающие: несколько ramp'ов на один параметр гонятся,
//!   каждый тик побеждает последний в порядке создания (last-write-wins)
//! - `supersede_fades` = single-owner: новый ramp отменяет незавершённый на том же layer+param
//! - `stop_all` принудительно сбрасывает ambience и выкидывает их in-flight ramps
//! - Follow-up команды завершившихся tasks выполняются в конце тика, в порядке завершения

use bevy::prelude::*;

use super::fade::{AudioTask, DelayTask, FadeTask, LayerCommand};
use super::layer::{AudioLayer, AudioParam, ClipId, LayerId};
use super::sink::{AudioSink, NullAudioSink};

#[derive(Component)]
pub struct AudioLayerController {
    layers: [AudioLayer; 3],
    tasks: Vec<AudioTask>,
    sink: Box<dyn AudioSink>,
    supersede_fades: bool,
}

impl Default for AudioLayerController {
    fn default() -> Self {
        Self::new(Box::new(NullAudioSink))
    }
}

impl std::fmt::Debug for AudioLayerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioLayerController")
            .field("layers", &self.layers)
            .field("tasks", &self.tasks.len())
            .field("supersede_fades", &self.supersede_fades)
            .finish()
    }
}

impl AudioLayerController {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            layers: LayerId::ALL.map(|id| AudioLayer::new(id, 1.0)),
            tasks: Vec::new(),
            sink,
            supersede_fades: false,
        }
    }

    pub fn with_sink(sink: impl AudioSink + 'static) -> Self {
        Self::new(Box::new(sink))
    }

    pub fn set_supersede_fades(&mut self, supersede: bool) {
        self.supersede_fades = supersede;
    }

    pub fn supersede_fades(&self) -> bool {
        self.supersede_fades
    }

    pub fn layer(&self, id: LayerId) -> &AudioLayer {
        &self.layers[id.index()]
    }

    fn layer_mut(&mut self, id: LayerId) -> &mut AudioLayer {
        &mut self.layers[id.index()]
    }

    pub fn is_playing(&self, id: LayerId) -> bool {
        self.layer(id).playing
    }

    /// Количество in-flight tasks (fades + delays)
    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn active_fades(&self, layer: LayerId, param: AudioParam) -> usize {
        self.tasks.iter().filter(|task| task.targets(layer, param)).count()
    }

    // ------------------------------------------------------------------
    // Direct set calls
    // ------------------------------------------------------------------

    pub fn set_layer_target(&mut self, layer: LayerId, clip: ClipId) {
        self.sink.assign_clip(layer, &clip);
        self.layer_mut(layer).clip = Some(clip);
    }

    pub fn set_volume(&mut self, layer: LayerId, volume: f32) {
        self.write(layer, AudioParam::Volume, volume);
    }

    pub fn set_pitch(&mut self, layer: LayerId, pitch: f32) {
        self.write(layer, AudioParam::Pitch, pitch);
    }

    pub fn play(&mut self, layer: LayerId) {
        self.layer_mut(layer).playing = true;
        self.sink.play(layer);
    }

    pub fn stop(&mut self, layer: LayerId) {
        self.layer_mut(layer).playing = false;
        self.sink.stop(layer);
    }

    /// Non-blocking one-shot на effects слое (не участвует в ramps)
    pub fn play_one_shot(&mut self, clip: &ClipId) {
        self.sink.play_one_shot(LayerId::Effects, clip);
    }

    fn write(&mut self, layer: LayerId, param: AudioParam, value: f32) {
        self.layer_mut(layer).set(param, value);
        match param {
            AudioParam::Volume => self.sink.set_volume(layer, value),
            AudioParam::Pitch => self.sink.set_pitch(layer, value),
        }
    }

    // ------------------------------------------------------------------
    // Ramps
    // ------------------------------------------------------------------

    pub fn fade_volume(&mut self, layer: LayerId, from: f32, to: f32, duration: f32) {
        self.start_fade(FadeTask::volume(layer, from, to, duration));
    }

    pub fn fade_pitch(&mut self, layer: LayerId, from: f32, to: f32, duration: f32) {
        self.start_fade(FadeTask::pitch(layer, from, to, duration));
    }

    /// Запуск ramp'а. Первый resume произойдёт в ближайшем `advance`.
    pub fn start_fade(&mut self, fade: FadeTask) {
        if self.supersede_fades {
            self.tasks.retain(|task| !task.targets(fade.layer, fade.param));
        }
        self.tasks.push(AudioTask::Fade(fade));
    }

    /// Fire-and-forget ожидание, затем команды
    pub fn schedule(&mut self, duration: f32, then: impl IntoIterator<Item = LayerCommand>) {
        self.tasks.push(AudioTask::Delay(DelayTask::new(duration, then)));
    }

    /// Остановить оба ambience слоя, сбросить pitch, выкинуть их ramps
    pub fn stop_all(&mut self, pitch: f32) {
        self.tasks.retain(|task| !LayerId::AMBIENCE.iter().any(|&layer| task.targets_layer(layer)));
        for layer in LayerId::AMBIENCE {
            self.stop(layer);
            self.set_pitch(layer, pitch);
        }
    }

    pub fn execute(&mut self, command: LayerCommand) {
        match command {
            LayerCommand::Play {
                layer,
                clip,
                volume,
                pitch,
            } => {
                self.set_layer_target(layer, clip);
                self.set_volume(layer, volume);
                self.set_pitch(layer, pitch);
                self.play(layer);
            }
            LayerCommand::Fade {
                layer,
                param,
                to,
                duration,
            } => {
                let from = self.layer(layer).get(param);
                self.start_fade(FadeTask::new(layer, param, from, to, duration));
            }
            LayerCommand::Stop(layer) => self.stop(layer),
            LayerCommand::StopAll { pitch } => self.stop_all(pitch),
        }
    }

    /// Один тик: каждый task резюмится ровно один раз в порядке создания
    pub fn advance(&mut self, delta: f32) {
        if self.tasks.is_empty() {
            return;
        }

        let mut tasks = std::mem::take(&mut self.tasks);
        let mut follow_ups = Vec::new();

        tasks.retain_mut(|task| match task {
            AudioTask::Fade(fade) => {
                let value = fade.advance(delta);
                self.write(fade.layer, fade.param, value);
                if fade.is_finished() {
                    follow_ups.extend(fade.take_follow_ups());
                    false
                } else {
                    true
                }
            }
            AudioTask::Delay(delay) => {
                if delay.advance(delta) {
                    follow_ups.extend(delay.take_follow_ups());
                    false
                } else {
                    true
                }
            }
        });

        self.tasks = tasks;

        for command in follow_ups {
            self.execute(command);
        }
    }
}
