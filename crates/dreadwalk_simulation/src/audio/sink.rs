//! AudioSink: граница с mixing/playback движка хоста
//!
//! Controller только пишет команды (clip, volume, pitch, play/stop, one-shot),
//! waveform mixing остаётся на стороне хоста.

use std::sync::{Arc, Mutex, PoisonError};

use super::layer::{ClipId, LayerId};

pub trait AudioSink: Send + Sync {
    fn assign_clip(&mut self, layer: LayerId, clip: &ClipId);
    fn set_volume(&mut self, layer: LayerId, volume: f32);
    fn set_pitch(&mut self, layer: LayerId, pitch: f32);
    fn play(&mut self, layer: LayerId);
    fn stop(&mut self, layer: LayerId);
    fn play_one_shot(&mut self, layer: LayerId, clip: &ClipId);
}

/// Headless: команды никуда не уходят
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn assign_clip(&mut self, _layer: LayerId, _clip: &ClipId) {}
    fn set_volume(&mut self, _layer: LayerId, _volume: f32) {}
    fn set_pitch(&mut self, _layer: LayerId, _pitch: f32) {}
    fn play(&mut self, _layer: LayerId) {}
    fn stop(&mut self, _layer: LayerId) {}
    fn play_one_shot(&mut self, _layer: LayerId, _clip: &ClipId) {}
}

/// Команда для движка (буферизуется QueuedAudioSink)
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    AssignClip { layer: LayerId, clip: ClipId },
    SetVolume { layer: LayerId, volume: f32 },
    SetPitch { layer: LayerId, pitch: f32 },
    Play { layer: LayerId },
    Stop { layer: LayerId },
    PlayOneShot { layer: LayerId, clip: ClipId },
}

/// Shared очередь команд: ECS пишет, хост (main thread движка) вычитывает каждый кадр
#[derive(Debug, Default, Clone)]
pub struct AudioCommandQueue {
    commands: Arc<Mutex<Vec<AudioCommand>>>,
}

impl AudioCommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: AudioCommand) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }

    pub fn drain(&self) -> Vec<AudioCommand> {
        std::mem::take(&mut *self.commands.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.commands.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sink, пишущий в эту очередь
    pub fn sink(&self) -> QueuedAudioSink {
        QueuedAudioSink {
            queue: self.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueuedAudioSink {
    queue: AudioCommandQueue,
}

impl AudioSink for QueuedAudioSink {
    fn assign_clip(&mut self, layer: LayerId, clip: &ClipId) {
        self.queue.push(AudioCommand::AssignClip {
            layer,
            clip: clip.clone(),
        });
    }

    fn set_volume(&mut self, layer: LayerId, volume: f32) {
        self.queue.push(AudioCommand::SetVolume { layer, volume });
    }

    fn set_pitch(&mut self, layer: LayerId, pitch: f32) {
        self.queue.push(AudioCommand::SetPitch { layer, pitch });
    }

    fn play(&mut self, layer: LayerId) {
        self.queue.push(AudioCommand::Play { layer });
    }

    fn stop(&mut self, layer: LayerId) {
        self.queue.push(AudioCommand::Stop { layer });
    }

    fn play_one_shot(&mut self, layer: LayerId, clip: &ClipId) {
        self.queue.push(AudioCommand::PlayOneShot {
            layer,
            clip: clip.clone(),
        });
    }
}

/// Логирует только дискретные события (play/stop/one-shot), без спама volume/pitch
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingAudioSink;

impl AudioSink for LoggingAudioSink {
    fn assign_clip(&mut self, layer: LayerId, clip: &ClipId) {
        crate::log(&format!("🎵 [{}] clip → {}", layer.as_str(), clip));
    }

    fn set_volume(&mut self, _layer: LayerId, _volume: f32) {}

    fn set_pitch(&mut self, _layer: LayerId, _pitch: f32) {}

    fn play(&mut self, layer: LayerId) {
        crate::log(&format!("▶️ [{}] play", layer.as_str()));
    }

    fn stop(&mut self, layer: LayerId) {
        crate::log(&format!("⏹️ [{}] stop", layer.as_str()));
    }

    fn play_one_shot(&mut self, layer: LayerId, clip: &ClipId) {
        crate::log(&format!("🔊 [{}] one-shot {}", layer.as_str(), clip));
    }
}
