//! Audio layer module
//!
//! Три логических канала на врага:
//! - OuterAmbience: loop, включается в Alert
//! - InnerAmbience: loop поверх outer, включается в Chasing
//! - Effects: one-shot (вокализации, атака)
//!
//! Mixing/output: ответственность хоста (через AudioSink).

pub mod controller;
pub mod fade;
pub mod layer;
pub mod sink;
pub mod systems;


pub use controller::AudioLayerController;
pub use fade::{lerp, DelayTask, FadeTask, LayerCommand};
pub use layer::{AudioLayer, AudioParam, ClipId, LayerId};
pub use sink::{AudioCommand, AudioCommandQueue, AudioSink, LoggingAudioSink, NullAudioSink, QueuedAudioSink};
pub use systems::advance_audio_layers;
