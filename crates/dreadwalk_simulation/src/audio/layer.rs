//! Audio layer модель: идентичность канала, клип, live параметры

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Идентификатор звукового клипа (ключ в asset registry хоста)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl From<&str> for ClipId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ClipId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Логический audio канал врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum LayerId {
    /// Loop, привязан к outer radius (alert)
    OuterAmbience,
    /// Loop поверх outer, привязан к inner radius (chase)
    InnerAmbience,
    /// One-shot эффекты (idle/chase вокализации, атака)
    Effects,
}

impl LayerId {
    pub const ALL: [LayerId; 3] = [LayerId::OuterAmbience, LayerId::InnerAmbience, LayerId::Effects];
    pub const AMBIENCE: [LayerId; 2] = [LayerId::OuterAmbience, LayerId::InnerAmbience];

    pub(crate) fn index(self) -> usize {
        match self {
            LayerId::OuterAmbience => 0,
            LayerId::InnerAmbience => 1,
            LayerId::Effects => 2,
        }
    }

    pub fn is_ambience(self) -> bool {
        !matches!(self, LayerId::Effects)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayerId::OuterAmbience => "outer",
            LayerId::InnerAmbience => "inner",
            LayerId::Effects => "effects",
        }
    }
}

/// Параметр, который умеет рампить fade task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AudioParam {
    Volume,
    /// Playback rate (1.0 = normal speed)
    Pitch,
}

/// Состояние одного канала. Пишется только AudioLayerController'ом.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioLayer {
    pub id: LayerId,
    pub clip: Option<ClipId>,
    pub volume: f32,
    pub pitch: f32,
    pub playing: bool,
    /// Ambience: loop, effects: нет
    pub looping: bool,
}

impl AudioLayer {
    pub fn new(id: LayerId, pitch: f32) -> Self {
        Self {
            id,
            clip: None,
            volume: 1.0,
            pitch,
            playing: false,
            looping: id.is_ambience(),
        }
    }

    pub fn get(&self, param: AudioParam) -> f32 {
        match param {
            AudioParam::Volume => self.volume,
            AudioParam::Pitch => self.pitch,
        }
    }

    pub(crate) fn set(&mut self, param: AudioParam, value: f32) {
        match param {
            AudioParam::Volume => self.volume = value,
            AudioParam::Pitch => self.pitch = value,
        }
    }
}
