//! Fade ramps и отложенные команды (cooperative tasks, resumed once per tick)

use super::layer::{AudioParam, ClipId, LayerId};
use crate::timer::TickTimer;

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Команда над слоем, выполняется по завершении fade/delay
#[derive(Debug, Clone, PartialEq)]
pub enum LayerCommand {
    /// Назначить клип, выставить параметры и запустить
    Play {
        layer: LayerId,
        clip: ClipId,
        volume: f32,
        pitch: f32,
    },
    /// Ramp от live значения параметра на момент выполнения
    Fade {
        layer: LayerId,
        param: AudioParam,
        to: f32,
        duration: f32,
    },
    Stop(LayerId),
    /// Остановить оба ambience слоя и сбросить pitch
    StopAll { pitch: f32 },
}

/// In-flight ramp одного параметра
///
/// Инвариант: после завершения значение ровно `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeTask {
    pub layer: LayerId,
    pub param: AudioParam,
    pub from: f32,
    pub to: f32,
    timer: TickTimer,
    then: Vec<LayerCommand>,
}

impl FadeTask {
    pub fn new(layer: LayerId, param: AudioParam, from: f32, to: f32, duration: f32) -> Self {
        Self {
            layer,
            param,
            from,
            to,
            timer: TickTimer::new(duration),
            then: Vec::new(),
        }
    }

    pub fn volume(layer: LayerId, from: f32, to: f32, duration: f32) -> Self {
        Self::new(layer, AudioParam::Volume, from, to, duration)
    }

    pub fn pitch(layer: LayerId, from: f32, to: f32, duration: f32) -> Self {
        Self::new(layer, AudioParam::Pitch, from, to, duration)
    }

    /// Команды, выполняемые в тике завершения ramp'а
    pub fn then(mut self, commands: impl IntoIterator<Item = LayerCommand>) -> Self {
        self.then.extend(commands);
        self
    }

    pub fn duration(&self) -> f32 {
        self.timer.duration()
    }

    pub fn elapsed(&self) -> f32 {
        self.timer.elapsed()
    }

    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }

    pub fn value(&self) -> f32 {
        if self.timer.is_finished() {
            self.to
        } else {
            lerp(self.from, self.to, self.timer.fraction())
        }
    }

    /// Один resume: elapsed += delta, возвращает значение для записи в слой
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.timer.advance(delta);
        self.value()
    }

    pub(crate) fn take_follow_ups(&mut self) -> Vec<LayerCommand> {
        std::mem::take(&mut self.then)
    }
}

/// Фиксированное ожидание (fire-and-forget), затем команды
#[derive(Debug, Clone, PartialEq)]
pub struct DelayTask {
    timer: TickTimer,
    then: Vec<LayerCommand>,
}

impl DelayTask {
    pub fn new(duration: f32, then: impl IntoIterator<Item = LayerCommand>) -> Self {
        Self {
            timer: TickTimer::new(duration),
            then: then.into_iter().collect(),
        }
    }

    pub fn advance(&mut self, delta: f32) -> bool {
        self.timer.advance(delta)
    }

    pub(crate) fn take_follow_ups(&mut self) -> Vec<LayerCommand> {
        std::mem::take(&mut self.then)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AudioTask {
    Fade(FadeTask),
    Delay(DelayTask),
}

impl AudioTask {
    pub(crate) fn targets(&self, layer: LayerId, param: AudioParam) -> bool {
        matches!(self, AudioTask::Fade(fade) if fade.layer == layer && fade.param == param)
    }

    pub(crate) fn targets_layer(&self, layer: LayerId) -> bool {
        matches!(self, AudioTask::Fade(fade) if fade.layer == layer)
    }
}
