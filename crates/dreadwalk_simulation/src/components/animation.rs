//! Animation parameter sink (write-only, animation state назад не читаем)

use bevy::prelude::*;

pub trait AnimationSink: Send + Sync {
    /// Нормализованная скорость (velocity / run speed)
    fn set_speed(&mut self, speed: f32);
    fn set_alert(&mut self, alert: bool);
    fn set_chasing(&mut self, chasing: bool);
    /// Fire-once attack cue
    fn trigger_attack(&mut self);
}

/// Опциональный animator врага. Без него push пропускается.
#[derive(Component, Default)]
pub struct AnimationLink {
    sink: Option<Box<dyn AnimationSink>>,
}

impl std::fmt::Debug for AnimationLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationLink")
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl AnimationLink {
    pub fn new(sink: impl AnimationSink + 'static) -> Self {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    pub fn sink_mut(&mut self) -> Option<&mut (dyn AnimationSink + 'static)> {
        self.sink.as_deref_mut()
    }
}

/// Последние отправленные параметры (observable snapshot для хоста и тестов)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationParams {
    pub speed: f32,
    pub alert: bool,
    pub chasing: bool,
    /// Сколько раз сработал attack cue
    pub attack_cues: u32,
}
