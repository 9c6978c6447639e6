//! Ambient vocalization timers (idle groans, chase snarls).

use bevy::prelude::*;

use crate::config::VocalizationConfig;
use crate::timer::AmbientTimer;

/// Component: два независимых ambient таймера
///
/// Idle таймер тикает только в Idle, chase таймер только в Chasing.
/// Вне своего state таймер заморожен (accumulator НЕ сбрасывается).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AmbientVoice {
    pub idle: AmbientTimer,
    pub chase: AmbientTimer,
}

impl Default for AmbientVoice {
    fn default() -> Self {
        Self::from_config(&VocalizationConfig::default())
    }
}

impl AmbientVoice {
    pub fn from_config(config: &VocalizationConfig) -> Self {
        Self {
            idle: AmbientTimer::new(config.idle_interval),
            chase: AmbientTimer::new(config.chase_interval),
        }
    }

    /// Подтянуть диапазоны из конфига (runtime reconfiguration)
    pub fn sync_ranges(&mut self, config: &VocalizationConfig) {
        self.idle.set_range(config.idle_interval);
        self.chase.set_range(config.chase_interval);
    }
}
