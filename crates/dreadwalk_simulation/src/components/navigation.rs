//! Navigation компоненты: intent и capability-граница с NavMesh агентом хоста
//!
//! Архитектура:
//! - ECS система пишет NavigationIntent (high-level intent, каждый тик в Chasing/Attacking)
//! - Если агент есть и enabled: intent уходит в NavigationAgent (pathfinding на стороне хоста)
//! - Иначе direct steering по Transform (fallback)

use bevy::prelude::*;

use crate::config::LocomotionConfig;

/// NavMesh агент хоста (pathfinding internals не наши)
pub trait NavigationAgent: Send + Sync {
    /// Выключенный агент → direct steering fallback
    fn is_enabled(&self) -> bool {
        true
    }
    fn set_destination(&mut self, destination: Vec3);
    fn set_speed(&mut self, speed: f32);
    fn set_stopping_distance(&mut self, distance: f32);
    fn set_stopped(&mut self, stopped: bool);
    fn is_stopped(&self) -> bool;
    /// Текущая скорость агента (для animation speed)
    fn velocity(&self) -> Vec3;
}

/// Опциональный NavMesh агент врага
#[derive(Component, Default)]
pub struct NavigationLink {
    agent: Option<Box<dyn NavigationAgent>>,
    initialized: bool,
}

impl std::fmt::Debug for NavigationLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationLink")
            .field("has_agent", &self.agent.is_some())
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl NavigationLink {
    pub fn new(agent: impl NavigationAgent + 'static) -> Self {
        Self {
            agent: Some(Box::new(agent)),
            initialized: false,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn has_agent(&self) -> bool {
        self.agent.is_some()
    }

    pub fn agent(&self) -> Option<&dyn NavigationAgent> {
        self.agent.as_deref()
    }

    pub fn agent_mut(&mut self) -> Option<&mut (dyn NavigationAgent + 'static)> {
        self.agent.as_deref_mut()
    }

    /// Агент, который можно использовать для pathfinding (есть и enabled)
    pub fn active_agent(&self) -> Option<&dyn NavigationAgent> {
        self.agent.as_deref().filter(|agent| agent.is_enabled())
    }

    pub fn active_agent_mut(&mut self) -> Option<&mut (dyn NavigationAgent + 'static)> {
        self.agent.as_deref_mut().filter(|agent| agent.is_enabled())
    }

    /// Одноразовая настройка агента: walk speed, stopping distance = attack range, stopped
    pub fn ensure_initialized(&mut self, locomotion: &LocomotionConfig, attack_range: f32) {
        if self.initialized {
            return;
        }
        if let Some(agent) = self.agent.as_deref_mut() {
            agent.set_speed(locomotion.walk_speed);
            agent.set_stopping_distance(attack_range);
            agent.set_stopped(true);
        }
        self.initialized = true;
    }

    /// Остановить in-flight навигацию (no-op без агента)
    pub fn halt(&mut self) {
        if let Some(agent) = self.agent.as_deref_mut() {
            agent.set_stopped(true);
        }
    }

    pub fn resume(&mut self) {
        if let Some(agent) = self.agent.as_deref_mut() {
            agent.set_stopped(false);
        }
    }
}

/// Locomotion intent на текущий тик
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavigationIntent {
    pub destination: Vec3,
    pub speed: f32,
    pub stopped: bool,
    /// true: intent исполнен direct steering'ом (агента нет или он выключен)
    pub direct: bool,
}

impl Default for NavigationIntent {
    fn default() -> Self {
        Self::hold()
    }
}

impl NavigationIntent {
    /// Стоять на месте
    pub fn hold() -> Self {
        Self {
            destination: Vec3::ZERO,
            speed: 0.0,
            stopped: true,
            direct: false,
        }
    }

    pub fn pursue(destination: Vec3, speed: f32, direct: bool) -> Self {
        Self {
            destination,
            speed,
            stopped: false,
            direct,
        }
    }
}
