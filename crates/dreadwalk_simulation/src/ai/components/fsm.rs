//! Perception FSM components (state, per-tick distance, transition counter).

use bevy::prelude::*;

use crate::config::DetectionGeometry;

/// Perception состояния (вложенные радиусы)
///
/// Выбор state = чистая функция дистанции без hysteresis,
/// первый совпавший тест побеждает (attack → inner → outer → idle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum PerceptionState {
    /// Цель вне внешнего радиуса
    #[default]
    Idle,
    /// Цель в outer radius: стоим, играет outer ambience
    Alert,
    /// Цель в inner radius: преследование
    Chasing,
    /// Цель в attack range
    Attacking,
}

impl PerceptionState {
    /// Классификация дистанции (границы inclusive)
    pub fn from_distance(distance: f32, geometry: &DetectionGeometry) -> Self {
        if distance <= geometry.attack_range {
            Self::Attacking
        } else if distance <= geometry.inner_radius {
            Self::Chasing
        } else if distance <= geometry.outer_radius {
            Self::Alert
        } else {
            Self::Idle
        }
    }

    /// Chasing/Attacking: враг смотрит на цель каждый тик
    pub fn is_engaged(self) -> bool {
        matches!(self, Self::Chasing | Self::Attacking)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Alert => "Alert",
            Self::Chasing => "Chasing",
            Self::Attacking => "Attacking",
        }
    }
}

impl std::fmt::Display for PerceptionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component: perception state врага
///
/// `tracking == false` → в этом тике цели нет, downstream системы пропускают врага.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct Perception {
    pub current: PerceptionState,
    pub previous: PerceptionState,
    /// Дистанция до цели на последнем тике с целью
    pub distance: f32,
    pub tracking: bool,
    /// Количество transitions с момента спавна
    pub transitions: u64,
}

impl Perception {
    /// Новый замер дистанции. Возвращает `Some((from, to))` если state сменился.
    pub fn observe(
        &mut self,
        distance: f32,
        geometry: &DetectionGeometry,
    ) -> Option<(PerceptionState, PerceptionState)> {
        self.tracking = true;
        self.distance = distance;
        self.previous = self.current;
        self.current = PerceptionState::from_distance(distance, geometry);

        if self.current == self.previous {
            return None;
        }

        self.transitions += 1;
        Some((self.previous, self.current))
    }

    /// Цели нет: state замораживается
    pub fn lose_track(&mut self) {
        self.tracking = false;
        self.previous = self.current;
    }
}
