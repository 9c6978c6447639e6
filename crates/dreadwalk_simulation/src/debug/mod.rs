//! Debug rings overlay (detection radii visualization)
//!
//! Чистый observer: читает EnemyConfig и PerceptionChanged, на AI не влияет.
//! Хост рисует `DebugRing::outline()` как closed line loop.

use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::{EnemyAiSet, PerceptionChanged, PerceptionState};
use crate::components::Enemy;
use crate::config::EnemyConfig;

/// Сегментов на окружность
pub const RING_SEGMENTS: usize = 64;
/// Высота ring'ов над землёй (локально врагу)
pub const RING_HEIGHT: f32 = 0.05;

/// RGBA цвет ring'а
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct RingColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl RingColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum RingKind {
    Outer,
    Inner,
    Attack,
}

impl RingKind {
    pub const ALL: [RingKind; 3] = [RingKind::Outer, RingKind::Inner, RingKind::Attack];

    /// Ring подсвечен, когда враг в этом радиусе или глубже
    pub fn is_active(self, state: PerceptionState) -> bool {
        match self {
            Self::Outer => state != PerceptionState::Idle,
            Self::Inner => state.is_engaged(),
            Self::Attack => state == PerceptionState::Attacking,
        }
    }

    fn active_color(self) -> RingColor {
        match self {
            Self::Outer => RingColor::new(1.0, 0.5, 0.0, 1.0),
            Self::Inner | Self::Attack => RingColor::new(1.0, 0.0, 0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DebugRing {
    pub kind: RingKind,
    pub radius: f32,
    pub base_color: RingColor,
    pub active_color: RingColor,
    /// Текущий цвет (base или active)
    pub color: RingColor,
    pub line_width: f32,
}

impl DebugRing {
    /// Точки окружности в локальных координатах врага (y = RING_HEIGHT)
    pub fn outline(&self) -> Vec<Vec3> {
        ring_points(self.radius, RING_SEGMENTS)
    }
}

/// `segments + 1` точек: последняя совпадает с первой (closed loop)
pub fn ring_points(radius: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            Vec3::new(angle.cos() * radius, RING_HEIGHT, angle.sin() * radius)
        })
        .collect()
}

/// Component: три ring'а врага
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DebugRings {
    pub rings: [DebugRing; 3],
    pub visible: bool,
}

impl DebugRings {
    pub fn from_config(config: &EnemyConfig) -> Self {
        let debug = &config.debug;
        let make = |kind: RingKind, radius: f32, base_color: RingColor| DebugRing {
            kind,
            radius,
            base_color,
            active_color: kind.active_color(),
            color: base_color,
            line_width: debug.line_width,
        };

        Self {
            rings: [
                make(RingKind::Outer, config.detection.outer_radius, debug.outer_color),
                make(RingKind::Inner, config.detection.inner_radius, debug.inner_color),
                make(RingKind::Attack, config.detection.attack_range, debug.attack_color),
            ],
            visible: debug.show_rings,
        }
    }

    pub fn ring(&self, kind: RingKind) -> &DebugRing {
        &self.rings[kind as usize]
    }

    /// Show/hide (toggle)
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn recolor(&mut self, state: PerceptionState) {
        for ring in &mut self.rings {
            ring.color = if ring.kind.is_active(state) {
                ring.active_color
            } else {
                ring.base_color
            };
        }
    }

    /// Радиусы следуют за конфигом (runtime reconfiguration)
    pub fn sync_radii(&mut self, config: &EnemyConfig) {
        for ring in &mut self.rings {
            ring.radius = match ring.kind {
                RingKind::Outer => config.detection.outer_radius,
                RingKind::Inner => config.detection.inner_radius,
                RingKind::Attack => config.detection.attack_range,
            };
        }
    }
}

/// Система: ring'и для новых врагов
pub fn attach_debug_rings(mut commands: Commands, enemies: Query<(Entity, &EnemyConfig), Added<Enemy>>) {
    for (entity, config) in enemies.iter() {
        commands.entity(entity).insert(DebugRings::from_config(config));
    }
}

/// Система: радиусы ring'ов за EnemyConfig
pub fn sync_debug_ring_radii(mut rings: Query<(&EnemyConfig, &mut DebugRings), Changed<EnemyConfig>>) {
    for (config, mut rings) in rings.iter_mut() {
        rings.sync_radii(config);
    }
}

/// Система: перекраска по PerceptionChanged
pub fn recolor_debug_rings(mut transitions: EventReader<PerceptionChanged>, mut rings: Query<&mut DebugRings>) {
    for event in transitions.read() {
        if let Ok(mut rings) = rings.get_mut(event.entity) {
            rings.recolor(event.to);
        }
    }
}

/// Debug rings plugin (опционально, после EnemyAiPlugin в том же schedule)
pub struct DebugRingsPlugin {
    schedule: InternedScheduleLabel,
}

impl DebugRingsPlugin {
    pub fn in_schedule(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for DebugRingsPlugin {
    fn default() -> Self {
        Self::in_schedule(FixedUpdate)
    }
}

impl Plugin for DebugRingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            self.schedule,
            (attach_debug_rings, sync_debug_ring_radii, recolor_debug_rings)
                .chain()
                .after(EnemyAiSet),
        );
    }
}
