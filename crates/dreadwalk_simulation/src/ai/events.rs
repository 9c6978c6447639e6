//! AI Events: perception transitions для внешних observers (debug rings, хост)

use bevy::prelude::*;

use super::components::PerceptionState;

/// Враг сменил perception state
///
/// Пишется ровно один раз на transition, ПОСЛЕ side effects нового state.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PerceptionChanged {
    pub entity: Entity,
    pub from: PerceptionState,
    pub to: PerceptionState,
    /// Дистанция, на которой произошёл transition
    pub distance: f32,
}
