//! Enemy marker component

use bevy::prelude::*;

use crate::ai::{AmbientVoice, Perception};
use crate::audio::AudioLayerController;
use crate::components::{AnimationLink, AnimationParams, NavigationIntent, NavigationLink, TargetLink};
use crate::config::EnemyConfig;

/// Marker: сущность управляется enemy AI
///
/// Required components: всё, что нужно контроллеру, добавляется автоматически
/// (хост подменяет NavigationLink/AnimationLink/AudioLayerController своими адаптерами).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    EnemyConfig,
    Perception,
    TargetLink,
    AmbientVoice,
    NavigationIntent,
    NavigationLink,
    AnimationLink,
    AnimationParams,
    AudioLayerController,
    Transform
)]
pub struct Enemy;
