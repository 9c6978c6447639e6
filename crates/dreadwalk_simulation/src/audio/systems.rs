//! Audio systems

use bevy::prelude::*;

use super::controller::AudioLayerController;

/// Система: resume всех fade/delay tasks (один раз за тик)
///
/// Запускается ПОСЛЕ transitions и per-state поведения: ramps, созданные в этом тике,
/// получают первый resume в этом же тике.
pub fn advance_audio_layers(mut controllers: Query<&mut AudioLayerController>, time: Res<Time>) {
    let delta = time.delta_secs();

    for mut controller in controllers.iter_mut() {
        controller.advance(delta);
    }
}
