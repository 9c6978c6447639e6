//! Target discovery (TargetTag lookup, lost target reset).

use bevy::prelude::*;

use crate::components::{Enemy, TargetLink, TargetTag};
use crate::config::EnemyConfig;

/// Система: поиск цели по `EnemyConfig::target_tag`
///
/// - Привязанная цель despawned → ссылка сбрасывается, ищем заново
/// - Несколько кандидатов → берём с наименьшим Entity (детерминизм)
/// - Не нашли → error один раз, враг inert до появления цели
pub fn acquire_targets(
    mut enemies: Query<(Entity, &EnemyConfig, &mut TargetLink), With<Enemy>>,
    candidates: Query<(Entity, &TargetTag), (With<Transform>, Without<Enemy>)>,
    positions: Query<(), (With<Transform>, Without<Enemy>)>,
) {
    for (entity, config, mut link) in enemies.iter_mut() {
        if let Some(target) = link.entity {
            if positions.contains(target) {
                continue;
            }
            crate::log(&format!("👻 Enemy {:?}: target {:?} gone, searching again", entity, target));
            link.entity = None;
        }

        let found = candidates
            .iter()
            .filter(|(_, tag)| tag.matches(&config.target_tag))
            .map(|(candidate, _)| candidate)
            .min();

        match found {
            Some(target) => {
                link.entity = Some(target);
                link.reported_missing = false;
                crate::log(&format!(
                    "🎯 Enemy {:?}: acquired target {:?} (tag '{}')",
                    entity, target, config.target_tag
                ));
            }
            None if !link.reported_missing => {
                link.reported_missing = true;
                crate::log_error(&format!(
                    "Enemy {:?}: no target with tag '{}', AI idle until one appears",
                    entity, config.target_tag
                ));
            }
            None => {}
        }
    }
}
