//! Target компоненты: tag для auto-discovery и ссылка врага на цель

use bevy::prelude::*;

/// Tag цели (аналог "Player" tag). Позиция читается из Transform.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TargetTag(pub String);

impl TargetTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn player() -> Self {
        Self::new("Player")
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.0 == tag
    }
}

/// Ссылка врага на цель
///
/// `entity == None` → враг inert (tick пропускается), discovery по `EnemyConfig::target_tag`.
/// Отсутствие цели логируется один раз до следующего успешного acquire.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct TargetLink {
    pub entity: Option<Entity>,
    pub(crate) reported_missing: bool,
}

impl TargetLink {
    /// Явно назначенная цель (discovery не нужен)
    pub fn to(entity: Entity) -> Self {
        Self {
            entity: Some(entity),
            reported_missing: false,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.entity.is_some()
    }
}
