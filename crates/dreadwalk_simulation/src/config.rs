//! Enemy tunables (detection radii, speeds, music levels, clip pools)
//!
//! Все значения: внешние tunables. Конфиг НЕ валидируется: любые неотрицательные
//! значения и радиусы в любом порядке допустимы (state selection просто становится
//! неинтуитивной). При загрузке из файла порядок радиусов только логируется warning'ом.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::ClipId;
use crate::debug::RingColor;

/// Ошибки загрузки конфига (единственная fallible поверхность крейта)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read enemy config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse enemy config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize enemy config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Радиусы обнаружения (метры)
///
/// Ожидаемый порядок: attack_range ≤ inner_radius ≤ outer_radius (не enforced).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct DetectionGeometry {
    /// Внешний радиус: alert + outer ambience
    pub outer_radius: f32,
    /// Внутренний радиус: chase + inner ambience
    pub inner_radius: f32,
    /// Радиус атаки
    pub attack_range: f32,
}

impl Default for DetectionGeometry {
    fn default() -> Self {
        Self {
            outer_radius: 15.0,
            inner_radius: 7.0,
            attack_range: 2.0,
        }
    }
}

impl DetectionGeometry {
    pub fn new(outer_radius: f32, inner_radius: f32, attack_range: f32) -> Self {
        Self {
            outer_radius,
            inner_radius,
            attack_range,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.attack_range <= self.inner_radius && self.inner_radius <= self.outer_radius
    }
}

/// Параметры передвижения
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct LocomotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Скорость поворота (slerp factor per second), удваивается в Attacking
    pub rotation_speed: f32,
    /// Дистанция переключения на бег (0 = никогда не бежать)
    pub run_trigger_distance: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.5,
            run_speed: 4.0,
            rotation_speed: 2.0,
            run_trigger_distance: 5.0,
        }
    }
}

impl LocomotionConfig {
    /// Requested speed для данной дистанции (порог inclusive)
    pub fn speed_for_distance(&self, distance: f32) -> f32 {
        if self.run_trigger_distance > 0.0 && distance <= self.run_trigger_distance {
            self.run_speed
        } else {
            self.walk_speed
        }
    }
}

/// Параметры ambience слоёв
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct MusicConfig {
    /// Длительность fade'ов и задержки полного stop (секунды)
    pub transition_duration: f32,
    /// Номинальная громкость outer ambience
    pub volume: f32,
    /// Множитель громкости inner ambience (3.0 = 300%)
    pub inner_volume_multiplier: f32,
    pub normal_pitch: f32,
    pub fast_pitch: f32,
    /// Новый ramp отменяет незавершённый ramp того же layer+param
    pub supersede_fades: bool,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            transition_duration: 2.0,
            volume: 0.7,
            inner_volume_multiplier: 3.0,
            normal_pitch: 1.0,
            fast_pitch: 1.3,
            supersede_fades: false,
        }
    }
}

impl MusicConfig {
    pub fn inner_volume(&self) -> f32 {
        self.volume * self.inner_volume_multiplier
    }
}

/// Клипы и пулы клипов. Пустой пул / None → воспроизведение no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct SoundBank {
    pub outer_ambience: Option<ClipId>,
    pub inner_ambience: Option<ClipId>,
    pub idle: Vec<ClipId>,
    pub chase: Vec<ClipId>,
    pub attack: Option<ClipId>,
}

/// Диапазон для случайного интервала (uniform)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct IntervalRange {
    pub min: f32,
    pub max: f32,
}

impl IntervalRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample из [min, max]. Вырожденный (max ≤ min) или не-finite диапазон → min.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.min.is_finite() && self.max.is_finite() && self.max > self.min {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Интервалы ambient вокализаций (секунды)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct VocalizationConfig {
    pub idle_interval: IntervalRange,
    pub chase_interval: IntervalRange,
}

impl Default for VocalizationConfig {
    fn default() -> Self {
        Self {
            idle_interval: IntervalRange::new(5.0, 10.0),
            chase_interval: IntervalRange::new(3.0, 6.0),
        }
    }
}

/// Debug rings overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct DebugConfig {
    pub show_rings: bool,
    pub line_width: f32,
    pub outer_color: RingColor,
    pub inner_color: RingColor,
    pub attack_color: RingColor,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_rings: true,
            line_width: 0.1,
            outer_color: RingColor::new(1.0, 0.3, 0.0, 0.8),
            inner_color: RingColor::new(1.0, 0.0, 0.0, 0.8),
            attack_color: RingColor::new(0.8, 0.0, 0.0, 1.0),
        }
    }
}

/// Полный набор tunables одного врага
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyConfig {
    /// Tag цели для auto-discovery (TargetTag)
    pub target_tag: String,
    pub detection: DetectionGeometry,
    pub locomotion: LocomotionConfig,
    pub music: MusicConfig,
    pub sounds: SoundBank,
    pub vocalization: VocalizationConfig,
    pub debug: DebugConfig,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            target_tag: "Player".to_string(),
            detection: DetectionGeometry::default(),
            locomotion: LocomotionConfig::default(),
            music: MusicConfig::default(),
            sounds: SoundBank::default(),
            vocalization: VocalizationConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl EnemyConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.warn_if_degenerate();
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Runtime reconfiguration радиусов (attack_range не трогаем)
    pub fn set_detection_radii(&mut self, outer: f32, inner: f32) {
        self.detection.outer_radius = outer;
        self.detection.inner_radius = inner;
    }

    fn warn_if_degenerate(&self) {
        if !self.detection.is_ordered() {
            crate::log_warning(&format!(
                "EnemyConfig: radii out of order (attack {:.2}, inner {:.2}, outer {:.2}), closest test wins",
                self.detection.attack_range, self.detection.inner_radius, self.detection.outer_radius
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use crate::timer::AmbientTimer;

    #[test]
    fn test_enemy_config_default() {
        let config = EnemyConfig::default();
        assert_eq!(config.target_tag, "Player");
        assert_eq!(config.detection, DetectionGeometry::new(15.0, 7.0, 2.0));
        assert_eq!(config.locomotion.walk_speed, 1.5);
        assert_eq!(config.locomotion.run_speed, 4.0);
        assert_eq!(config.music.transition_duration, 2.0);
        assert_eq!(config.music.fast_pitch, 1.3);
        assert!(!config.music.supersede_fades);
        assert_eq!(config.vocalization.idle_interval, IntervalRange::new(5.0, 10.0));
        assert_eq!(config.vocalization.chase_interval, IntervalRange::new(3.0, 6.0));
    }

    #[test]
    fn test_run_trigger_is_inclusive() {
        let locomotion = LocomotionConfig {
            walk_speed: 1.5,
            run_speed: 4.0,
            rotation_speed: 2.0,
            run_trigger_distance: 5.0,
        };

        assert_eq!(locomotion.speed_for_distance(6.0), 1.5);
        assert_eq!(locomotion.speed_for_distance(5.0), 4.0);
        assert_eq!(locomotion.speed_for_distance(4.0), 4.0);
    }

    #[test]
    fn test_zero_run_trigger_never_runs() {
        let locomotion = LocomotionConfig {
            run_trigger_distance: 0.0,
            ..Default::default()
        };

        assert_eq!(locomotion.speed_for_distance(0.0), locomotion.walk_speed);
    }

    #[test]
    fn test_inner_volume_uses_multiplier() {
        let music = MusicConfig::default();
        assert!((music.inner_volume() - 2.1).abs() < 1e-6);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let source = r#"(
            detection: (outer_radius: 20.0),
            sounds: (idle: ["groan_a", "groan_b"], attack: Some("bite")),
        )"#;

        let config = EnemyConfig::from_ron_str(source).unwrap();
        assert_eq!(config.detection.outer_radius, 20.0);
        assert_eq!(config.detection.inner_radius, 7.0);
        assert_eq!(config.sounds.idle.len(), 2);
        assert_eq!(config.sounds.attack, Some(ClipId::from("bite")));
        assert_eq!(config.locomotion, LocomotionConfig::default());
    }

    #[test]
    fn test_degenerate_radii_still_load() {
        let source = "(detection: (outer_radius: 1.0, inner_radius: 5.0, attack_range: 9.0))";
        let config = EnemyConfig::from_ron_str(source).unwrap();
        assert!(!config.detection.is_ordered());
    }

    #[test]
    fn test_invalid_ron_is_parse_error() {
        let result = EnemyConfig::from_ron_str("(detection: (outer_radius: \"far\"))");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EnemyConfig::load("/definitely/not/here/enemy.ron");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_ron_output_loads_back() {
        let mut config = EnemyConfig::default();
        config.sounds.chase = vec![ClipId::from("snarl")];
        config.music.supersede_fades = true;

        let text = config.to_ron_string().unwrap();
        assert_eq!(EnemyConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_set_detection_radii_keeps_attack_range() {
        let mut config = EnemyConfig::default();
        config.set_detection_radii(30.0, 12.0);
        assert_eq!(config.detection, DetectionGeometry::new(30.0, 12.0, 2.0));
    }

    #[test]
    fn test_interval_sample_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let range = IntervalRange::new(3.0, 6.0);

        for _ in 0..200 {
            let value = range.sample(&mut rng);
            assert!((3.0..=6.0).contains(&value));
        }
    }

    #[test]
    fn test_degenerate_interval_returns_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(IntervalRange::new(4.0, 4.0).sample(&mut rng), 4.0);
        assert_eq!(IntervalRange::new(6.0, 3.0).sample(&mut rng), 6.0);
    }

    #[test]
    fn test_infinite_interval_returns_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(IntervalRange::new(5.0, f32::INFINITY).sample(&mut rng), 5.0);
        assert_eq!(IntervalRange::new(2.0, f32::NAN).sample(&mut rng), 2.0);
        assert_eq!(IntervalRange::new(f32::INFINITY, f32::INFINITY).sample(&mut rng), f32::INFINITY);

        let mut timer = AmbientTimer::new(IntervalRange::new(5.0, f32::INFINITY));
        assert!(!timer.advance(0.1, &mut rng));
        assert_eq!(timer.threshold(), Some(5.0));
    }

    #[test]
    fn test_shipped_config_loads() {
        let config = EnemyConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/enemy.ron")).unwrap();

        assert_eq!(config.detection, DetectionGeometry::default());
        assert_eq!(config.sounds.idle.len(), 3);
        assert_eq!(config.music.fast_pitch, 1.3);
    }
}
