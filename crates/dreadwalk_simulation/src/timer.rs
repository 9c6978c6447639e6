//! Tick-based таймеры (frame-delta accumulation)
//!
//! - `TickTimer`: фиксированная длительность (fade ramps, delayed stop)
//! - `AmbientTimer`: случайный порог, перевыбирается после каждого срабатывания

use rand::Rng;

use crate::config::IntervalRange;

/// Относительный допуск завершения: сумма f32 дельт (1/60 × 120) недобирает до duration
const FINISH_TOLERANCE: f32 = 1e-4;

/// Накопитель delta time с фиксированной длительностью
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickTimer {
    duration: f32,
    elapsed: f32,
}

impl TickTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Прогресс в [0, 1]. Нулевая/отрицательная/NaN длительность → сразу 1.
    pub fn fraction(&self) -> f32 {
        if self.is_finished() {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Завершён через ⌈duration / δ⌉ шагов (с допуском на ошибку округления)
    pub fn is_finished(&self) -> bool {
        if self.duration.is_nan() || self.duration <= 0.0 {
            return true;
        }
        self.elapsed >= self.duration * (1.0 - FINISH_TOLERANCE)
    }

    /// Добавляет delta, возвращает true когда таймер завершён
    pub fn advance(&mut self, delta: f32) -> bool {
        self.elapsed += delta.max(0.0);
        self.is_finished()
    }
}

/// Таймер ambient вокализаций
///
/// Порог берётся из `IntervalRange` при первом `advance` и после каждого срабатывания.
/// Неактивный таймер не сбрасывается: при возврате в state может сработать сразу.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientTimer {
    range: IntervalRange,
    accumulated: f32,
    threshold: Option<f32>,
}

impl AmbientTimer {
    pub fn new(range: IntervalRange) -> Self {
        Self {
            range,
            accumulated: 0.0,
            threshold: None,
        }
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn threshold(&self) -> Option<f32> {
        self.threshold
    }

    pub fn range(&self) -> IntervalRange {
        self.range
    }

    /// Смена диапазона (reconfiguration): текущий порог сохраняется до следующего fire
    pub fn set_range(&mut self, range: IntervalRange) {
        self.range = range;
    }

    /// Возвращает true на тике срабатывания
    pub fn advance<R: Rng>(&mut self, delta: f32, rng: &mut R) -> bool {
        let threshold = match self.threshold {
            Some(threshold) => threshold,
            None => *self.threshold.insert(self.range.sample(rng)),
        };

        self.accumulated += delta.max(0.0);

        if self.accumulated >= threshold {
            self.accumulated = 0.0;
            self.threshold = Some(self.range.sample(rng));
            true
        } else {
            false
        }
    }
}
