use serde::{Deserialize, Serialize};

/// Granularity levels currently used for labels and ticks.
///
/// `pre_*` fields hold the levels from before the last [`LevelState::update`]
/// so the next index-range pass can retire buckets of the stale level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub label_level: usize,
    pub pre_label_level: usize,
    pub tick_level: usize,
    pub pre_tick_level: usize,
    pub interval: i64,
    pub lower_interval: i64,
}

impl Default for LevelState {
    fn default() -> Self {
        Self {
            label_level: 0,
            pre_label_level: 0,
            tick_level: 0,
            pre_tick_level: 0,
            interval: 1,
            lower_interval: 0,
        }
    }
}

/// Opacity of labels and ticks whose own level equals the current level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeAlphas {
    pub label: f64,
    pub tick: f64,
}

impl LevelState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn label_level_changed(&self) -> bool {
        self.pre_label_level != self.label_level
    }

    /// Re-selects the label level for the given pixel `unit` per index.
    ///
    /// A level is kept while `lower_interval * unit <= max_value <=
    /// interval * unit`; it only moves once one of those bounds is crossed.
    /// Returns `true` when the label level changed.
    pub fn update(&mut self, intervals: &[i64], unit: f64, max_value: f64) -> bool {
        self.pre_label_level = self.label_level;
        self.pre_tick_level = self.tick_level;

        let Some(max_level) = intervals.len().checked_sub(1) else {
            self.reset();
            return false;
        };
        if !unit.is_finite() || unit <= 0.0 || !max_value.is_finite() {
            return false;
        }

        let stride = |level: usize| intervals[level] as f64 * unit;
        let mut level = self.label_level.min(max_level);
        if stride(level) < max_value {
            while level < max_level && stride(level) < max_value {
                level += 1;
            }
        } else {
            while level > 0 && stride(level - 1) > max_value && stride(level) >= max_value {
                level -= 1;
            }
        }

        self.label_level = level;
        self.tick_level = level.saturating_sub(1);
        self.interval = intervals[level];
        self.lower_interval = if level == 0 { 0 } else { intervals[level - 1] };
        self.label_level_changed()
    }

    /// Fade alphas for the current level.
    ///
    /// `unit0` is the pixel length of one index at zoom factor 1. The level
    /// fades in between the zoom where its stride first fits `max_value` and
    /// `fade_window_ratio` times that zoom, capped where the next finer level
    /// would start to fit.
    #[must_use]
    pub fn fade_alphas(
        &self,
        unit0: f64,
        cur_scale: f64,
        max_value: f64,
        fade_window_ratio: f64,
    ) -> FadeAlphas {
        let label = fade_fraction(
            unit0,
            cur_scale,
            max_value,
            fade_window_ratio,
            self.interval,
            self.lower_interval,
        );
        let tick = if self.label_level == 0 { 1.0 } else { label };
        FadeAlphas { label, tick }
    }
}

fn fade_fraction(
    unit0: f64,
    cur_scale: f64,
    max_value: f64,
    ratio: f64,
    interval: i64,
    lower_interval: i64,
) -> f64 {
    if unit0 <= 0.0 || interval <= 0 || max_value <= 0.0 {
        return 1.0;
    }
    let lower = max_value / (unit0 * interval as f64);
    let mut higher = ratio * lower;
    if lower_interval > 0 {
        higher = higher.min(max_value / (unit0 * lower_interval as f64));
    }
    let window = higher - lower;
    if !window.is_finite() || window <= f64::EPSILON * lower.abs().max(1.0) {
        return 1.0;
    }
    let clamped = cur_scale.clamp(lower, higher);
    ((clamped - lower) / window).clamp(0.0, 1.0)
}
