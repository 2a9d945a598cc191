use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AxisSpan, IndexRange};

/// Continuous pan/zoom state along the axis coordinate.
///
/// `view_range` is fixed by the view rectangle; `max_range` is the full
/// pannable extent at the current zoom. Index `i` sits at axis coordinate
/// `max_range.lo + (i + 0.5) * unit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub max_range: AxisSpan,
    pub view_range: AxisSpan,
    pub scale: f64,
    pub index_range: IndexRange,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            max_range: AxisSpan::default(),
            view_range: AxisSpan::default(),
            scale: 1.0,
            index_range: IndexRange::new(0, -1),
        }
    }
}

impl ViewportState {
    /// Fits the whole domain into `view_range` at zoom 1.
    pub fn reset(&mut self, view_range: AxisSpan, index_count: i64) {
        self.view_range = view_range;
        self.max_range = view_range;
        self.scale = 1.0;
        self.index_range = IndexRange::new(0, index_count - 1);
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.max_range.lo - self.view_range.lo
    }

    #[must_use]
    pub fn cur_scale(&self) -> f64 {
        cur_scale_for(self.scale)
    }

    #[must_use]
    pub fn axis_position(&self, index: i64, unit: f64) -> f64 {
        self.max_range.lo + (index as f64 + 0.5) * unit
    }

    /// Keeps the pannable window overlapping the view on both sides.
    #[must_use]
    pub fn clamp_max_range(&self, low: f64, high: f64, length: f64) -> AxisSpan {
        let view = self.view_range;
        if low >= view.lo && high <= view.hi {
            view
        } else if low >= view.lo {
            AxisSpan::new(view.lo, view.lo + length)
        } else if high <= view.hi {
            AxisSpan::new(view.hi - length, view.hi)
        } else {
            AxisSpan::new(low, high)
        }
    }

    /// Index window covering the view, rounded outward to whole indices.
    #[must_use]
    pub fn visible_index_window(&self, unit: f64) -> Option<IndexRange> {
        if !unit.is_finite() || unit <= 0.0 {
            return None;
        }
        let start = ((self.view_range.lo - self.max_range.lo) / unit).floor();
        let end = ((self.view_range.hi - self.max_range.lo) / unit).ceil();
        if !start.is_finite() || !end.is_finite() {
            return None;
        }
        Some(IndexRange::new(start as i64, end as i64))
    }

    /// Pannable range after zooming to `scale`, keeping the coordinate under
    /// `focus` fixed. Returns `(low, high, length)`.
    #[must_use]
    pub fn zoom_target(&self, focus: f64, scale: f64, axis_length: f64) -> (f64, f64, f64) {
        let point = self.view_range.clamp(focus);
        let new_length = axis_length * cur_scale_for(scale);
        let old_length = self.max_range.length();
        let low_part = if old_length > 0.0 {
            (point - self.max_range.lo) * new_length / old_length
        } else {
            0.0
        };
        let low = point - low_part;
        (low, low + new_length, new_length)
    }
}

#[must_use]
pub fn cur_scale_for(scale: f64) -> f64 {
    0.5 * scale.exp2()
}

/// Allowed `scale` interval: from the whole domain on screen to one index
/// per half view.
#[must_use]
pub fn scale_bounds(index_count: i64) -> (f64, f64) {
    let upper = (2.0 * index_count.max(1) as f64).log2();
    (1.0, upper.max(1.0))
}

/// Parts of `old` not covered by `new`: none, one or two segments.
#[must_use]
pub fn exited_segments(old: IndexRange, new: IndexRange) -> SmallVec<[IndexRange; 2]> {
    let mut segments = SmallVec::new();
    if old.is_empty() {
        return segments;
    }
    if !old.overlaps(new) {
        segments.push(old);
        return segments;
    }
    if old.start < new.start {
        segments.push(IndexRange::new(old.start, new.start - 1));
    }
    if old.end > new.end {
        segments.push(IndexRange::new(new.end + 1, old.end));
    }
    segments
}
