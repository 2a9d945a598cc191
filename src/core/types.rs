use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Screen rectangle occupied by the axis.
///
/// `origin` is the axis anchor: the left end of a horizontal axis, or the
/// bottom end of a vertical axis (which grows upward on screen).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub origin: Point,
    pub size: Size,
}

impl ViewRect {
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.origin.is_finite() && self.size.is_valid()
    }
}

/// Size of the drawing surface hosting the axis.
///
/// Vertical axes measure their coordinate upward from the bottom edge of the
/// surface, so the surface height is needed to map back to screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

impl AxisOrientation {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Closed interval along the axis coordinate, in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSpan {
    pub lo: f64,
    pub hi: f64,
}

impl AxisSpan {
    #[must_use]
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.hi - self.lo
    }

    #[must_use]
    pub fn contains(self, position: f64) -> bool {
        position >= self.lo && position <= self.hi
    }

    #[must_use]
    pub fn clamp(self, position: f64) -> f64 {
        position.max(self.lo).min(self.hi)
    }
}

/// Inclusive window of domain indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexRange {
    pub start: i64,
    pub end: i64,
}

impl IndexRange {
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.end < self.start
    }

    #[must_use]
    pub fn len(self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.end.saturating_sub(self.start).saturating_add(1)
        }
    }

    #[must_use]
    pub fn contains(self, index: i64) -> bool {
        index >= self.start && index <= self.end
    }

    #[must_use]
    pub fn overlaps(self, other: IndexRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start <= other.end && other.start <= self.end
    }

    /// Intersects with `[0, count - 1]`.
    #[must_use]
    pub fn clamp_to_count(self, count: i64) -> Self {
        Self {
            start: self.start.max(0),
            end: self.end.min(count.saturating_sub(1)),
        }
    }
}
