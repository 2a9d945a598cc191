use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{AxisError, AxisResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Same channels with `alpha` clamped into `[0, 1]`.
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self { alpha, ..self }
    }

    pub fn validate(self, field_name: &str) -> AxisResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AxisError::InvalidConfig(format!(
                    "{field_name} channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Identity of one visual instance handed to a provider.
///
/// Ids are never reused within an engine, so late notifications about a
/// destroyed instance can be recognized and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualId(pub u64);

#[derive(Debug, Default)]
pub(crate) struct VisualIdAllocator {
    next: u64,
}

impl VisualIdAllocator {
    pub(crate) fn allocate(&mut self) -> VisualId {
        self.next += 1;
        VisualId(self.next)
    }
}

/// Line segment with a per-end color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickInstance {
    pub id: VisualId,
    pub start: Point,
    pub end: Point,
    pub thickness: f64,
    pub start_color: Color,
    pub end_color: Color,
}

impl TickInstance {
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.start_color.alpha
    }
}

/// Which point of the label box sits on the label origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorType {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchor {
    pub kind: AnchorType,
    pub padding: f64,
}

/// Anchored text element. Its pixel size is unknown until the provider
/// reports it back through `AxisEngine::on_label_measured`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelInstance {
    pub id: VisualId,
    pub text: String,
    pub origin: Point,
    pub font_size: f64,
    pub color: Color,
    pub anchor: LabelAnchor,
}

impl LabelInstance {
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.color.alpha
    }
}
