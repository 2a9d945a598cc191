use serde::{Deserialize, Serialize};

use crate::core::{AxisOrientation, DomainSpec, SurfaceSize, ViewRect};
use crate::error::{AxisError, AxisResult};
use crate::render::Color;

/// Visual tuning shared by ticks, labels and edge markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    pub tick_length: f64,
    pub tick_width: f64,
    pub tick_color: Color,
    pub label_font_size: f64,
    pub label_color: Color,
    pub label_padding: f64,
    pub range_label_color: Color,
    pub edge_marker_length: f64,
    pub edge_marker_color: Color,
    /// Zoom ratio over which a newly revealed level fades from 0 to 1.
    pub fade_window_ratio: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            tick_length: 10.0,
            tick_width: 1.0,
            tick_color: Color::rgb(1.0, 1.0, 1.0),
            label_font_size: 12.0,
            label_color: Color::rgba(0.8, 0.8, 0.8, 1.0),
            label_padding: 10.0,
            range_label_color: Color::rgba(1.0, 1.0, 1.0, 0.5),
            edge_marker_length: 40.0,
            edge_marker_color: Color::rgb(1.0, 0.0, 0.0),
            fade_window_ratio: 1.5,
        }
    }
}

impl AxisStyle {
    pub fn validate(self) -> AxisResult<Self> {
        for (name, value) in [
            ("tick length", self.tick_length),
            ("tick width", self.tick_width),
            ("label font size", self.label_font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AxisError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("label padding", self.label_padding),
            ("edge marker length", self.edge_marker_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AxisError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.fade_window_ratio.is_finite() || self.fade_window_ratio <= 1.0 {
            return Err(AxisError::InvalidConfig(
                "fade window ratio must be finite and > 1".to_owned(),
            ));
        }
        self.tick_color.validate("tick color")?;
        self.label_color.validate("label color")?;
        self.range_label_color.validate("range label color")?;
        self.edge_marker_color.validate("edge marker color")?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalRangeSide {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalRangeSide {
    Left,
    Right,
}

/// Placement of the two labels showing the values at the viewport ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeLabelBehavior {
    pub enabled: bool,
    pub horizontal_side: HorizontalRangeSide,
    pub vertical_side: VerticalRangeSide,
}

impl Default for RangeLabelBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            horizontal_side: HorizontalRangeSide::Above,
            vertical_side: VerticalRangeSide::Left,
        }
    }
}

/// Public axis bootstrap configuration.
///
/// Serializable so hosts can persist axis setup next to their chart state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfiguration {
    pub domain: DomainSpec,
    pub view: ViewRect,
    pub surface: SurfaceSize,
    #[serde(default = "default_orientation")]
    pub orientation: AxisOrientation,
    #[serde(default)]
    pub style: AxisStyle,
    #[serde(default = "default_children_per_group")]
    pub children_per_group: u32,
    #[serde(default)]
    pub range_labels: RangeLabelBehavior,
    #[serde(default = "default_true")]
    pub resize_with_surface: bool,
    #[serde(default = "default_true")]
    pub edge_markers: bool,
}

impl AxisConfiguration {
    #[must_use]
    pub fn new(domain: DomainSpec, view: ViewRect, surface: SurfaceSize) -> Self {
        Self {
            domain,
            view,
            surface,
            orientation: default_orientation(),
            style: AxisStyle::default(),
            children_per_group: default_children_per_group(),
            range_labels: RangeLabelBehavior::default(),
            resize_with_surface: true,
            edge_markers: true,
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: AxisOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_children_per_group(mut self, children_per_group: u32) -> Self {
        self.children_per_group = children_per_group;
        self
    }

    #[must_use]
    pub fn with_range_labels(mut self, range_labels: RangeLabelBehavior) -> Self {
        self.range_labels = range_labels;
        self
    }

    #[must_use]
    pub fn with_resize_with_surface(mut self, enabled: bool) -> Self {
        self.resize_with_surface = enabled;
        self
    }

    #[must_use]
    pub fn with_edge_markers(mut self, enabled: bool) -> Self {
        self.edge_markers = enabled;
        self
    }

    /// Checks everything except the domain, which is validated when its
    /// adapter is built.
    pub fn validate(&self) -> AxisResult<()> {
        validate_view(self.view)?;
        if !self.surface.is_valid() {
            return Err(AxisError::InvalidConfig(format!(
                "surface size must be finite and > 0 (width={}, height={})",
                self.surface.width, self.surface.height
            )));
        }
        if self.children_per_group < 2 {
            return Err(AxisError::InvalidConfig(
                "children per group must be >= 2".to_owned(),
            ));
        }
        self.style.validate()?;
        Ok(())
    }

    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to parse axis configuration: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to serialize axis configuration: {e}"))
        })
    }
}

pub(super) fn validate_view(view: ViewRect) -> AxisResult<()> {
    if view.is_valid() {
        Ok(())
    } else {
        Err(AxisError::InvalidView {
            width: view.size.width,
            height: view.size.height,
        })
    }
}

fn default_orientation() -> AxisOrientation {
    AxisOrientation::Vertical
}

fn default_children_per_group() -> u32 {
    2
}

fn default_true() -> bool {
    true
}
