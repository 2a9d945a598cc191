use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{AxisOrientation, Size};
use crate::render::{VisualId, VisualProvider};

use super::AxisEngine;

/// Largest label size reported so far next to the pre-measurement estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelMetrics {
    pub measured: Size,
    pub preset: Size,
}

/// Which measured dimensions grew on the last observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct MetricsGrowth {
    pub(super) width: bool,
    pub(super) height: bool,
}

impl MetricsGrowth {
    pub(super) fn along(self, orientation: AxisOrientation) -> bool {
        match orientation {
            AxisOrientation::Horizontal => self.width,
            AxisOrientation::Vertical => self.height,
        }
    }
}

impl LabelMetrics {
    #[must_use]
    pub fn with_preset(preset: Size) -> Self {
        Self {
            measured: Size::default(),
            preset,
        }
    }

    /// Label extent along the axis: the measured maximum once any label was
    /// measured, the estimate before that.
    #[must_use]
    pub fn extent_along(&self, orientation: AxisOrientation) -> f64 {
        let (measured, preset) = match orientation {
            AxisOrientation::Horizontal => (self.measured.width, self.preset.width),
            AxisOrientation::Vertical => (self.measured.height, self.preset.height),
        };
        if measured > 0.0 { measured } else { preset }
    }

    /// Folds `size` into the running maximum. Never shrinks.
    pub(super) fn observe(&mut self, size: Size) -> MetricsGrowth {
        let mut growth = MetricsGrowth::default();
        if size.width > self.measured.width {
            self.measured.width = size.width;
            growth.width = true;
        }
        if size.height > self.measured.height {
            self.measured.height = size.height;
            growth.height = true;
        }
        growth
    }
}

impl<P: VisualProvider> AxisEngine<P> {
    /// Reports the rendered size of a label previously handed to the provider.
    ///
    /// Unknown or released labels are ignored, as are repeated reports. When
    /// the largest extent along the axis grows, levels and layout are redone.
    /// Returns `true` when a relayout happened.
    pub fn on_label_measured(&mut self, label: VisualId, size: Size) -> bool {
        if !size.width.is_finite() || !size.height.is_finite() {
            trace!(label = label.0, "ignoring non-finite label measurement");
            return false;
        }
        let Some(index) = self.core.buckets.label_owner(label) else {
            trace!(label = label.0, "ignoring measurement for released label");
            return false;
        };

        let growth = self.core.metrics.observe(size);
        if !growth.along(self.core.config.orientation) {
            return false;
        }

        debug!(
            index,
            width = self.core.metrics.measured.width,
            height = self.core.metrics.measured.height,
            "label extent grew"
        );
        self.update_interval();
        self.update_index_range();
        self.layout_buckets();
        true
    }

    #[must_use]
    pub fn label_metrics(&self) -> LabelMetrics {
        self.core.metrics
    }
}
