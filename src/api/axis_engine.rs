use crate::core::{
    AxisDomain, AxisOrientation, AxisSpan, DomainAdapter, IndexRange, Point, SurfaceSize, ViewRect,
};
use crate::render::{VisualIdAllocator, VisualProvider};

use super::{
    AxisConfiguration, Bucket, BucketStore, LabelMetrics, LevelState, RangeFormatter,
    ViewportState, range_labels::AxisDecorations,
};

/// Level-of-detail axis engine.
///
/// `AxisEngine` owns the pan/zoom state, the granularity levels and every
/// tick/label bucket, and drives a [`VisualProvider`] with incremental
/// add/update/remove calls.
pub struct AxisEngine<P: VisualProvider> {
    pub(super) provider: P,
    pub(super) core: AxisCore,
}

/// Engine state kept apart from the provider so both can be borrowed at once.
pub(super) struct AxisCore {
    pub(super) config: AxisConfiguration,
    pub(super) domain: AxisDomain,
    pub(super) buckets: BucketStore,
    pub(super) levels: LevelState,
    pub(super) viewport: ViewportState,
    pub(super) metrics: LabelMetrics,
    pub(super) ids: VisualIdAllocator,
    pub(super) decorations: AxisDecorations,
    pub(super) range_formatter: Option<RangeFormatter>,
}

impl AxisCore {
    pub(super) fn adapter(&self) -> &dyn DomainAdapter {
        self.domain.adapter()
    }

    pub(super) fn axis_length(&self) -> f64 {
        let size = self.config.view.size;
        match self.config.orientation {
            AxisOrientation::Horizontal => size.width,
            AxisOrientation::Vertical => size.height,
        }
    }

    /// Pixels per index at zoom factor 1. Zero for an empty domain.
    pub(super) fn base_unit(&self) -> f64 {
        let count = self.adapter().index_count();
        if count <= 0 {
            return 0.0;
        }
        self.axis_length() / count as f64
    }

    pub(super) fn unit(&self) -> f64 {
        self.base_unit() * self.viewport.cur_scale()
    }

    /// Label extent along the axis used to pick levels.
    pub(super) fn max_label_extent(&self) -> f64 {
        let orientation = self.config.orientation;
        self.metrics.extent_along(orientation) * self.adapter().label_extent_scale(orientation)
    }

    /// Fixed visible window for the configured view and orientation.
    pub(super) fn view_range(&self) -> AxisSpan {
        let ViewRect { origin, size } = self.config.view;
        match self.config.orientation {
            AxisOrientation::Horizontal => AxisSpan::new(origin.x, origin.x + size.width),
            AxisOrientation::Vertical => {
                let base = self.config.surface.height - origin.y;
                AxisSpan::new(base, base + size.height)
            }
        }
    }

    pub(super) fn to_screen(&self, coordinate: f64) -> Point {
        let origin = self.config.view.origin;
        match self.config.orientation {
            AxisOrientation::Horizontal => Point::new(coordinate, origin.y),
            AxisOrientation::Vertical => {
                Point::new(origin.x, self.config.surface.height - coordinate)
            }
        }
    }

    pub(super) fn to_axis(&self, point: Point) -> f64 {
        match self.config.orientation {
            AxisOrientation::Horizontal => point.x,
            AxisOrientation::Vertical => self.config.surface.height - point.y,
        }
    }
}

impl<P: VisualProvider> AxisEngine<P> {
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    #[must_use]
    pub fn into_provider(self) -> P {
        self.provider
    }

    #[must_use]
    pub fn config(&self) -> &AxisConfiguration {
        &self.core.config
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.core.config.orientation
    }

    #[must_use]
    pub fn view(&self) -> ViewRect {
        self.core.config.view
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.core.config.surface
    }

    #[must_use]
    pub fn domain(&self) -> &dyn DomainAdapter {
        self.core.adapter()
    }

    #[must_use]
    pub fn levels(&self) -> LevelState {
        self.core.levels
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.core.viewport
    }

    #[must_use]
    pub fn index_range(&self) -> IndexRange {
        self.core.viewport.index_range
    }

    /// Zoom factor `0.5 * 2^scale`.
    #[must_use]
    pub fn cur_scale(&self) -> f64 {
        self.core.viewport.cur_scale()
    }

    /// Pixels per index at the current zoom.
    #[must_use]
    pub fn unit(&self) -> f64 {
        self.core.unit()
    }

    #[must_use]
    pub fn bucket(&self, index: i64) -> Option<&Bucket> {
        self.core.buckets.get(index)
    }

    #[must_use]
    pub fn buckets(&self) -> &BucketStore {
        &self.core.buckets
    }
}
