use tracing::debug;

use crate::core::AxisDomain;
use crate::error::AxisResult;
use crate::render::{VisualIdAllocator, VisualProvider};

use super::{
    AxisConfiguration, AxisEngine, BucketStore, LabelMetrics, LevelState, ViewportState,
    axis_engine::AxisCore, range_labels::AxisDecorations,
};

impl<P: VisualProvider> AxisEngine<P> {
    /// Validates `config`, builds the domain adapter and lays out the first
    /// frame on `provider`.
    pub fn new(provider: P, config: AxisConfiguration) -> AxisResult<Self> {
        config.validate()?;
        let domain = AxisDomain::from_spec(&config.domain, config.children_per_group)?;
        let preset = domain
            .adapter()
            .preset_label_extent(config.style.label_font_size);

        let mut engine = Self {
            provider,
            core: AxisCore {
                config,
                domain,
                buckets: BucketStore::default(),
                levels: LevelState::default(),
                viewport: ViewportState::default(),
                metrics: LabelMetrics::with_preset(preset),
                ids: VisualIdAllocator::default(),
                decorations: AxisDecorations::default(),
                range_formatter: None,
            },
        };
        debug!(
            domain = engine.core.config.domain.kind_name(),
            index_count = engine.core.adapter().index_count(),
            orientation = ?engine.core.config.orientation,
            "axis engine created"
        );
        engine.rebuild();
        Ok(engine)
    }

    /// Drops every bucket and decoration, then lays the axis out from zoom 1.
    pub(super) fn rebuild(&mut self) {
        self.remove_all();
        let view_range = self.core.view_range();
        let count = self.core.adapter().index_count();
        self.core.viewport.reset(view_range, count);
        self.update_interval();
        self.draw_edge_markers();
        self.update_index_range();
        self.layout_labels();
    }

    /// Destroys all buckets and clears the provider.
    pub(super) fn remove_all(&mut self) {
        let released = self.core.buckets.len();
        self.core.buckets.clear(&mut self.provider);
        self.core.decorations.mark_detached();
        debug!(released, "removed all axis buckets");
    }
}
