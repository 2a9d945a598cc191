use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{AxisDomain, DomainSpec};
use crate::error::AxisResult;
use crate::render::VisualProvider;

use super::{AxisEngine, LabelMetrics};

impl<P: VisualProvider> AxisEngine<P> {
    /// Replaces the axis domain.
    ///
    /// Every bucket is destroyed and the zoom, levels and measured label
    /// sizes start over. On error the current domain stays in place.
    pub fn set_range(&mut self, spec: DomainSpec) -> AxisResult<()> {
        let domain = AxisDomain::from_spec(&spec, self.core.config.children_per_group)?;
        let preset = domain
            .adapter()
            .preset_label_extent(self.core.config.style.label_font_size);
        debug!(
            domain = spec.kind_name(),
            index_count = domain.adapter().index_count(),
            "set axis range"
        );

        self.core.config.domain = spec;
        self.core.domain = domain;
        self.core.metrics = LabelMetrics::with_preset(preset);
        self.core.levels.reset();
        self.rebuild();
        Ok(())
    }

    /// Switches to a label axis, keeping the configured truncation length
    /// when the axis already shows labels.
    pub fn set_labels<I, S>(&mut self, labels: I) -> AxisResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = labels.into_iter().map(Into::into).collect();
        let spec = match &self.core.config.domain {
            DomainSpec::Label {
                max_label_length, ..
            } => DomainSpec::Label {
                labels,
                max_label_length: *max_label_length,
            },
            _ => DomainSpec::labels::<Vec<String>, String>(labels),
        };
        self.set_range(spec)
    }

    /// Switches to a numeric axis over `[start, end]` stepping by `gap`.
    pub fn set_number_range(&mut self, start: f64, end: f64, gap: f64) -> AxisResult<()> {
        let decimal_length = match &self.core.config.domain {
            DomainSpec::Number { decimal_length, .. } => *decimal_length,
            _ => None,
        };
        self.set_range(DomainSpec::Number {
            start,
            end,
            gap,
            decimal_length,
        })
    }

    pub fn set_date_range(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> AxisResult<()> {
        self.set_range(DomainSpec::date(start, end))
    }
}
