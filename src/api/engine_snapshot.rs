use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AxisOrientation, ViewRect};
use crate::error::{AxisError, AxisResult};
use crate::render::VisualProvider;

use super::{AxisEngine, LabelMetrics, LevelState, ViewportState};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSnapshot {
    pub domain_kind: String,
    pub orientation: AxisOrientation,
    pub view: ViewRect,
    pub index_count: i64,
    pub max_level: usize,
    pub levels: LevelState,
    pub viewport: ViewportState,
    pub cur_scale: f64,
    pub unit: f64,
    pub label_metrics: LabelMetrics,
    pub bucket_count: usize,
    pub attached_ticks: usize,
    pub attached_labels: usize,
    /// Main label text of every attached label bucket, by ascending index.
    pub visible_labels: IndexMap<i64, String>,
    pub range_texts: Option<(String, String)>,
}

impl<P: VisualProvider> AxisEngine<P> {
    #[must_use]
    pub fn snapshot(&self) -> AxisSnapshot {
        let adapter = self.core.adapter();
        let visible_labels = self
            .core
            .buckets
            .iter()
            .filter(|(_, bucket)| bucket.show_labels())
            .filter_map(|(index, bucket)| {
                bucket
                    .labels()
                    .map(|part| (index, part.main.text.clone()))
            })
            .collect();
        let range_texts = self
            .core
            .decorations
            .range_labels()
            .map(|[head, tail]| (head.text.clone(), tail.text.clone()));

        AxisSnapshot {
            domain_kind: self.core.config.domain.kind_name().to_owned(),
            orientation: self.core.config.orientation,
            view: self.core.config.view,
            index_count: adapter.index_count(),
            max_level: adapter.max_level(),
            levels: self.core.levels,
            viewport: self.core.viewport,
            cur_scale: self.core.viewport.cur_scale(),
            unit: self.core.unit(),
            label_metrics: self.core.metrics,
            bucket_count: self.core.buckets.len(),
            attached_ticks: self.core.buckets.attached_tick_count(),
            attached_labels: self.core.buckets.attached_label_count(),
            visible_labels,
            range_texts,
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| AxisError::InvalidInput(format!("failed to serialize snapshot: {e}")))
    }
}
