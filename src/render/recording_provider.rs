use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::{LabelInstance, TickInstance, VisualId, VisualProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProviderCallCounts {
    pub tick_adds: u64,
    pub tick_updates: u64,
    pub tick_removes: u64,
    pub label_adds: u64,
    pub label_updates: u64,
    pub label_removes: u64,
    pub clears: u64,
}

/// Headless provider that mirrors what a real backend would have on screen.
///
/// Used by tests, benches and hosts without a GPU backend. Labels added for
/// the first time are queued so the caller can report measured sizes back to
/// the engine, the way an asynchronous glyph rasterizer would.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    ticks: IndexMap<VisualId, TickInstance>,
    labels: IndexMap<VisualId, LabelInstance>,
    unmeasured: Vec<LabelInstance>,
    seen_labels: HashSet<VisualId>,
    calls: ProviderCallCounts,
    non_finite_instances: u64,
}

impl RecordingProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ticks(&self) -> &IndexMap<VisualId, TickInstance> {
        &self.ticks
    }

    #[must_use]
    pub fn labels(&self) -> &IndexMap<VisualId, LabelInstance> {
        &self.labels
    }

    #[must_use]
    pub fn tick(&self, id: VisualId) -> Option<&TickInstance> {
        self.ticks.get(&id)
    }

    #[must_use]
    pub fn label(&self, id: VisualId) -> Option<&LabelInstance> {
        self.labels.get(&id)
    }

    #[must_use]
    pub fn label_texts(&self) -> Vec<&str> {
        self.labels.values().map(|label| label.text.as_str()).collect()
    }

    #[must_use]
    pub fn calls(&self) -> ProviderCallCounts {
        self.calls
    }

    /// Instances received with NaN or infinite geometry.
    #[must_use]
    pub fn non_finite_instances(&self) -> u64 {
        self.non_finite_instances
    }

    /// Labels added since the last call that have not been measured yet.
    pub fn take_unmeasured_labels(&mut self) -> Vec<LabelInstance> {
        std::mem::take(&mut self.unmeasured)
    }

    fn inspect_tick(&mut self, tick: &TickInstance) {
        let finite = tick.start.is_finite() && tick.end.is_finite() && tick.thickness.is_finite();
        if !finite {
            self.non_finite_instances += 1;
        }
    }

    fn inspect_label(&mut self, label: &LabelInstance) {
        if !label.origin.is_finite() {
            self.non_finite_instances += 1;
        }
    }
}

impl VisualProvider for RecordingProvider {
    fn add_tick(&mut self, tick: &TickInstance) {
        self.calls.tick_adds += 1;
        self.inspect_tick(tick);
        self.ticks.insert(tick.id, *tick);
    }

    fn update_tick(&mut self, tick: &TickInstance) {
        self.calls.tick_updates += 1;
        self.inspect_tick(tick);
        if let Some(existing) = self.ticks.get_mut(&tick.id) {
            *existing = *tick;
        }
    }

    fn remove_tick(&mut self, id: VisualId) {
        self.calls.tick_removes += 1;
        self.ticks.shift_remove(&id);
    }

    fn add_label(&mut self, label: &LabelInstance) {
        self.calls.label_adds += 1;
        self.inspect_label(label);
        if self.seen_labels.insert(label.id) {
            self.unmeasured.push(label.clone());
        }
        self.labels.insert(label.id, label.clone());
    }

    fn update_label(&mut self, label: &LabelInstance) {
        self.calls.label_updates += 1;
        self.inspect_label(label);
        if let Some(existing) = self.labels.get_mut(&label.id) {
            existing.clone_from(label);
        }
    }

    fn remove_label(&mut self, id: VisualId) {
        self.calls.label_removes += 1;
        self.labels.shift_remove(&id);
    }

    fn clear(&mut self) {
        self.calls.clears += 1;
        self.ticks.clear();
        self.labels.clear();
    }
}
