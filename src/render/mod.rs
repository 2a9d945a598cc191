mod primitives;
mod recording_provider;

pub(crate) use primitives::VisualIdAllocator;
pub use primitives::{
    AnchorType, Color, LabelAnchor, LabelInstance, TickInstance, VisualId,
};
pub use recording_provider::{ProviderCallCounts, RecordingProvider};

/// Contract implemented by any rendering backend.
///
/// The engine owns every instance and tells the provider when one becomes
/// visible (`add_*`), changes while visible (`update_*`), or leaves the
/// screen (`remove_*`). A removed instance may be added again later.
pub trait VisualProvider {
    fn add_tick(&mut self, tick: &TickInstance);
    fn update_tick(&mut self, tick: &TickInstance);
    fn remove_tick(&mut self, id: VisualId);

    fn add_label(&mut self, label: &LabelInstance);
    fn update_label(&mut self, label: &LabelInstance);
    fn remove_label(&mut self, id: VisualId);

    /// Drops every instance at once, used when the axis is rebuilt.
    fn clear(&mut self);
}
