use std::collections::{BTreeMap, HashMap};

use crate::core::IndexRange;
use crate::render::{LabelInstance, TickInstance, VisualId, VisualProvider};

/// Tick visual of one bucket and whether the provider currently shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct TickPart {
    pub instance: TickInstance,
    pub attached: bool,
}

/// Label visuals of one bucket. `sub` is the optional second line.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPart {
    pub main: LabelInstance,
    pub sub: Option<LabelInstance>,
    pub attached: bool,
}

/// Persistent record for one domain index.
///
/// Tick and label parts are independent: each is absent until first shown,
/// then kept and updated in place, attached or detached as it scrolls in and
/// out of view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bucket {
    tick: Option<TickPart>,
    labels: Option<LabelPart>,
}

impl Bucket {
    #[must_use]
    pub fn tick(&self) -> Option<&TickPart> {
        self.tick.as_ref()
    }

    #[must_use]
    pub fn labels(&self) -> Option<&LabelPart> {
        self.labels.as_ref()
    }

    #[must_use]
    pub fn show_tick(&self) -> bool {
        self.tick.as_ref().is_some_and(|part| part.attached)
    }

    #[must_use]
    pub fn show_labels(&self) -> bool {
        self.labels.as_ref().is_some_and(|part| part.attached)
    }

    /// Stores `instance` as this bucket's tick and makes sure it is attached.
    /// An existing tick keeps its identity and is updated in place.
    pub(super) fn place_tick<P: VisualProvider>(&mut self, instance: TickInstance, provider: &mut P) {
        match self.tick.as_mut() {
            Some(part) if part.attached => {
                provider.update_tick(&instance);
                part.instance = instance;
            }
            Some(part) => {
                provider.add_tick(&instance);
                part.instance = instance;
                part.attached = true;
            }
            None => {
                provider.add_tick(&instance);
                self.tick = Some(TickPart {
                    instance,
                    attached: true,
                });
            }
        }
    }

    /// Label counterpart of [`Bucket::place_tick`]. A sub line that appears
    /// or disappears while attached is added or removed on its own.
    pub(super) fn place_labels<P: VisualProvider>(
        &mut self,
        main: LabelInstance,
        sub: Option<LabelInstance>,
        provider: &mut P,
    ) {
        match self.labels.as_mut() {
            Some(part) if part.attached => {
                provider.update_label(&main);
                match (&part.sub, &sub) {
                    (Some(old), None) => provider.remove_label(old.id),
                    (Some(old), Some(new)) if old.id == new.id => provider.update_label(new),
                    (Some(old), Some(new)) => {
                        provider.remove_label(old.id);
                        provider.add_label(new);
                    }
                    (None, Some(new)) => provider.add_label(new),
                    (None, None) => {}
                }
                part.main = main;
                part.sub = sub;
            }
            Some(part) => {
                provider.add_label(&main);
                if let Some(sub) = &sub {
                    provider.add_label(sub);
                }
                part.main = main;
                part.sub = sub;
                part.attached = true;
            }
            None => {
                provider.add_label(&main);
                if let Some(sub) = &sub {
                    provider.add_label(sub);
                }
                self.labels = Some(LabelPart {
                    main,
                    sub,
                    attached: true,
                });
            }
        }
    }

    pub(super) fn detach_tick<P: VisualProvider>(&mut self, provider: &mut P) -> bool {
        match self.tick.as_mut() {
            Some(part) if part.attached => {
                part.attached = false;
                provider.remove_tick(part.instance.id);
                true
            }
            _ => false,
        }
    }

    pub(super) fn detach_labels<P: VisualProvider>(&mut self, provider: &mut P) -> bool {
        match self.labels.as_mut() {
            Some(part) if part.attached => {
                part.attached = false;
                provider.remove_label(part.main.id);
                if let Some(sub) = &part.sub {
                    provider.remove_label(sub.id);
                }
                true
            }
            _ => false,
        }
    }
}

/// Sparse map from domain index to its bucket.
#[derive(Debug, Default)]
pub struct BucketStore {
    buckets: BTreeMap<i64, Bucket>,
    label_owners: HashMap<VisualId, i64>,
}

impl BucketStore {
    #[must_use]
    pub fn get(&self, index: i64) -> Option<&Bucket> {
        self.buckets.get(&index)
    }

    pub(super) fn get_mut(&mut self, index: i64) -> Option<&mut Bucket> {
        self.buckets.get_mut(&index)
    }

    /// Returns the bucket for `index`, allocating an empty one if needed.
    /// Existing visual handles are never replaced here.
    pub(super) fn get_or_create(&mut self, index: i64) -> &mut Bucket {
        self.buckets.entry(index).or_default()
    }

    /// Detaches and destroys the bucket at `index`.
    pub fn remove<P: VisualProvider>(&mut self, index: i64, provider: &mut P) -> bool {
        let Some(mut bucket) = self.buckets.remove(&index) else {
            return false;
        };
        bucket.detach_tick(provider);
        bucket.detach_labels(provider);
        if let Some(part) = bucket.labels() {
            self.label_owners.remove(&part.main.id);
        }
        true
    }

    /// Detaches and destroys every bucket, then clears the provider.
    pub fn clear<P: VisualProvider>(&mut self, provider: &mut P) {
        for bucket in self.buckets.values_mut() {
            bucket.detach_tick(provider);
            bucket.detach_labels(provider);
        }
        self.buckets.clear();
        self.label_owners.clear();
        provider.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &Bucket)> {
        self.buckets.iter().map(|(index, bucket)| (*index, bucket))
    }

    /// Indices with a bucket inside `range`, ascending.
    #[must_use]
    pub fn indices_within(&self, range: IndexRange) -> Vec<i64> {
        if range.is_empty() {
            return Vec::new();
        }
        self.buckets
            .range(range.start..=range.end)
            .map(|(index, _)| *index)
            .collect()
    }

    #[must_use]
    pub fn attached_tick_count(&self) -> usize {
        self.buckets.values().filter(|bucket| bucket.show_tick()).count()
    }

    #[must_use]
    pub fn attached_label_count(&self) -> usize {
        self.buckets
            .values()
            .filter(|bucket| bucket.show_labels())
            .count()
    }

    pub(super) fn track_main_label(&mut self, label: VisualId, index: i64) {
        self.label_owners.insert(label, index);
    }

    /// Index owning the main label `label`, if that label is still alive.
    #[must_use]
    pub fn label_owner(&self, label: VisualId) -> Option<i64> {
        self.label_owners.get(&label).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point;
    use crate::render::{AnchorType, Color, LabelAnchor, RecordingProvider};

    fn tick(id: u64) -> TickInstance {
        TickInstance {
            id: VisualId(id),
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, 10.0),
            thickness: 1.0,
            start_color: Color::rgb(1.0, 1.0, 1.0),
            end_color: Color::rgb(1.0, 1.0, 1.0),
        }
    }

    fn label(id: u64) -> LabelInstance {
        LabelInstance {
            id: VisualId(id),
            text: "Jan".to_owned(),
            origin: Point::new(0.0, 0.0),
            font_size: 12.0,
            color: Color::rgb(1.0, 1.0, 1.0),
            anchor: LabelAnchor {
                kind: AnchorType::TopMiddle,
                padding: 10.0,
            },
        }
    }

    #[test]
    fn get_or_create_keeps_existing_handles() {
        let mut provider = RecordingProvider::new();
        let mut store = BucketStore::default();
        store.get_or_create(3).place_tick(tick(1), &mut provider);
        let bucket = store.get_or_create(3);
        assert_eq!(bucket.tick().map(|part| part.instance.id), Some(VisualId(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn detaching_keeps_the_bucket_and_reattaching_reuses_it() {
        let mut provider = RecordingProvider::new();
        let mut store = BucketStore::default();
        store.get_or_create(0).place_tick(tick(1), &mut provider);
        let bucket = store.get_mut(0).expect("bucket");
        assert!(bucket.detach_tick(&mut provider));
        assert!(!bucket.detach_tick(&mut provider));
        assert!(provider.ticks().is_empty());

        bucket.place_tick(tick(1), &mut provider);
        assert!(bucket.show_tick());
        bucket.place_tick(tick(1), &mut provider);
        assert_eq!(provider.calls().tick_adds, 2);
        assert_eq!(provider.calls().tick_updates, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_and_clear_release_visuals_and_label_owners() {
        let mut provider = RecordingProvider::new();
        let mut store = BucketStore::default();
        store
            .get_or_create(1)
            .place_labels(label(7), Some(label(8)), &mut provider);
        store.track_main_label(VisualId(7), 1);
        store.get_or_create(2).place_tick(tick(9), &mut provider);
        assert_eq!(provider.labels().len(), 2);

        assert!(store.remove(1, &mut provider));
        assert!(provider.labels().is_empty());
        assert_eq!(store.label_owner(VisualId(7)), None);

        store.clear(&mut provider);
        assert!(store.is_empty());
        assert!(provider.ticks().is_empty());
        assert_eq!(provider.calls().clears, 1);
    }

    #[test]
    fn dropping_sub_line_while_attached_removes_only_it() {
        let mut provider = RecordingProvider::new();
        let mut bucket = Bucket::default();
        bucket.place_labels(label(1), Some(label(2)), &mut provider);
        bucket.place_labels(label(1), None, &mut provider);
        assert_eq!(provider.labels().len(), 1);
        assert!(provider.label(VisualId(1)).is_some());
        assert!(bucket.labels().is_some_and(|part| part.sub.is_none()));
    }

    #[test]
    fn indices_within_uses_ordered_range_scan() {
        let mut store = BucketStore::default();
        for index in [1, 5, 9, 12] {
            store.get_or_create(index);
        }
        assert_eq!(store.indices_within(IndexRange::new(4, 10)), vec![5, 9]);
        assert!(store.indices_within(IndexRange::new(10, 4)).is_empty());
    }
}
