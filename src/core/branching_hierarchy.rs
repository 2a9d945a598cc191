use crate::core::primitives::integer_log;
use crate::core::types::IndexRange;

/// Regular level ladder where level `k` groups `children^k` indices.
///
/// Shared by the label and number axes, whose indices are evenly spaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchingHierarchy {
    count: i64,
    children: i64,
    interval_lengths: Vec<i64>,
}

impl BranchingHierarchy {
    #[must_use]
    pub fn new(count: i64, children: i64) -> Self {
        let mut hierarchy = Self {
            count: count.max(0),
            children,
            interval_lengths: Vec::new(),
        };
        hierarchy.generate_interval_lengths();
        hierarchy
    }

    #[must_use]
    pub fn count(&self) -> i64 {
        self.count
    }

    #[must_use]
    pub fn children(&self) -> i64 {
        self.children
    }

    #[must_use]
    pub fn max_level(&self) -> usize {
        integer_log(self.count, self.children)
    }

    pub fn generate_interval_lengths(&mut self) {
        let max_level = self.max_level();
        self.interval_lengths.clear();
        self.interval_lengths.push(1);
        let mut interval: i64 = 1;
        for _ in 0..max_level {
            interval = interval.saturating_mul(self.children);
            self.interval_lengths.push(interval);
        }
    }

    #[must_use]
    pub fn interval_lengths(&self) -> &[i64] {
        &self.interval_lengths
    }

    /// Index `0` anchors the whole ladder; other indices count how many
    /// times they divide evenly by the branching factor.
    #[must_use]
    pub fn level_of(&self, index: i64) -> usize {
        let max_level = self.max_level();
        if index == 0 {
            return max_level;
        }
        let mut remaining = index.abs();
        let mut level = 0;
        while level < max_level && remaining % self.children == 0 {
            remaining /= self.children;
            level += 1;
        }
        level
    }

    #[must_use]
    pub fn indices_in_range(
        &self,
        start: i64,
        end: i64,
        lower_level: usize,
        higher_level: usize,
    ) -> Vec<i64> {
        let IndexRange { start, end } = IndexRange::new(start, end).clamp_to_count(self.count);
        let higher_level = higher_level.min(self.max_level());
        let mut indices = Vec::new();
        if end < start || lower_level > higher_level {
            return indices;
        }

        for level in lower_level..=higher_level {
            let interval = self.interval_lengths[level];
            let first = start.div_euclid(interval)
                + i64::from(start.rem_euclid(interval) != 0);
            let mut index = first * interval;
            while index <= end {
                if self.level_of(index) == level {
                    indices.push(index);
                }
                index += interval;
            }
        }
        indices
    }
}
