use crate::core::branching_hierarchy::BranchingHierarchy;
use crate::core::domain::{DomainAdapter, DomainValue};
use crate::core::types::Size;
use crate::error::{AxisError, AxisResult};

const ELLIPSIS: &str = "...";

/// Categorical axis over a fixed list of labels.
#[derive(Debug, Clone)]
pub struct LabelDomain {
    labels: Vec<String>,
    max_label_length: usize,
    hierarchy: BranchingHierarchy,
}

impl LabelDomain {
    pub fn new(labels: Vec<String>, max_label_length: usize, children: i64) -> AxisResult<Self> {
        if labels.is_empty() {
            return Err(AxisError::InvalidConfig(
                "label axis requires at least one label".to_owned(),
            ));
        }
        if max_label_length == 0 {
            return Err(AxisError::InvalidConfig(
                "label axis max label length must be > 0".to_owned(),
            ));
        }
        if children < 2 {
            return Err(AxisError::InvalidConfig(
                "children per group must be >= 2".to_owned(),
            ));
        }

        let count = i64::try_from(labels.len()).map_err(|_| {
            AxisError::InvalidConfig("label axis has too many labels".to_owned())
        })?;
        Ok(Self {
            labels,
            max_label_length,
            hierarchy: BranchingHierarchy::new(count, children),
        })
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn label(&self, index: i64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.labels.get(index))
            .map(String::as_str)
    }
}

impl DomainAdapter for LabelDomain {
    fn index_count(&self) -> i64 {
        self.hierarchy.count()
    }

    fn label_for(&self, index: i64, _level: usize) -> String {
        let Some(text) = self.label(index) else {
            return String::new();
        };
        if text.chars().count() > self.max_label_length {
            let mut truncated: String = text.chars().take(self.max_label_length).collect();
            truncated.push_str(ELLIPSIS);
            truncated
        } else {
            text.to_owned()
        }
    }

    fn level_of(&self, index: i64) -> usize {
        self.hierarchy.level_of(index)
    }

    fn indices_in_range(
        &self,
        start: i64,
        end: i64,
        lower_level: usize,
        higher_level: usize,
    ) -> Vec<i64> {
        self.hierarchy
            .indices_in_range(start, end, lower_level, higher_level)
    }

    fn generate_interval_lengths(&mut self) {
        self.hierarchy.generate_interval_lengths();
    }

    fn interval_lengths(&self) -> &[i64] {
        self.hierarchy.interval_lengths()
    }

    fn value_at(&self, index: i64) -> Option<DomainValue> {
        self.label(index).map(|text| DomainValue::Label(text.to_owned()))
    }

    fn preset_label_extent(&self, font_size: f64) -> Size {
        let longest = self
            .labels
            .iter()
            .map(|label| label.chars().count().min(self.max_label_length + ELLIPSIS.len()))
            .max()
            .unwrap_or(0);
        Size::new(longest as f64 * font_size / 2.0, font_size)
    }
}
