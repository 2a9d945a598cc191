use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::date_domain::DateDomain;
use crate::core::label_domain::LabelDomain;
use crate::core::number_domain::NumberDomain;
use crate::core::types::{AxisOrientation, Size};
use crate::error::AxisResult;

/// Capability set the layout engine needs from an axis kind.
///
/// Indices are integer positions along the axis; levels are granularity
/// tiers where `0` is the finest and larger values group more indices.
pub trait DomainAdapter {
    /// Total addressable indices. Zero means nothing can be laid out.
    fn index_count(&self) -> i64;

    /// Primary text for `index` when shown at `level`.
    fn label_for(&self, index: i64, level: usize) -> String;

    /// Optional coarser-context line stacked under the primary text.
    fn sub_label_for(&self, _index: i64) -> Option<String> {
        None
    }

    /// Highest level at which `index` is still a representative boundary,
    /// capped at `max_level()`.
    fn level_of(&self, index: i64) -> usize;

    /// Indices in `[start, end]` whose own level lies in `[lower_level, higher_level]`.
    ///
    /// Each index is emitted once, at its own level, in ascending level order.
    fn indices_in_range(
        &self,
        start: i64,
        end: i64,
        lower_level: usize,
        higher_level: usize,
    ) -> Vec<i64>;

    /// Rebuilds the per-level stride table.
    fn generate_interval_lengths(&mut self);

    /// Stride between consecutive indices of each level, finest first.
    fn interval_lengths(&self) -> &[i64];

    fn max_level(&self) -> usize {
        self.interval_lengths().len().saturating_sub(1)
    }

    fn value_at(&self, index: i64) -> Option<DomainValue>;

    /// Conservative label extent used until real measurements arrive.
    fn preset_label_extent(&self, font_size: f64) -> Size;

    /// Factor applied to the label extent along the axis when picking levels.
    fn label_extent_scale(&self, _orientation: AxisOrientation) -> f64 {
        1.0
    }
}

/// Domain value at an axis position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DomainValue {
    Label(String),
    Number(f64),
    Date(DateTime<Utc>),
}

impl DomainValue {
    /// Default text used by range labels.
    #[must_use]
    pub fn default_text(&self) -> String {
        match self {
            Self::Label(text) => text.clone(),
            Self::Number(value) => format!("{value:.2}"),
            Self::Date(time) => time.format("%b %d %Y, %H:%M:%S").to_string(),
        }
    }
}

const fn default_max_label_length() -> usize {
    10
}

const fn default_number_gap() -> f64 {
    1.0
}

/// Serializable description of what the axis shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainSpec {
    Label {
        labels: Vec<String>,
        #[serde(default = "default_max_label_length")]
        max_label_length: usize,
    },
    Number {
        start: f64,
        end: f64,
        #[serde(default = "default_number_gap")]
        gap: f64,
        #[serde(default)]
        decimal_length: Option<u32>,
    },
    Date {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl DomainSpec {
    #[must_use]
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Label {
            labels: labels.into_iter().map(Into::into).collect(),
            max_label_length: default_max_label_length(),
        }
    }

    #[must_use]
    pub fn number(start: f64, end: f64) -> Self {
        Self::Number {
            start,
            end,
            gap: default_number_gap(),
            decimal_length: None,
        }
    }

    #[must_use]
    pub fn date(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::Date { start, end }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Label { .. } => "label",
            Self::Number { .. } => "number",
            Self::Date { .. } => "date",
        }
    }
}

/// Concrete adapter selected by a [`DomainSpec`].
#[derive(Debug, Clone)]
pub enum AxisDomain {
    Label(LabelDomain),
    Number(NumberDomain),
    Date(DateDomain),
}

impl AxisDomain {
    pub fn from_spec(spec: &DomainSpec, children_per_group: u32) -> AxisResult<Self> {
        let children = i64::from(children_per_group);
        match spec {
            DomainSpec::Label {
                labels,
                max_label_length,
            } => Ok(Self::Label(LabelDomain::new(
                labels.clone(),
                *max_label_length,
                children,
            )?)),
            DomainSpec::Number {
                start,
                end,
                gap,
                decimal_length,
            } => Ok(Self::Number(NumberDomain::new(
                *start,
                *end,
                *gap,
                *decimal_length,
                children,
            )?)),
            DomainSpec::Date { start, end } => Ok(Self::Date(DateDomain::new(*start, *end))),
        }
    }

    #[must_use]
    pub fn adapter(&self) -> &dyn DomainAdapter {
        match self {
            Self::Label(domain) => domain,
            Self::Number(domain) => domain,
            Self::Date(domain) => domain,
        }
    }

    pub fn adapter_mut(&mut self) -> &mut dyn DomainAdapter {
        match self {
            Self::Label(domain) => domain,
            Self::Number(domain) => domain,
            Self::Date(domain) => domain,
        }
    }
}
