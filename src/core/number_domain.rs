use rust_decimal::Decimal;

use crate::core::branching_hierarchy::BranchingHierarchy;
use crate::core::domain::{DomainAdapter, DomainValue};
use crate::core::primitives::f64_to_decimal;
use crate::core::types::Size;
use crate::error::{AxisError, AxisResult};

/// Upper bound on the number of steps a numeric axis may hold. Keeps index
/// window arithmetic and `index as f64` positions exact.
pub const MAX_NUMBER_INDEX_COUNT: i64 = 1 << 48;

/// Evenly spaced numeric axis: index `i` maps to `start + i * gap`.
#[derive(Debug, Clone)]
pub struct NumberDomain {
    start: f64,
    end: f64,
    gap: f64,
    start_decimal: Decimal,
    gap_decimal: Decimal,
    decimal_length: Option<u32>,
    hierarchy: BranchingHierarchy,
}

impl NumberDomain {
    pub fn new(
        start: f64,
        end: f64,
        gap: f64,
        decimal_length: Option<u32>,
        children: i64,
    ) -> AxisResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(AxisError::InvalidConfig(
                "number axis range must be finite".to_owned(),
            ));
        }
        if !gap.is_finite() || gap <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "number axis gap must be finite and > 0".to_owned(),
            ));
        }
        if children < 2 {
            return Err(AxisError::InvalidConfig(
                "children per group must be >= 2".to_owned(),
            ));
        }
        if let Some(length) = decimal_length {
            if length > 20 {
                return Err(AxisError::InvalidConfig(
                    "number axis decimal length must be <= 20".to_owned(),
                ));
            }
        }

        let start_decimal = f64_to_decimal(start, "number axis start")?;
        let gap_decimal = f64_to_decimal(gap, "number axis gap")?;
        // A reversed range yields no indices rather than an error.
        let steps = ((end - start) / gap).floor();
        if !steps.is_finite() || steps >= MAX_NUMBER_INDEX_COUNT as f64 {
            return Err(AxisError::InvalidConfig(format!(
                "number axis range must hold fewer than {MAX_NUMBER_INDEX_COUNT} steps"
            )));
        }
        let count = if steps >= 0.0 { steps as i64 + 1 } else { 0 };

        Ok(Self {
            start,
            end,
            gap,
            start_decimal,
            gap_decimal,
            decimal_length,
            hierarchy: BranchingHierarchy::new(count, children),
        })
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    fn decimal_at(&self, index: i64) -> Option<Decimal> {
        self.gap_decimal
            .checked_mul(Decimal::from(index))
            .and_then(|offset| self.start_decimal.checked_add(offset))
    }

    fn format_decimal(&self, value: Decimal) -> String {
        match self.decimal_length {
            Some(length) if !value.fract().is_zero() => {
                let rounded = value.round_dp(length);
                format!("{rounded:.prec$}", prec = length as usize)
            }
            _ => value.normalize().to_string(),
        }
    }
}

impl DomainAdapter for NumberDomain {
    fn index_count(&self) -> i64 {
        self.hierarchy.count()
    }

    fn label_for(&self, index: i64, _level: usize) -> String {
        match self.decimal_at(index) {
            Some(value) => self.format_decimal(value),
            None => String::new(),
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
        if index < 0 || index >= self.index_count() {
            return None;
        }
        Some(DomainValue::Number(self.start + index as f64 * self.gap))
    }

    fn preset_label_extent(&self, font_size: f64) -> Size {
        let last = (self.index_count() - 1).max(0);
        let longest = [self.label_for(0, 0), self.label_for(last, 0)]
            .iter()
            .map(|text| text.chars().count())
            .max()
            .unwrap_or(0);
        Size::new(longest as f64 * font_size / 2.0, font_size)
    }
}
