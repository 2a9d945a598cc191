use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::core::calendar;
use crate::core::domain::{DomainAdapter, DomainValue};
use crate::core::types::{AxisOrientation, IndexRange, Size};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Time axis with one index per millisecond since `start`.
#[derive(Debug, Clone)]
pub struct DateDomain {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    count: i64,
    total_years: i64,
    interval_lengths: Vec<i64>,
}

impl DateDomain {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let span = calendar::diff_millis(start, end);
        let mut domain = Self {
            start,
            end,
            count: if span >= 0 { span.saturating_add(1) } else { 0 },
            total_years: calendar::total_years(start, end),
            interval_lengths: Vec::new(),
        };
        domain.generate_interval_lengths();
        domain
    }

    #[must_use]
    pub fn range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn total_years(&self) -> i64 {
        self.total_years
    }

    fn date_at(&self, index: i64) -> Option<DateTime<Utc>> {
        calendar::add_millis(self.start, index)
    }
}

fn clock_text(date: DateTime<Utc>) -> String {
    format!(
        "{}:{:02}:{:02}",
        date.hour(),
        date.minute(),
        date.second()
    )
}

fn day_text(date: DateTime<Utc>) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.day())
}

impl DomainAdapter for DateDomain {
    fn index_count(&self) -> i64 {
        self.count
    }

    fn label_for(&self, index: i64, _level: usize) -> String {
        let Some(date) = self.date_at(index) else {
            return String::new();
        };
        if calendar::is_year_start(date) {
            date.year().to_string()
        } else if calendar::is_day_start(date) {
            day_text(date)
        } else if date.timestamp_subsec_millis() == 0 {
            clock_text(date)
        } else {
            format!("{} ms", date.timestamp_subsec_millis())
        }
    }

    fn sub_label_for(&self, index: i64) -> Option<String> {
        let date = self.date_at(index)?;
        if calendar::is_year_start(date) {
            None
        } else if calendar::is_day_start(date) {
            Some(date.year().to_string())
        } else if date.timestamp_subsec_millis() == 0 {
            Some(day_text(date))
        } else {
            Some(clock_text(date))
        }
    }

    fn level_of(&self, index: i64) -> usize {
        match self.date_at(index) {
            Some(date) => calendar::level_of(self.start, date, self.total_years),
            None => 0,
        }
    }

    fn indices_in_range(
        &self,
        start: i64,
        end: i64,
        lower_level: usize,
        higher_level: usize,
    ) -> Vec<i64> {
        let IndexRange { start, end } = IndexRange::new(start, end).clamp_to_count(self.count);
        if end < start {
            return Vec::new();
        }
        let (Some(start_date), Some(end_date)) = (self.date_at(start), self.date_at(end)) else {
            return Vec::new();
        };
        calendar::enumerate_indices(
            self.start,
            self.total_years,
            start_date,
            end_date,
            lower_level,
            higher_level,
        )
    }

    fn generate_interval_lengths(&mut self) {
        self.interval_lengths = calendar::interval_lengths(self.start, self.total_years);
    }

    fn interval_lengths(&self) -> &[i64] {
        &self.interval_lengths
    }

    fn value_at(&self, index: i64) -> Option<DomainValue> {
        if index < 0 || index >= self.count {
            return None;
        }
        self.date_at(index).map(DomainValue::Date)
    }

    fn preset_label_extent(&self, font_size: f64) -> Size {
        Size::new(4.0 * font_size, font_size)
    }

    fn label_extent_scale(&self, orientation: AxisOrientation) -> f64 {
        match orientation {
            AxisOrientation::Horizontal => 0.8,
            AxisOrientation::Vertical => 1.0,
        }
    }
}
