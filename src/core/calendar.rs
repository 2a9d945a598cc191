//! Calendar arithmetic for millisecond-indexed date axes.
//!
//! Levels `0..=9` are fixed strides (1 ms up to one day), `10` and `11` are
//! month and quarter starts, `12` is a year start and every level above
//! doubles the year stride. All math is UTC.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Timelike, Utc};

use crate::core::primitives::integer_log;

pub const DAY_LEVEL: usize = 9;
pub const MONTH_LEVEL: usize = 10;
pub const QUARTER_LEVEL: usize = 11;
pub const YEAR_LEVEL: usize = 12;

const MILLIS_PER_DAY: i64 = 86_400_000;

const FIXED_STRIDES_MS: [i64; DAY_LEVEL + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    60_000,
    600_000,
    3_600_000,
    21_600_000,
    MILLIS_PER_DAY,
];

#[must_use]
pub fn add_millis(date: DateTime<Utc>, millis: i64) -> Option<DateTime<Utc>> {
    date.checked_add_signed(TimeDelta::milliseconds(millis))
}

#[must_use]
pub fn diff_millis(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds()
}

#[must_use]
pub fn is_year_start(date: DateTime<Utc>) -> bool {
    date.month0() == 0 && is_day_start(date) && date.day() == 1
}

#[must_use]
pub fn is_day_start(date: DateTime<Utc>) -> bool {
    date.timestamp_millis().rem_euclid(MILLIS_PER_DAY) == 0
}

/// Whole calendar years covered by `[start, end]`, counting the start year
/// when the range opens exactly on January 1st.
#[must_use]
pub fn total_years(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let years = i64::from(end.year()) - i64::from(start.year());
    years + i64::from(is_year_start(start))
}

#[must_use]
pub fn max_level(total_years: i64) -> usize {
    YEAR_LEVEL + integer_log(total_years, 2)
}

/// Stride of every level in milliseconds, measured from `epoch`'s calendar.
#[must_use]
pub fn interval_lengths(epoch: DateTime<Utc>, total_years: i64) -> Vec<i64> {
    let mut lengths = FIXED_STRIDES_MS.to_vec();
    let year = epoch.year();
    let month0 = epoch.month0();
    let quarter_first = month0 - month0 % 3;

    lengths.push(days_in_month(year, month0) * MILLIS_PER_DAY);
    let quarter_days: i64 = (quarter_first..quarter_first + 3)
        .map(|month0| days_in_month(year, month0))
        .sum();
    lengths.push(quarter_days * MILLIS_PER_DAY);

    let mut year_length = days_in_year(year) * MILLIS_PER_DAY;
    lengths.push(year_length);
    for _ in 0..integer_log(total_years, 2) {
        year_length = year_length.saturating_mul(2);
        lengths.push(year_length);
    }
    lengths
}

/// Calendar granularity of `date` ignoring the multi-year ladder.
#[must_use]
pub fn calendar_level(date: DateTime<Utc>) -> usize {
    let millis = date.timestamp_millis();
    let fixed = FIXED_STRIDES_MS
        .iter()
        .take_while(|stride| millis.rem_euclid(**stride) == 0)
        .count()
        .saturating_sub(1);
    if fixed < DAY_LEVEL {
        return fixed;
    }
    if date.day() != 1 {
        return DAY_LEVEL;
    }
    let month0 = date.month0();
    if month0 % 3 != 0 {
        MONTH_LEVEL
    } else if month0 != 0 {
        QUARTER_LEVEL
    } else {
        YEAR_LEVEL
    }
}

#[must_use]
pub fn level_of(epoch: DateTime<Utc>, date: DateTime<Utc>, total_years: i64) -> usize {
    let max = max_level(total_years);
    if date == epoch {
        return max;
    }
    let level = calendar_level(date);
    if level < YEAR_LEVEL {
        return level;
    }
    let offset = i64::from(date.year()) - i64::from(first_year_boundary(epoch));
    if offset <= 0 {
        return max;
    }
    (YEAR_LEVEL + offset.trailing_zeros() as usize).min(max)
}

/// Millisecond indices (relative to `epoch`) of every boundary in
/// `[start_date, end_date]` whose own level lies in `[lower_level, higher_level]`.
#[must_use]
pub fn enumerate_indices(
    epoch: DateTime<Utc>,
    total_years: i64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    lower_level: usize,
    higher_level: usize,
) -> Vec<i64> {
    let max = max_level(total_years);
    let higher_level = higher_level.min(max);
    let mut indices = Vec::new();
    if end_date < start_date || lower_level > higher_level {
        return indices;
    }

    for level in lower_level..=higher_level {
        for boundary in boundaries_at(level, epoch, start_date, end_date) {
            if boundary != epoch && level_of(epoch, boundary, total_years) == level {
                indices.push(diff_millis(epoch, boundary));
            }
        }
    }
    if higher_level == max && start_date <= epoch && epoch <= end_date {
        indices.push(0);
    }
    indices
}

fn boundaries_at(
    level: usize,
    epoch: DateTime<Utc>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    if level <= DAY_LEVEL {
        let stride = FIXED_STRIDES_MS[level];
        let from_ms = from.timestamp_millis();
        let to_ms = to.timestamp_millis();
        let mut millis = from_ms.div_euclid(stride) * stride;
        if millis < from_ms {
            millis += stride;
        }
        let mut boundaries = Vec::new();
        while millis <= to_ms {
            if let Some(date) = Utc.timestamp_millis_opt(millis).single() {
                boundaries.push(date);
            }
            millis += stride;
        }
        return boundaries;
    }
    if level == MONTH_LEVEL || level == QUARTER_LEVEL {
        let step = if level == MONTH_LEVEL { 1 } else { 3 };
        return month_boundaries(from, to, step);
    }

    let step = 1_i64 << (level - YEAR_LEVEL).min(62);
    let first_year = i64::from(first_year_boundary(epoch));
    let mut year = i64::from(from.year());
    if year_start(year).is_none_or(|start| start < from) {
        year += 1;
    }
    let offset = (year - first_year).max(0);
    year = first_year + offset.div_euclid(step) * step;
    if year < first_year + offset {
        year += step;
    }

    let mut boundaries = Vec::new();
    while let Some(start) = year_start(year) {
        if start > to {
            break;
        }
        boundaries.push(start);
        year += step;
    }
    boundaries
}

fn month_boundaries(from: DateTime<Utc>, to: DateTime<Utc>, step: u32) -> Vec<DateTime<Utc>> {
    let mut year = from.year();
    let mut month0 = from.month0() - from.month0() % step;
    let mut boundaries = Vec::new();
    while let Some(start) = month_start(year, month0) {
        if start > to {
            break;
        }
        if start >= from {
            boundaries.push(start);
        }
        month0 += step;
        if month0 >= 12 {
            month0 -= 12;
            year += 1;
        }
    }
    boundaries
}

fn first_year_boundary(epoch: DateTime<Utc>) -> i32 {
    if is_year_start(epoch) {
        epoch.year()
    } else {
        epoch.year() + 1
    }
}

fn year_start(year: i64) -> Option<DateTime<Utc>> {
    i32::try_from(year).ok().and_then(|year| month_start(year, 0))
}

fn month_start(year: i32, month0: u32) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}

fn days_in_month(year: i32, month0: u32) -> i64 {
    let next = if month0 >= 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };
    match (NaiveDate::from_ymd_opt(year, month0 + 1, 1), next) {
        (Some(first), Some(next)) => (next - first).num_days(),
        _ => 30,
    }
}

fn days_in_year(year: i32) -> i64 {
    if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
        366
    } else {
        365
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, s)
            .single()
            .expect("valid date")
    }

    #[test]
    fn calendar_levels_follow_the_ladder() {
        assert_eq!(calendar_level(utc(2001, 1, 1, 0, 0, 0)), YEAR_LEVEL);
        assert_eq!(calendar_level(utc(2001, 4, 1, 0, 0, 0)), QUARTER_LEVEL);
        assert_eq!(calendar_level(utc(2001, 5, 1, 0, 0, 0)), MONTH_LEVEL);
        assert_eq!(calendar_level(utc(2001, 5, 7, 0, 0, 0)), DAY_LEVEL);
        assert_eq!(calendar_level(utc(2001, 5, 7, 12, 0, 0)), 8);
        assert_eq!(calendar_level(utc(2001, 5, 7, 13, 0, 0)), 7);
        assert_eq!(calendar_level(utc(2001, 5, 7, 13, 20, 0)), 6);
        assert_eq!(calendar_level(utc(2001, 5, 7, 13, 21, 0)), 5);
        assert_eq!(calendar_level(utc(2001, 5, 7, 13, 21, 30)), 4);
        assert_eq!(calendar_level(utc(2001, 5, 7, 13, 21, 31)), 3);
    }

    #[test]
    fn multi_year_levels_double_from_the_first_year_boundary() {
        let epoch = utc(2000, 1, 1, 0, 0, 0);
        let years = total_years(epoch, utc(2020, 6, 1, 0, 0, 0));
        assert_eq!(years, 21);
        assert_eq!(max_level(years), YEAR_LEVEL + 4);
        assert_eq!(level_of(epoch, epoch, years), YEAR_LEVEL + 4);
        assert_eq!(level_of(epoch, utc(2001, 1, 1, 0, 0, 0), years), YEAR_LEVEL);
        assert_eq!(level_of(epoch, utc(2004, 1, 1, 0, 0, 0), years), YEAR_LEVEL + 2);
        assert_eq!(level_of(epoch, utc(2016, 1, 1, 0, 0, 0), years), YEAR_LEVEL + 4);
    }

    #[test]
    fn interval_table_grows_one_level_per_year_doubling() {
        let epoch = utc(2000, 1, 1, 0, 0, 0);
        let lengths = interval_lengths(epoch, 21);
        assert_eq!(lengths.len(), max_level(21) + 1);
        assert_eq!(lengths[MONTH_LEVEL], 31 * MILLIS_PER_DAY);
        assert_eq!(lengths[YEAR_LEVEL], 366 * MILLIS_PER_DAY);
        assert!(lengths.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn enumeration_emits_each_boundary_once_at_its_own_level() {
        let epoch = utc(2000, 1, 1, 0, 0, 0);
        let years = total_years(epoch, utc(2003, 12, 31, 0, 0, 0));
        let indices = enumerate_indices(
            epoch,
            years,
            epoch,
            utc(2003, 12, 31, 0, 0, 0),
            MONTH_LEVEL,
            max_level(years),
        );
        // 48 month starts including the epoch itself.
        assert_eq!(indices.len(), 48);
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 48);
        assert_eq!(*indices.last().expect("epoch"), 0);
    }

    #[test]
    fn unaligned_epoch_is_still_emitted_at_the_top_level() {
        let epoch = utc(2000, 3, 15, 10, 30, 0);
        let end = utc(2000, 3, 16, 0, 0, 0);
        let years = total_years(epoch, end);
        let top = max_level(years);
        let indices = enumerate_indices(epoch, years, epoch, end, top, top);
        assert_eq!(indices, vec![0]);
        let days = enumerate_indices(epoch, years, epoch, end, DAY_LEVEL, DAY_LEVEL);
        assert_eq!(days, vec![diff_millis(epoch, end)]);
    }
}
