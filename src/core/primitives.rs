use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::{AxisError, AxisResult};

pub fn f64_to_decimal(value: f64, field_name: &str) -> AxisResult<Decimal> {
    if !value.is_finite() {
        return Err(AxisError::InvalidConfig(format!(
            "{field_name} must be finite"
        )));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        AxisError::InvalidConfig(format!("{field_name} cannot be represented as decimal"))
    })
}

/// Largest `k` with `base^k <= count`, i.e. `floor(log_base(count))` without
/// float rounding surprises on exact powers.
#[must_use]
pub fn integer_log(count: i64, base: i64) -> usize {
    if count < 1 || base < 2 {
        return 0;
    }
    let mut level = 0;
    let mut power: i64 = 1;
    while let Some(next) = power.checked_mul(base) {
        if next > count {
            break;
        }
        power = next;
        level += 1;
    }
    level
}
