use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ChartError, ChartResult};

/// Largest precision accepted by [`format_fixed`].
pub const MAX_FORMAT_PRECISION: u32 = 12;

/// Rounds `value` half away from zero on its decimal representation.
///
/// Binary rounding would turn `0.25` at one decimal place into `0.2`; copy
/// shown to visitors expects `0.3`.
pub fn round_half_away(value: f64, precision: u32) -> ChartResult<f64> {
    let precision = precision.min(MAX_FORMAT_PRECISION);
    let rounded = to_decimal(value)?
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_f64().ok_or_else(|| {
        ChartError::InvalidData("rounded value cannot be represented as f64".to_owned())
    })
}

/// Formats `value` with exactly `precision` decimals, rounding half away from
/// zero. Non-finite values fall back to the standard float formatter.
#[must_use]
pub fn format_fixed(value: f64, precision: u32) -> String {
    let precision = precision.min(MAX_FORMAT_PRECISION);
    match to_decimal(value) {
        Ok(decimal) => {
            let rounded =
                decimal.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
            // `-0.0` would otherwise leak into copy as "-0".
            let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
            format!("{rounded:.prec$}", prec = precision as usize)
        }
        Err(_) => format!("{value:.prec$}", prec = precision as usize),
    }
}

fn to_decimal(value: f64) -> ChartResult<Decimal> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData("value must be finite".to_owned()));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        ChartError::InvalidData("value cannot be represented as decimal".to_owned())
    })
}
