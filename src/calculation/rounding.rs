//! Currency rounding helpers.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Number of decimal places of every amount the engine reports.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Largest magnitude accepted for a monetary input (one trillion).
///
/// Every product the engine forms stays far below `Decimal::MAX` when its
/// inputs are within this bound.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Rounds an amount to cents, with midpoints rounded away from zero.
///
/// # Examples
///
/// ```
/// use planilla_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("12.345").unwrap()), Decimal::from_str("12.35").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("1083.3333").unwrap()), Decimal::from_str("1083.33").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `percentage` percent of `amount`, unrounded.
pub fn percent_of(amount: Decimal, percentage: Decimal) -> Decimal {
    amount * percentage / ONE_HUNDRED
}

/// Returns `amount` unchanged when its magnitude does not exceed [`MAX_AMOUNT`].
///
/// # Errors
///
/// Returns `CalculationError` naming `field` when the amount is out of range.
pub fn check_amount(field: &str, amount: Decimal) -> EngineResult<Decimal> {
    if amount.abs() > MAX_AMOUNT {
        return Err(EngineError::CalculationError {
            message: format!("{} {} exceeds the maximum of {}", field, amount, MAX_AMOUNT),
        });
    }
    Ok(amount)
}
