//! Thirteenth-month (Décimo Tercer Mes) calculation.
//!
//! Each installment is one twelfth of the income earned during its four-month
//! window. Social security is withheld at a flat rate; income tax is withheld
//! only when the window's income, annualized, exceeds the exemption threshold.

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    THIRTEENTH_MONTH_WINDOW_MONTHS, ThirteenthMonthCalculation, ThirteenthMonthPeriod,
};

use super::rounding::{check_amount, percent_of, round_currency};
use super::salary::MONTHS_PER_YEAR;

/// Annualizes the income of one window (`total × 12 / 4`).
pub fn annualized_window_income(total_income: Decimal) -> Decimal {
    total_income * MONTHS_PER_YEAR / Decimal::from(THIRTEENTH_MONTH_WINDOW_MONTHS)
}

/// Calculates the installment for a known window.
///
/// `isr_fn` computes the income tax on the gross installment; it is only
/// called when the annualized window income exceeds
/// `rules.thirteenth_month.isr_exemption_threshold`.
///
/// All amounts are rounded to cents and `net = gross - social_security - income_tax`.
pub fn calculate_thirteenth_month<F>(
    total_income: Decimal,
    period: ThirteenthMonthPeriod,
    rules: &PayrollRules,
    isr_fn: F,
) -> ThirteenthMonthCalculation
where
    F: Fn(Decimal) -> Decimal,
{
    let gross_amount = round_currency(total_income / MONTHS_PER_YEAR);
    let social_security = round_currency(percent_of(
        gross_amount,
        rules.thirteenth_month.social_security_rate,
    ));

    let income_tax = if annualized_window_income(total_income)
        > rules.thirteenth_month.isr_exemption_threshold
    {
        round_currency(isr_fn(gross_amount))
    } else {
        Decimal::ZERO
    };

    ThirteenthMonthCalculation {
        period,
        total_income,
        gross_amount,
        social_security,
        income_tax,
        net_amount: gross_amount - social_security - income_tax,
    }
}

/// Calculates the installment for the window containing a zero-based month.
///
/// Months 0-3 fall in the 16 December - 15 April window, 4-7 in
/// 16 April - 15 August, and 8-11 in 16 August - 15 December.
///
/// # Errors
///
/// Returns `CalculationError` when `month0` is not in `0..=11` or when
/// `total_income` exceeds [`MAX_AMOUNT`](super::rounding::MAX_AMOUNT).
///
/// # Examples
///
/// ```
/// use planilla_engine::calculation::calculate_thirteenth_month_by_period;
/// use planilla_engine::config::PayrollRules;
/// use planilla_engine::models::ThirteenthMonthPeriod;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = PayrollRules::default();
/// let bonus = calculate_thirteenth_month_by_period(Decimal::from(2400), 3, &rules, |_| Decimal::ZERO).unwrap();
///
/// assert_eq!(bonus.period, ThirteenthMonthPeriod::First);
/// assert_eq!(bonus.gross_amount, Decimal::from(200));
/// assert_eq!(bonus.social_security, Decimal::from_str("14.50").unwrap());
/// assert_eq!(bonus.net_amount, Decimal::from_str("185.50").unwrap());
/// ```
pub fn calculate_thirteenth_month_by_period<F>(
    total_income: Decimal,
    month0: u32,
    rules: &PayrollRules,
    isr_fn: F,
) -> EngineResult<ThirteenthMonthCalculation>
where
    F: Fn(Decimal) -> Decimal,
{
    check_amount("total income", total_income)?;
    let period =
        ThirteenthMonthPeriod::from_month0(month0).ok_or_else(|| EngineError::CalculationError {
            message: format!("month {} is outside 0..=11", month0),
        })?;
    Ok(calculate_thirteenth_month(total_income, period, rules, isr_fn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{IsrBracket, IsrBracketTable, calculate_isr};
    use std::cell::Cell;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn panama_table() -> IsrBracketTable {
        IsrBracketTable::new(vec![
            IsrBracket {
                key: "isr_exento".to_string(),
                min: dec("0"),
                max: Some(dec("11000")),
                rate: dec("0"),
            },
            IsrBracket {
                key: "isr_15".to_string(),
                min: dec("11000"),
                max: Some(dec("50000")),
                rate: dec("15"),
            },
            IsrBracket {
                key: "isr_25".to_string(),
                min: dec("50000"),
                max: None,
                rate: dec("25"),
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_gross_is_one_twelfth_of_window_income() {
        let rules = PayrollRules::default();
        let bonus =
            calculate_thirteenth_month(dec("4000"), ThirteenthMonthPeriod::Second, &rules, |_| {
                Decimal::ZERO
            });
        assert_eq!(bonus.gross_amount, dec("333.33"));
        assert_eq!(bonus.social_security, dec("24.17"));
        assert_eq!(bonus.income_tax, Decimal::ZERO);
        assert_eq!(bonus.net_amount, dec("309.16"));
    }

    #[test]
    fn test_income_below_threshold_is_not_taxed() {
        let rules = PayrollRules::default();
        let called = Cell::new(false);
        // annualized: 3600 × 3 = 10800 <= 11000
        let bonus =
            calculate_thirteenth_month(dec("3600"), ThirteenthMonthPeriod::First, &rules, |g| {
                called.set(true);
                g
            });
        assert!(!called.get());
        assert_eq!(bonus.income_tax, Decimal::ZERO);
    }

    #[test]
    fn test_income_at_threshold_is_not_taxed() {
        let mut rules = PayrollRules::default();
        rules.thirteenth_month.isr_exemption_threshold = dec("10800");
        // annualized: 3600 × 3 = 10800, equal to the threshold
        let bonus =
            calculate_thirteenth_month(dec("3600"), ThirteenthMonthPeriod::First, &rules, |g| g);
        assert_eq!(bonus.income_tax, Decimal::ZERO);
    }

    #[test]
    fn test_income_above_threshold_uses_isr_fn() {
        let rules = PayrollRules::default();
        let table = panama_table();
        // total 24000, annualized 72000; gross 2000 taxed as monthly income
        let bonus =
            calculate_thirteenth_month(dec("24000"), ThirteenthMonthPeriod::Third, &rules, |g| {
                calculate_isr(g, &table)
            });
        assert_eq!(bonus.gross_amount, dec("2000"));
        assert_eq!(bonus.social_security, dec("145.00"));
        // annual 24000: (24000 - 11000) × 15 % = 1950 / 12
        assert_eq!(bonus.income_tax, dec("162.50"));
        assert_eq!(bonus.net_amount, dec("1692.50"));
    }

    #[test]
    fn test_net_is_gross_minus_withholdings() {
        let rules = PayrollRules::default();
        let bonus =
            calculate_thirteenth_month(dec("5123.45"), ThirteenthMonthPeriod::First, &rules, |g| {
                g / dec("10")
            });
        assert_eq!(
            bonus.net_amount,
            bonus.gross_amount - bonus.social_security - bonus.income_tax
        );
    }

    #[test]
    fn test_by_period_selects_window_from_month() {
        let rules = PayrollRules::default();
        let april = calculate_thirteenth_month_by_period(dec("4000"), 3, &rules, |_| Decimal::ZERO)
            .unwrap();
        let august =
            calculate_thirteenth_month_by_period(dec("4000"), 7, &rules, |_| Decimal::ZERO)
                .unwrap();
        let december =
            calculate_thirteenth_month_by_period(dec("4000"), 11, &rules, |_| Decimal::ZERO)
                .unwrap();
        assert_eq!(april.period, ThirteenthMonthPeriod::First);
        assert_eq!(august.period, ThirteenthMonthPeriod::Second);
        assert_eq!(december.period, ThirteenthMonthPeriod::Third);
    }

    #[test]
    fn test_by_period_rejects_invalid_month() {
        let rules = PayrollRules::default();
        let result = calculate_thirteenth_month_by_period(dec("4000"), 12, &rules, |_| Decimal::ZERO);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_by_period_rejects_income_beyond_maximum() {
        let rules = PayrollRules::default();
        let result = calculate_thirteenth_month_by_period(
            dec("70000000000000000000000000000"),
            3,
            &rules,
            |_| Decimal::ZERO,
        );
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_uses_configured_social_security_rate() {
        let mut rules = PayrollRules::default();
        rules.thirteenth_month.social_security_rate = dec("10");
        let bonus =
            calculate_thirteenth_month(dec("1200"), ThirteenthMonthPeriod::First, &rules, |_| {
                Decimal::ZERO
            });
        assert_eq!(bonus.social_security, dec("10"));
    }
}
