//! Thirteenth-month payment windows.
//!
//! The Décimo Tercer Mes is paid in three installments. Each installment covers
//! the income earned in a four-month window ending mid-month:
//!
//! | Installment | Window                  | Paid in  |
//! |-------------|-------------------------|----------|
//! | First       | 16 December - 15 April  | April    |
//! | Second      | 16 April - 15 August    | August   |
//! | Third       | 16 August - 15 December | December |

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of months of income covered by one installment.
pub const THIRTEENTH_MONTH_WINDOW_MONTHS: u32 = 4;

/// One of the three legal windows of the thirteenth-month bonus.
///
/// # Example
///
/// ```
/// use planilla_engine::models::ThirteenthMonthPeriod;
/// use chrono::NaiveDate;
///
/// let period = ThirteenthMonthPeriod::from_month0(7).unwrap();
/// assert_eq!(period, ThirteenthMonthPeriod::Second);
/// assert_eq!(period.payment_month(), 8);
///
/// let (start, end) = period.date_range(2025).unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2025, 4, 16).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThirteenthMonthPeriod {
    /// 16 December - 15 April, paid in April.
    First,
    /// 16 April - 15 August, paid in August.
    Second,
    /// 16 August - 15 December, paid in December.
    Third,
}

impl ThirteenthMonthPeriod {
    /// Returns the window a zero-based payroll month falls into.
    ///
    /// January through April belong to the first window, May through August
    /// to the second, and September through December to the third. Returns
    /// `None` for months outside `0..=11`.
    pub fn from_month0(month0: u32) -> Option<Self> {
        match month0 {
            0..=3 => Some(Self::First),
            4..=7 => Some(Self::Second),
            8..=11 => Some(Self::Third),
            _ => None,
        }
    }

    /// Returns the window containing the given payroll date's month.
    pub fn containing(date: NaiveDate) -> Self {
        match date.month0() {
            0..=3 => Self::First,
            4..=7 => Self::Second,
            _ => Self::Third,
        }
    }

    /// The calendar month (1-based) in which this installment is paid.
    pub fn payment_month(&self) -> u32 {
        match self {
            Self::First => 4,
            Self::Second => 8,
            Self::Third => 12,
        }
    }

    /// A human-readable description of the window.
    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "16 de diciembre - 15 de abril",
            Self::Second => "16 de abril - 15 de agosto",
            Self::Third => "16 de agosto - 15 de diciembre",
        }
    }

    /// The inclusive date range of the window whose installment is paid in
    /// `payment_year`. The first window starts in the previous year.
    pub fn date_range(&self, payment_year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let (start, end) = match self {
            Self::First => (
                NaiveDate::from_ymd_opt(payment_year - 1, 12, 16)?,
                NaiveDate::from_ymd_opt(payment_year, 4, 15)?,
            ),
            Self::Second => (
                NaiveDate::from_ymd_opt(payment_year, 4, 16)?,
                NaiveDate::from_ymd_opt(payment_year, 8, 15)?,
            ),
            Self::Third => (
                NaiveDate::from_ymd_opt(payment_year, 8, 16)?,
                NaiveDate::from_ymd_opt(payment_year, 12, 15)?,
            ),
        };
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_every_month_maps_to_a_window() {
        let expected = [
            ThirteenthMonthPeriod::First,
            ThirteenthMonthPeriod::First,
            ThirteenthMonthPeriod::First,
            ThirteenthMonthPeriod::First,
            ThirteenthMonthPeriod::Second,
            ThirteenthMonthPeriod::Second,
            ThirteenthMonthPeriod::Second,
            ThirteenthMonthPeriod::Second,
            ThirteenthMonthPeriod::Third,
            ThirteenthMonthPeriod::Third,
            ThirteenthMonthPeriod::Third,
            ThirteenthMonthPeriod::Third,
        ];
        for (month0, period) in expected.iter().enumerate() {
            assert_eq!(
                ThirteenthMonthPeriod::from_month0(month0 as u32),
                Some(*period),
                "month0 {}",
                month0
            );
        }
    }

    #[test]
    fn test_month_out_of_range_has_no_window() {
        assert_eq!(ThirteenthMonthPeriod::from_month0(12), None);
    }

    #[test]
    fn test_containing_matches_from_month0() {
        for month in 1..=12 {
            let d = date(2025, month, 1);
            assert_eq!(
                Some(ThirteenthMonthPeriod::containing(d)),
                ThirteenthMonthPeriod::from_month0(month - 1)
            );
        }
    }

    #[test]
    fn test_payment_month_is_last_month_of_its_window() {
        for month0 in [3, 7, 11] {
            let period = ThirteenthMonthPeriod::from_month0(month0).unwrap();
            assert_eq!(period.payment_month(), month0 + 1);
        }
    }

    #[test]
    fn test_first_window_starts_in_previous_year() {
        let (start, end) = ThirteenthMonthPeriod::First.date_range(2025).unwrap();
        assert_eq!(start, date(2024, 12, 16));
        assert_eq!(end, date(2025, 4, 15));
    }

    #[test]
    fn test_third_window_range() {
        let (start, end) = ThirteenthMonthPeriod::Third.date_range(2025).unwrap();
        assert_eq!(start, date(2025, 8, 16));
        assert_eq!(end, date(2025, 12, 15));
        assert_eq!(
            ThirteenthMonthPeriod::Third.label(),
            "16 de agosto - 15 de diciembre"
        );
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&ThirteenthMonthPeriod::Second).unwrap(),
            "\"second\""
        );
    }
}
