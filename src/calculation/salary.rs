//! Salary normalization.
//!
//! This module converts an employee's salary into a monthly amount so that
//! every withholding is computed on the same basis regardless of pay frequency.

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::models::{Employee, SalaryType};

/// Months in a year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Returns the employee's salary expressed per month.
///
/// A monthly salary is returned unchanged. A biweekly salary is amortized over
/// the year: `salary × biweekly_periods_per_year / 12`. The result is not
/// rounded. Negative salaries are not rejected and propagate as-is.
///
/// # Examples
///
/// ```
/// use planilla_engine::calculation::{normalized_monthly_salary, round_currency};
/// use planilla_engine::config::PayrollRules;
/// use planilla_engine::models::{Employee, SalaryType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     cedula: "8-123-456".to_string(),
///     first_name: "Ana".to_string(),
///     last_name: "Pérez".to_string(),
///     salary: Decimal::from(500),
///     salary_type: SalaryType::Biweekly,
/// };
///
/// let monthly = normalized_monthly_salary(&employee, &PayrollRules::default());
/// assert_eq!(round_currency(monthly), Decimal::from_str("1083.33").unwrap());
/// ```
pub fn normalized_monthly_salary(employee: &Employee, rules: &PayrollRules) -> Decimal {
    match employee.salary_type {
        SalaryType::Monthly => employee.salary,
        SalaryType::Biweekly => {
            employee.salary * Decimal::from(rules.biweekly_periods_per_year) / MONTHS_PER_YEAR
        }
    }
}
