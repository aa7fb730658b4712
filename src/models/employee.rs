//! Employee model and related types.
//!
//! This module defines the Employee struct, the SalaryType enum and the
//! per-employee PayrollOverride used to adjust a payroll run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often an employee's `salary` amount is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalaryType {
    /// The salary amount is paid once per month.
    Monthly,
    /// The salary amount is paid every two weeks (26 periods per year).
    Biweekly,
}

/// Represents an employee as served by the HR API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// National identity number, unique per employee.
    pub cedula: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The salary amount per pay period of `salary_type`.
    pub salary: Decimal,
    /// The pay frequency the salary is expressed in.
    pub salary_type: SalaryType,
}

impl Employee {
    /// Returns the employee's full name.
    ///
    /// # Examples
    ///
    /// ```
    /// use planilla_engine::models::{Employee, SalaryType};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     cedula: "8-123-456".to_string(),
    ///     first_name: "Ana".to_string(),
    ///     last_name: "Pérez".to_string(),
    ///     salary: Decimal::new(1200, 0),
    ///     salary_type: SalaryType::Monthly,
    /// };
    /// assert_eq!(employee.full_name(), "Ana Pérez");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Adjusted amounts for one employee in one payroll run.
///
/// Every field is optional; a missing field keeps the computed value
/// (base salary) or zero (extras and deductions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollOverride {
    /// Replaces the normalized monthly salary.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Overtime pay for the period.
    #[serde(default)]
    pub overtime: Option<Decimal>,
    /// Bonuses for the period.
    #[serde(default)]
    pub bonuses: Option<Decimal>,
    /// Any other taxable income for the period.
    #[serde(default)]
    pub other_income: Option<Decimal>,
    /// Deductions other than social security and income tax.
    #[serde(default)]
    pub other_deductions: Option<Decimal>,
}
