//! Payroll calculation result models.
//!
//! This module contains the [`PayrollCalculation`] type and its associated structures
//! that capture all outputs of a payroll run: per-employee withholdings, the
//! thirteenth-month breakdown, column totals, and the audit trail.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ParameterCategory, SalaryType, ThirteenthMonthPeriod};

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the legal instrument behind this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The thirteenth-month installment for one employee.
///
/// # Example
///
/// ```
/// use planilla_engine::models::{ThirteenthMonthCalculation, ThirteenthMonthPeriod};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bonus = ThirteenthMonthCalculation {
///     period: ThirteenthMonthPeriod::First,
///     total_income: Decimal::from_str("4800.00").unwrap(),
///     gross_amount: Decimal::from_str("400.00").unwrap(),
///     social_security: Decimal::from_str("29.00").unwrap(),
///     income_tax: Decimal::ZERO,
///     net_amount: Decimal::from_str("371.00").unwrap(),
/// };
/// assert_eq!(bonus.net_amount, bonus.gross_amount - bonus.social_security - bonus.income_tax);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirteenthMonthCalculation {
    /// The legal window this installment covers.
    pub period: ThirteenthMonthPeriod,
    /// Qualifying income earned during the window.
    pub total_income: Decimal,
    /// Gross installment (`total_income / 12`).
    pub gross_amount: Decimal,
    /// Social-security withholding on the installment.
    pub social_security: Decimal,
    /// Income tax withholding on the installment.
    pub income_tax: Decimal,
    /// Amount paid to the employee.
    pub net_amount: Decimal,
}

/// A contribution paid by the employer on top of the employee's pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerContribution {
    /// The key of the legal parameter that produced the contribution.
    pub key: String,
    /// The legal concept of the contribution.
    pub category: ParameterCategory,
    /// The rate applied, in percent.
    pub percentage: Decimal,
    /// The contribution amount.
    pub amount: Decimal,
}

/// The payroll of one employee for one payroll run.
///
/// Derived and never persisted by this crate. Invariants:
/// `net_salary_monthly = gross_salary - total_deductions` and
/// `total_deductions = social_security + income_tax + other_deductions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollCalculation {
    /// The employee's identity number.
    pub cedula: String,
    /// The employee's full name.
    pub employee_name: String,
    /// The employee's pay frequency.
    pub salary_type: SalaryType,
    /// Monthly base salary (normalized or overridden).
    pub base_salary: Decimal,
    /// Overtime pay.
    pub overtime: Decimal,
    /// Bonuses.
    pub bonuses: Decimal,
    /// Other taxable income.
    pub other_income: Decimal,
    /// Sum of base salary, overtime, bonuses and other income.
    pub gross_salary: Decimal,
    /// Social-security withholding.
    pub social_security: Decimal,
    /// Income tax withholding.
    pub income_tax: Decimal,
    /// Other deductions.
    pub other_deductions: Decimal,
    /// Sum of all withholdings and deductions.
    pub total_deductions: Decimal,
    /// Net salary for the month.
    pub net_salary_monthly: Decimal,
    /// Net salary per biweekly payment (`net_salary_monthly / 2`).
    pub net_salary_biweekly: Decimal,
    /// The thirteenth-month installment, present only in April, August and December.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thirteenth_month: Option<ThirteenthMonthCalculation>,
    /// Employer contributions on the gross salary.
    #[serde(default)]
    pub employer_contributions: Vec<EmployerContribution>,
    /// Every rule applied while computing this payroll.
    #[serde(default)]
    pub audit_trail: Vec<AuditStep>,
}

impl PayrollCalculation {
    /// Returns the total of the employer contributions.
    pub fn employer_contributions_total(&self) -> Decimal {
        self.employer_contributions.iter().map(|c| c.amount).sum()
    }
}

/// Column totals of the thirteenth-month installments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirteenthMonthTotals {
    /// Total gross installments.
    pub gross_amount: Decimal,
    /// Total social-security withholding on installments.
    pub social_security: Decimal,
    /// Total income tax withholding on installments.
    pub income_tax: Decimal,
    /// Total net installments.
    pub net_amount: Decimal,
}

/// Column totals across a payroll run.
///
/// Each column is summed and then rounded on its own, so the totals are
/// sums of parts and can differ by a cent from a total recomputed from
/// other columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollTotals {
    /// Number of employees in the run.
    pub employees: usize,
    /// Total base salary.
    pub base_salary: Decimal,
    /// Total overtime.
    pub overtime: Decimal,
    /// Total bonuses.
    pub bonuses: Decimal,
    /// Total other income.
    pub other_income: Decimal,
    /// Total gross salary.
    pub gross_salary: Decimal,
    /// Total social-security withholding.
    pub social_security: Decimal,
    /// Total income tax withholding.
    pub income_tax: Decimal,
    /// Total other deductions.
    pub other_deductions: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Total monthly net salary.
    pub net_salary_monthly: Decimal,
    /// Total biweekly net salary.
    pub net_salary_biweekly: Decimal,
    /// Total employer contributions.
    pub employer_contributions: Decimal,
    /// Thirteenth-month totals, when requested.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thirteenth_month: Option<ThirteenthMonthTotals>,
}

/// The complete result of a payroll run.
///
/// # Example
///
/// ```
/// use planilla_engine::calculation::calculate_totals;
/// use planilla_engine::models::PayrollRun;
/// use chrono::{NaiveDate, Utc};
/// use uuid::Uuid;
///
/// let run = PayrollRun {
///     run_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     payroll_date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
///     calculations: vec![],
///     totals: calculate_totals(&[], true),
/// };
/// assert_eq!(run.totals.employees, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRun {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was computed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that computed the run.
    pub engine_version: String,
    /// The payroll date driving rate selection and the thirteenth month.
    pub payroll_date: NaiveDate,
    /// Per-employee calculations.
    pub calculations: Vec<PayrollCalculation>,
    /// Column totals.
    pub totals: PayrollTotals,
}
