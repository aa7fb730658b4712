//! Per-employee payroll calculation.
//!
//! This module composes salary normalization, social security, income tax,
//! other deductions and the thirteenth month into a [`PayrollCalculation`],
//! recording each rule applied in the calculation's audit trail.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::models::{
    AuditStep, Employee, PayrollCalculation, PayrollOverride, SalaryType,
    THIRTEENTH_MONTH_WINDOW_MONTHS, ThirteenthMonthPeriod,
};

use super::isr::calculate_isr;
use super::rates::{PayrollRates, employer_contributions};
use super::rounding::{percent_of, round_currency};
use super::salary::{MONTHS_PER_YEAR, normalized_monthly_salary};
use super::thirteenth_month::calculate_thirteenth_month;

const TWO: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Legal reference for social-security withholding.
pub const SOCIAL_SECURITY_LEGAL_REF: &str = "Ley 51 de 2005";

/// Legal reference for income tax withholding.
pub const ISR_LEGAL_REF: &str = "Código Fiscal, art. 700";

/// Legal reference for the thirteenth month.
pub const THIRTEENTH_MONTH_LEGAL_REF: &str = "Decreto de Gabinete 221 de 1971";

/// Collects audit steps with sequential numbering.
struct AuditTrail {
    steps: Vec<AuditStep>,
}

impl AuditTrail {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        legal_ref: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            legal_ref: legal_ref.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn into_steps(self) -> Vec<AuditStep> {
        self.steps
    }
}

/// Calculates one employee's payroll for the month of `payroll_date`.
///
/// # Composition
///
/// 1. Base salary: `overrides.base_salary`, or the normalized monthly salary
///    rounded to cents.
/// 2. Gross: base + overtime + bonuses + other income.
/// 3. Social security: gross × the resolved employee rate.
/// 4. Income tax: [`calculate_isr`] on gross minus social security.
/// 5. Net: gross minus social security, income tax and other deductions;
///    the biweekly view is half of the monthly net.
/// 6. In April, August and December, the thirteenth-month installment of
///    the current window on four months of base salary.
///
/// Employer contributions are computed on the gross salary and do not affect
/// the net.
///
/// # Examples
///
/// ```
/// use planilla_engine::calculation::{calculate_employee_payroll, PayrollRates};
/// use planilla_engine::config::PayrollRules;
/// use planilla_engine::models::{Employee, SalaryType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = PayrollRules::default();
/// let payroll_date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// let rates = PayrollRates::resolve(&[], payroll_date, &rules).unwrap();
///
/// let employee = Employee {
///     cedula: "8-123-456".to_string(),
///     first_name: "Ana".to_string(),
///     last_name: "Pérez".to_string(),
///     salary: Decimal::from(1000),
///     salary_type: SalaryType::Monthly,
/// };
///
/// let payroll = calculate_employee_payroll(&employee, &rates, payroll_date, None, &rules);
/// assert_eq!(payroll.social_security, Decimal::from_str("28.70").unwrap());
/// assert_eq!(payroll.net_salary_monthly, Decimal::from_str("971.30").unwrap());
/// assert!(payroll.thirteenth_month.is_none());
/// ```
pub fn calculate_employee_payroll(
    employee: &Employee,
    rates: &PayrollRates,
    payroll_date: NaiveDate,
    overrides: Option<&PayrollOverride>,
    rules: &PayrollRules,
) -> PayrollCalculation {
    let mut trail = AuditTrail::new();
    let defaults = PayrollOverride::default();
    let overrides = overrides.unwrap_or(&defaults);

    // Base salary
    let base_salary = match overrides.base_salary {
        Some(base) => {
            trail.record(
                "base_salary",
                "Base Salary",
                "",
                serde_json::json!({
                    "salary": employee.salary.to_string(),
                    "salary_type": employee.salary_type,
                    "override_base_salary": base.to_string()
                }),
                serde_json::json!({
                    "base_salary": base.to_string(),
                    "source": "override"
                }),
                format!("Using override base salary ${} for this payroll", base),
            );
            base
        }
        None => {
            let base = round_currency(normalized_monthly_salary(employee, rules));
            let reasoning = match employee.salary_type {
                SalaryType::Monthly => format!("Monthly salary ${} used as-is", employee.salary),
                SalaryType::Biweekly => format!(
                    "Biweekly salary ${} × {} / 12 = ${}",
                    employee.salary, rules.biweekly_periods_per_year, base
                ),
            };
            trail.record(
                "base_salary",
                "Base Salary",
                "",
                serde_json::json!({
                    "salary": employee.salary.to_string(),
                    "salary_type": employee.salary_type
                }),
                serde_json::json!({
                    "base_salary": base.to_string(),
                    "source": "normalized"
                }),
                reasoning,
            );
            base
        }
    };

    // Gross
    let overtime = overrides.overtime.unwrap_or(Decimal::ZERO);
    let bonuses = overrides.bonuses.unwrap_or(Decimal::ZERO);
    let other_income = overrides.other_income.unwrap_or(Decimal::ZERO);
    let gross_salary = base_salary + overtime + bonuses + other_income;
    trail.record(
        "gross_salary",
        "Gross Salary",
        "",
        serde_json::json!({
            "base_salary": base_salary.to_string(),
            "overtime": overtime.to_string(),
            "bonuses": bonuses.to_string(),
            "other_income": other_income.to_string()
        }),
        serde_json::json!({ "gross_salary": gross_salary.to_string() }),
        format!(
            "${} + ${} + ${} + ${} = ${}",
            base_salary, overtime, bonuses, other_income, gross_salary
        ),
    );

    // Social security
    let social_security = round_currency(percent_of(gross_salary, rates.social_security_rate));
    trail.record(
        "social_security",
        "Social Security Withholding",
        SOCIAL_SECURITY_LEGAL_REF,
        serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "rate": rates.social_security_rate.to_string(),
            "default_rate": rates.social_security_is_default
        }),
        serde_json::json!({ "social_security": social_security.to_string() }),
        format!(
            "${} × {}% = ${}{}",
            gross_salary,
            rates.social_security_rate.normalize(),
            social_security,
            if rates.social_security_is_default {
                " (no published rate, using default)"
            } else {
                ""
            }
        ),
    );

    // Income tax
    let taxable_income = gross_salary - social_security;
    let income_tax = calculate_isr(taxable_income, &rates.isr_table);
    trail.record(
        "income_tax",
        "Income Tax Withholding",
        ISR_LEGAL_REF,
        serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "annual_income": (taxable_income * MONTHS_PER_YEAR).to_string(),
            "brackets": rates.isr_table.brackets().len()
        }),
        serde_json::json!({ "income_tax": income_tax.to_string() }),
        if rates.isr_table.is_empty() {
            "No ISR brackets in force - no income tax withheld".to_string()
        } else {
            format!(
                "Progressive tax on annualized ${} = ${} per month",
                taxable_income * MONTHS_PER_YEAR,
                income_tax
            )
        },
    );

    // Net
    let other_deductions = overrides.other_deductions.unwrap_or(Decimal::ZERO);
    let total_deductions = social_security + income_tax + other_deductions;
    let net_salary_monthly = gross_salary - total_deductions;
    let net_salary_biweekly = round_currency(net_salary_monthly / TWO);
    trail.record(
        "net_salary",
        "Net Salary",
        "",
        serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "social_security": social_security.to_string(),
            "income_tax": income_tax.to_string(),
            "other_deductions": other_deductions.to_string()
        }),
        serde_json::json!({
            "total_deductions": total_deductions.to_string(),
            "net_salary_monthly": net_salary_monthly.to_string(),
            "net_salary_biweekly": net_salary_biweekly.to_string()
        }),
        format!(
            "${} - ${} = ${} (${} per biweekly payment)",
            gross_salary, total_deductions, net_salary_monthly, net_salary_biweekly
        ),
    );

    // Thirteenth month
    let period = ThirteenthMonthPeriod::containing(payroll_date);
    let thirteenth_month = if period.payment_month() == payroll_date.month() {
        let window_income = base_salary * Decimal::from(THIRTEENTH_MONTH_WINDOW_MONTHS);
        let bonus = calculate_thirteenth_month(window_income, period, rules, |amount| {
            calculate_isr(amount, &rates.isr_table)
        });
        let (window_start, window_end) = period
            .date_range(payroll_date.year())
            .map(|(start, end)| (start.to_string(), end.to_string()))
            .unwrap_or_default();
        trail.record(
            "thirteenth_month",
            "Thirteenth Month",
            THIRTEENTH_MONTH_LEGAL_REF,
            serde_json::json!({
                "period": period,
                "window_start": window_start,
                "window_end": window_end,
                "window_income": window_income.to_string()
            }),
            serde_json::json!({
                "gross_amount": bonus.gross_amount.to_string(),
                "social_security": bonus.social_security.to_string(),
                "income_tax": bonus.income_tax.to_string(),
                "net_amount": bonus.net_amount.to_string()
            }),
            format!(
                "Window {}: ${} / 12 = ${} gross, ${} net",
                period.label(),
                window_income,
                bonus.gross_amount,
                bonus.net_amount
            ),
        );
        Some(bonus)
    } else {
        None
    };

    // Employer contributions
    let contributions = employer_contributions(&rates.employer_rates, gross_salary);
    if !contributions.is_empty() {
        let total: Decimal = contributions.iter().map(|c| c.amount).sum();
        trail.record(
            "employer_contributions",
            "Employer Contributions",
            SOCIAL_SECURITY_LEGAL_REF,
            serde_json::json!({
                "gross_salary": gross_salary.to_string(),
                "rates": contributions
                    .iter()
                    .map(|c| serde_json::json!({ "key": c.key, "percentage": c.percentage.to_string() }))
                    .collect::<Vec<_>>()
            }),
            serde_json::json!({ "total": total.to_string() }),
            format!(
                "{} employer contribution(s) totalling ${}",
                contributions.len(),
                total
            ),
        );
    }

    PayrollCalculation {
        cedula: employee.cedula.clone(),
        employee_name: employee.full_name(),
        salary_type: employee.salary_type,
        base_salary,
        overtime,
        bonuses,
        other_income,
        gross_salary,
        social_security,
        income_tax,
        other_deductions,
        total_deductions,
        net_salary_monthly,
        net_salary_biweekly,
        thirteenth_month,
        employer_contributions: contributions,
        audit_trail: trail.into_steps(),
    }
}
