//! Selection of the rates in force for a payroll date.
//!
//! The HR API publishes a flat list of legal parameters. This module picks
//! out the employee social-security rate, the ISR brackets, and the employer
//! contribution rates that apply on a given date.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployerContribution, LegalParameter, ParameterCategory, ParameterType,
};

use super::isr::IsrBracketTable;
use super::rounding::{percent_of, round_currency};

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Returns the employee social-security rate in force on `as_of`, in percent.
///
/// Among the active `social_security` / `employee` parameters effective on or
/// before `as_of`, the one with the latest effective date wins. When none is
/// found the configured default rate is returned, so a payroll can still be
/// previewed when the parameter service is unreachable.
///
/// # Examples
///
/// ```
/// use planilla_engine::calculation::sss_rate;
/// use planilla_engine::config::PayrollRules;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let as_of = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// assert_eq!(sss_rate(&[], as_of, &PayrollRules::default()), Decimal::new(287, 2));
/// ```
pub fn sss_rate(parameters: &[LegalParameter], as_of: NaiveDate, rules: &PayrollRules) -> Decimal {
    parameters
        .iter()
        .filter(|p| p.is_in_force(as_of))
        .filter(|p| p.matches(ParameterCategory::SocialSecurity, ParameterType::Employee))
        .max_by_key(|p| p.effective_date)
        .map(|p| p.percentage)
        .unwrap_or(rules.default_social_security_rate)
}

/// Keeps one parameter per key: the one with the latest effective date.
fn latest_by_key<'a>(
    parameters: impl Iterator<Item = &'a LegalParameter>,
) -> Vec<&'a LegalParameter> {
    let mut latest: HashMap<&str, &LegalParameter> = HashMap::new();
    for parameter in parameters {
        latest
            .entry(parameter.key.as_str())
            .and_modify(|current| {
                if parameter.effective_date >= current.effective_date {
                    *current = parameter;
                }
            })
            .or_insert(parameter);
    }
    latest.into_values().collect()
}

/// Returns the active ISR parameters in force on `as_of`.
///
/// When a key is published more than once, the latest effective version wins.
/// The result is ordered by bracket minimum.
///
/// Versions are matched by key only. A revised bracket set must reuse the
/// keys of the set it replaces, or the old brackets must be made inactive;
/// otherwise both sets are in force together and the table is rejected as
/// overlapping.
pub fn isr_parameters(parameters: &[LegalParameter], as_of: NaiveDate) -> Vec<LegalParameter> {
    let mut selected: Vec<LegalParameter> = latest_by_key(
        parameters
            .iter()
            .filter(|p| p.category == ParameterCategory::Isr && p.is_in_force(as_of)),
    )
    .into_iter()
    .cloned()
    .collect();
    selected.sort_by(|a, b| {
        a.min_range
            .unwrap_or(Decimal::ZERO)
            .cmp(&b.min_range.unwrap_or(Decimal::ZERO))
    });
    selected
}

/// Rejects parameters whose percentage is outside 0-100.
///
/// # Errors
///
/// Returns `InvalidParameter` for the first offending parameter.
pub fn validate_percentages(parameters: &[LegalParameter]) -> EngineResult<()> {
    if let Some(p) = parameters
        .iter()
        .find(|p| p.percentage < Decimal::ZERO || p.percentage > ONE_HUNDRED)
    {
        return Err(EngineError::InvalidParameter {
            key: p.key.clone(),
            message: format!("percentage {} must be between 0 and 100", p.percentage),
        });
    }
    Ok(())
}

/// Builds the validated ISR bracket table in force on `as_of`.
///
/// No ISR parameters yields an empty table, which taxes nothing.
pub fn isr_brackets(parameters: &[LegalParameter], as_of: NaiveDate) -> EngineResult<IsrBracketTable> {
    IsrBracketTable::from_parameters(&isr_parameters(parameters, as_of))
}

/// An employer-borne rate in force for a payroll date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerRate {
    /// The key of the legal parameter.
    pub key: String,
    /// The legal concept of the rate.
    pub category: ParameterCategory,
    /// The rate in percent.
    pub percentage: Decimal,
}

/// Returns the employer rates (social security, educational insurance, other)
/// in force on `as_of`, one per key (latest effective version wins), ordered
/// by key.
pub fn employer_rates(parameters: &[LegalParameter], as_of: NaiveDate) -> Vec<EmployerRate> {
    let mut rates: Vec<EmployerRate> = latest_by_key(parameters.iter().filter(|p| {
        p.parameter_type == ParameterType::Employer
            && p.category != ParameterCategory::Isr
            && p.is_in_force(as_of)
    }))
    .into_iter()
    .map(|p| EmployerRate {
        key: p.key.clone(),
        category: p.category,
        percentage: p.percentage,
    })
    .collect();
    rates.sort_by(|a, b| a.key.cmp(&b.key));
    rates
}

/// Applies employer rates to a gross salary, each amount rounded to cents.
///
/// Employer contributions are informational: they never reduce the
/// employee's net pay.
pub fn employer_contributions(rates: &[EmployerRate], gross_salary: Decimal) -> Vec<EmployerContribution> {
    rates
        .iter()
        .map(|rate| EmployerContribution {
            key: rate.key.clone(),
            category: rate.category,
            percentage: rate.percentage,
            amount: round_currency(percent_of(gross_salary, rate.percentage)),
        })
        .collect()
}

/// Every rate a payroll run needs, resolved once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollRates {
    /// The payroll date the rates were resolved for.
    pub as_of: NaiveDate,
    /// Employee social-security rate, in percent.
    pub social_security_rate: Decimal,
    /// Whether `social_security_rate` is the configured fallback.
    pub social_security_is_default: bool,
    /// The ISR bracket table.
    pub isr_table: IsrBracketTable,
    /// Employer rates.
    pub employer_rates: Vec<EmployerRate>,
}

impl PayrollRates {
    /// Resolves the rates in force on `as_of` from a parameter set.
    ///
    /// Fails only when the ISR brackets do not form a valid table.
    pub fn resolve(
        parameters: &[LegalParameter],
        as_of: NaiveDate,
        rules: &PayrollRules,
    ) -> EngineResult<Self> {
        let social_security_is_default = !parameters.iter().any(|p| {
            p.is_in_force(as_of)
                && p.matches(ParameterCategory::SocialSecurity, ParameterType::Employee)
        });

        Ok(Self {
            as_of,
            social_security_rate: sss_rate(parameters, as_of, rules),
            social_security_is_default,
            isr_table: isr_brackets(parameters, as_of)?,
            employer_rates: employer_rates(parameters, as_of),
        })
    }
}
