//! Payroll runs over a whole workforce.
//!
//! This module maps every employee through [`calculate_employee_payroll`],
//! sums the results column by column, and wraps them in a [`PayrollRun`].

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::PayrollRules;
use crate::error::EngineResult;
use crate::models::{
    Employee, LegalParameter, PayrollCalculation, PayrollOverride, PayrollRun, PayrollTotals,
    ThirteenthMonthTotals,
};

use super::employee_payroll::calculate_employee_payroll;
use super::rates::{PayrollRates, validate_percentages};
use super::rounding::{check_amount, round_currency};

/// Calculates the payroll of every employee for the month of `payroll_date`.
///
/// `overrides` is keyed by the employee's `cedula`. Rates are resolved once
/// from `parameters` and shared by every employee.
///
/// Returns an empty list when either `employees` or `parameters` is empty,
/// so a screen can render before its data has loaded.
///
/// # Errors
///
/// Returns `InvalidParameter` when a percentage is outside 0-100,
/// `CalculationError` when a salary or override amount exceeds
/// [`MAX_AMOUNT`](super::rounding::MAX_AMOUNT), and `InvalidBracket` when the
/// ISR parameters in force do not form a valid bracket table.
pub fn calculate_all_payrolls(
    employees: &[Employee],
    parameters: &[LegalParameter],
    payroll_date: NaiveDate,
    overrides: &HashMap<String, PayrollOverride>,
    rules: &PayrollRules,
) -> EngineResult<Vec<PayrollCalculation>> {
    if employees.is_empty() || parameters.is_empty() {
        debug!(
            employees = employees.len(),
            parameters = parameters.len(),
            "Nothing to calculate"
        );
        return Ok(Vec::new());
    }

    validate_percentages(parameters)?;
    for employee in employees {
        check_employee_amounts(employee, overrides.get(&employee.cedula))?;
    }

    let rates = PayrollRates::resolve(parameters, payroll_date, rules)?;
    if rates.social_security_is_default {
        warn!(
            payroll_date = %payroll_date,
            rate = %rates.social_security_rate,
            "No social security rate in force, using default"
        );
    }

    Ok(employees
        .iter()
        .map(|employee| {
            calculate_employee_payroll(
                employee,
                &rates,
                payroll_date,
                overrides.get(&employee.cedula),
                rules,
            )
        })
        .collect())
}

/// Rejects a salary or override amount too large to calculate with.
fn check_employee_amounts(
    employee: &Employee,
    overrides: Option<&PayrollOverride>,
) -> EngineResult<()> {
    let field = |name: &str| format!("{} of employee {}", name, employee.cedula);
    check_amount(&field("salary"), employee.salary)?;

    if let Some(overrides) = overrides {
        let amounts = [
            ("base salary", overrides.base_salary),
            ("overtime", overrides.overtime),
            ("bonuses", overrides.bonuses),
            ("other income", overrides.other_income),
            ("other deductions", overrides.other_deductions),
        ];
        for (name, amount) in amounts {
            if let Some(amount) = amount {
                check_amount(&field(name), amount)?;
            }
        }
    }
    Ok(())
}

/// Sums a payroll run column by column.
///
/// Every column is summed and then rounded to cents on its own. When
/// `include_thirteenth` is set, the thirteenth-month columns are summed over
/// the calculations that carry an installment.
///
/// # Examples
///
/// ```
/// use planilla_engine::calculation::calculate_totals;
/// use rust_decimal::Decimal;
///
/// let totals = calculate_totals(&[], false);
/// assert_eq!(totals.employees, 0);
/// assert_eq!(totals.gross_salary, Decimal::ZERO);
/// assert!(totals.thirteenth_month.is_none());
/// ```
pub fn calculate_totals(
    calculations: &[PayrollCalculation],
    include_thirteenth: bool,
) -> PayrollTotals {
    let column = |f: fn(&PayrollCalculation) -> Decimal| -> Decimal {
        round_currency(calculations.iter().map(f).sum())
    };

    let thirteenth_month = include_thirteenth.then(|| {
        let installments: Vec<_> = calculations
            .iter()
            .filter_map(|c| c.thirteenth_month.as_ref())
            .collect();
        ThirteenthMonthTotals {
            gross_amount: round_currency(installments.iter().map(|t| t.gross_amount).sum()),
            social_security: round_currency(installments.iter().map(|t| t.social_security).sum()),
            income_tax: round_currency(installments.iter().map(|t| t.income_tax).sum()),
            net_amount: round_currency(installments.iter().map(|t| t.net_amount).sum()),
        }
    });

    PayrollTotals {
        employees: calculations.len(),
        base_salary: column(|c| c.base_salary),
        overtime: column(|c| c.overtime),
        bonuses: column(|c| c.bonuses),
        other_income: column(|c| c.other_income),
        gross_salary: column(|c| c.gross_salary),
        social_security: column(|c| c.social_security),
        income_tax: column(|c| c.income_tax),
        other_deductions: column(|c| c.other_deductions),
        total_deductions: column(|c| c.total_deductions),
        net_salary_monthly: column(|c| c.net_salary_monthly),
        net_salary_biweekly: column(|c| c.net_salary_biweekly),
        employer_contributions: column(|c| c.employer_contributions_total()),
        thirteenth_month,
    }
}

/// Calculates a complete payroll run: every employee plus the totals.
pub fn calculate_payroll_run(
    employees: &[Employee],
    parameters: &[LegalParameter],
    payroll_date: NaiveDate,
    overrides: &HashMap<String, PayrollOverride>,
    include_thirteenth: bool,
    rules: &PayrollRules,
) -> EngineResult<PayrollRun> {
    let calculations =
        calculate_all_payrolls(employees, parameters, payroll_date, overrides, rules)?;
    let totals = calculate_totals(&calculations, include_thirteenth);

    Ok(PayrollRun {
        run_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        payroll_date,
        calculations,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{ParameterCategory, ParameterStatus, ParameterType, SalaryType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(cedula: &str, salary: &str, salary_type: SalaryType) -> Employee {
        Employee {
            cedula: cedula.to_string(),
            first_name: "Empleado".to_string(),
            last_name: cedula.to_string(),
            salary: dec(salary),
            salary_type,
        }
    }

    fn parameter(
        key: &str,
        category: ParameterCategory,
        parameter_type: ParameterType,
        percentage: &str,
        range: Option<(&str, Option<&str>)>,
    ) -> LegalParameter {
        LegalParameter {
            key: key.to_string(),
            name: key.to_string(),
            category,
            parameter_type,
            percentage: dec(percentage),
            min_range: range.map(|(min, _)| dec(min)),
            max_range: range.and_then(|(_, max)| max.map(dec)),
            status: ParameterStatus::Active,
            effective_date: date(2024, 1, 1),
        }
    }

    fn panama_parameters() -> Vec<LegalParameter> {
        vec![
            parameter(
                "css_empleado",
                ParameterCategory::SocialSecurity,
                ParameterType::Employee,
                "9.75",
                None,
            ),
            parameter(
                "isr_exento",
                ParameterCategory::Isr,
                ParameterType::Employee,
                "0",
                Some(("0", Some("11000"))),
            ),
            parameter(
                "isr_15",
                ParameterCategory::Isr,
                ParameterType::Employee,
                "15",
                Some(("11000", Some("50000"))),
            ),
            parameter(
                "isr_25",
                ParameterCategory::Isr,
                ParameterType::Employee,
                "25",
                Some(("50000", None)),
            ),
        ]
    }

    #[test]
    fn test_no_employees_yields_empty_result() {
        let rules = PayrollRules::default();
        let result = calculate_all_payrolls(
            &[],
            &panama_parameters(),
            date(2025, 1, 31),
            &HashMap::new(),
            &rules,
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_parameters_yields_empty_result() {
        let rules = PayrollRules::default();
        let employees = vec![employee("1-1-1", "1000", SalaryType::Monthly)];
        let result =
            calculate_all_payrolls(&employees, &[], date(2025, 1, 31), &HashMap::new(), &rules)
                .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_every_employee_is_calculated_in_order() {
        let rules = PayrollRules::default();
        let employees = vec![
            employee("1-1-1", "1000", SalaryType::Monthly),
            employee("2-2-2", "500", SalaryType::Biweekly),
            employee("3-3-3", "2000", SalaryType::Monthly),
        ];
        let result = calculate_all_payrolls(
            &employees,
            &panama_parameters(),
            date(2025, 1, 31),
            &HashMap::new(),
            &rules,
        )
        .unwrap();

        let cedulas: Vec<&str> = result.iter().map(|c| c.cedula.as_str()).collect();
        assert_eq!(cedulas, vec!["1-1-1", "2-2-2", "3-3-3"]);
        assert_eq!(result[0].social_security, dec("97.50"));
        assert_eq!(result[1].base_salary, dec("1083.33"));
    }

    #[test]
    fn test_overrides_apply_only_to_matching_cedula() {
        let rules = PayrollRules::default();
        let employees = vec![
            employee("1-1-1", "1000", SalaryType::Monthly),
            employee("2-2-2", "1000", SalaryType::Monthly),
        ];
        let mut overrides = HashMap::new();
        overrides.insert(
            "2-2-2".to_string(),
            PayrollOverride {
                bonuses: Some(dec("100")),
                ..Default::default()
            },
        );
        let result = calculate_all_payrolls(
            &employees,
            &panama_parameters(),
            date(2025, 1, 31),
            &overrides,
            &rules,
        )
        .unwrap();

        assert_eq!(result[0].gross_salary, dec("1000"));
        assert_eq!(result[1].gross_salary, dec("1100"));
    }

    #[test]
    fn test_invalid_brackets_are_reported() {
        let rules = PayrollRules::default();
        let employees = vec![employee("1-1-1", "1000", SalaryType::Monthly)];
        let mut parameters = panama_parameters();
        parameters.push(parameter(
            "isr_duplicado",
            ParameterCategory::Isr,
            ParameterType::Employee,
            "10",
            Some(("40000", Some("60000"))),
        ));
        let result = calculate_all_payrolls(
            &employees,
            &parameters,
            date(2025, 1, 31),
            &HashMap::new(),
            &rules,
        );
        assert!(matches!(result, Err(EngineError::InvalidBracket { .. })));
    }

    #[test]
    fn test_salary_beyond_maximum_is_rejected() {
        let rules = PayrollRules::default();
        let employees = vec![employee(
            "1-1-1",
            "70000000000000000000000000000",
            SalaryType::Monthly,
        )];
        let result = calculate_all_payrolls(
            &employees,
            &panama_parameters(),
            date(2025, 1, 31),
            &HashMap::new(),
            &rules,
        );
        match result {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("salary of employee 1-1-1"))
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_override_beyond_maximum_is_rejected() {
        let rules = PayrollRules::default();
        let employees = vec![employee("1-1-1", "1000", SalaryType::Monthly)];
        let mut overrides = HashMap::new();
        overrides.insert(
            "1-1-1".to_string(),
            PayrollOverride {
                overtime: Some(dec("-5000000000000")),
                ..Default::default()
            },
        );
        let result = calculate_all_payrolls(
            &employees,
            &panama_parameters(),
            date(2025, 1, 31),
            &overrides,
            &rules,
        );
        match result {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("overtime of employee 1-1-1"))
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_percentage_out_of_range_is_rejected() {
        let rules = PayrollRules::default();
        let employees = vec![employee("1-1-1", "1000", SalaryType::Monthly)];
        let mut parameters = panama_parameters();
        parameters[0].percentage = dec("1000000");
        let result = calculate_all_payrolls(
            &employees,
            &parameters,
            date(2025, 1, 31),
            &HashMap::new(),
            &rules,
        );
        assert!(matches!(result, Err(EngineError::InvalidParameter { .. })));
    }

    #[test]
    fn test_totals_of_single_calculation_equal_its_fields() {
        let rules = PayrollRules::default();
        let employees = vec![employee("1-1-1", "2345.67", SalaryType::Monthly)];
        let result = calculate_all_payrolls(
            &employees,
            &panama_parameters(),
            date(2025, 4, 30),
            &HashMap::new(),
            &rules,
        )
        .unwrap();
        let calc = &result[0];
        let totals = calculate_totals(&result, true);

        assert_eq!(totals.employees, 1);
        assert_eq!(totals.base_salary, calc.base_salary);
        assert_eq!(totals.gross_salary, calc.gross_salary);
        assert_eq!(totals.social_security, calc.social_security);
        assert_eq!(totals.income_tax, calc.income_tax);
        assert_eq!(totals.total_deductions, calc.total_deductions);
        assert_eq!(totals.net_salary_monthly, calc.net_salary_monthly);
        assert_eq!(totals.net_salary_biweekly, calc.net_salary_biweekly);

        let bonus = calc.thirteenth_month.as_ref().unwrap();
        let bonus_totals = totals.thirteenth_month.unwrap();
        assert_eq!(bonus_totals.gross_amount, bonus.gross_amount);
        assert_eq!(bonus_totals.net_amount, bonus.net_amount);
    }

    #[test]
    fn test_totals_sum_each_column() {
        let rules = PayrollRules::default();
        let employees = vec![
            employee("1-1-1", "1000", SalaryType::Monthly),
            employee("2-2-2", "2000", SalaryType::Monthly),
        ];
        let result = calculate_all_payrolls(
            &employees,
            &panama_parameters(),
            date(2025, 1, 31),
            &HashMap::new(),
            &rules,
        )
        .unwrap();
        let totals = calculate_totals(&result, false);

        assert_eq!(totals.employees, 2);
        assert_eq!(totals.gross_salary, dec("3000"));
        assert_eq!(totals.social_security, dec("292.50"));
        assert_eq!(totals.income_tax, dec("133.25"));
        assert!(totals.thirteenth_month.is_none());
    }

    #[test]
    fn test_thirteenth_totals_are_zero_outside_payment_months() {
        let rules = PayrollRules::default();
        let employees = vec![employee("1-1-1", "1000", SalaryType::Monthly)];
        let result = calculate_all_payrolls(
            &employees,
            &panama_parameters(),
            date(2025, 2, 28),
            &HashMap::new(),
            &rules,
        )
        .unwrap();
        let totals = calculate_totals(&result, true);
        let bonus_totals = totals.thirteenth_month.unwrap();
        assert_eq!(bonus_totals.gross_amount, Decimal::ZERO);
        assert_eq!(bonus_totals.net_amount, Decimal::ZERO);
    }

    #[test]
    fn test_payroll_run_wraps_calculations_and_totals() {
        let rules = PayrollRules::default();
        let employees = vec![employee("1-1-1", "1000", SalaryType::Monthly)];
        let run = calculate_payroll_run(
            &employees,
            &panama_parameters(),
            date(2025, 8, 31),
            &HashMap::new(),
            true,
            &rules,
        )
        .unwrap();

        assert_eq!(run.payroll_date, date(2025, 8, 31));
        assert_eq!(run.calculations.len(), 1);
        assert_eq!(run.totals.employees, 1);
        assert_eq!(run.engine_version, env!("CARGO_PKG_VERSION"));
        assert!(run.totals.thirteenth_month.is_some());
    }
}
