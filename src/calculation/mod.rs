//! Calculation logic for the payroll engine.
//!
//! This module contains every calculation the engine performs: salary
//! normalization across pay frequencies, selection of the rates in force,
//! progressive income tax over a validated bracket table, thirteenth-month
//! proration by legal window, per-employee payroll composition, and
//! column totals over a payroll run.
//!
//! Every function here is pure: no I/O, no shared state.

mod employee_payroll;
mod isr;
mod payroll_run;
mod rates;
mod rounding;
mod salary;
mod thirteenth_month;

pub use employee_payroll::{
    ISR_LEGAL_REF, SOCIAL_SECURITY_LEGAL_REF, THIRTEENTH_MONTH_LEGAL_REF,
    calculate_employee_payroll,
};
pub use isr::{IsrBracket, IsrBracketTable, calculate_isr};
pub use payroll_run::{calculate_all_payrolls, calculate_payroll_run, calculate_totals};
pub use rates::{
    EmployerRate, PayrollRates, employer_contributions, employer_rates, isr_brackets,
    isr_parameters, sss_rate, validate_percentages,
};
pub use rounding::{CURRENCY_DECIMAL_PLACES, MAX_AMOUNT, check_amount, percent_of, round_currency};
pub use salary::{MONTHS_PER_YEAR, normalized_monthly_salary};
pub use thirteenth_month::{
    annualized_window_income, calculate_thirteenth_month, calculate_thirteenth_month_by_period,
};
