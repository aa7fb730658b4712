//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod legal_parameter;
mod thirteenth_month_period;

pub use calculation_result::{
    AuditStep, EmployerContribution, PayrollCalculation, PayrollRun, PayrollTotals,
    ThirteenthMonthCalculation, ThirteenthMonthTotals,
};
pub use employee::{Employee, PayrollOverride, SalaryType};
pub use legal_parameter::{LegalParameter, ParameterCategory, ParameterStatus, ParameterType};
pub use thirteenth_month_period::{THIRTEENTH_MONTH_WINDOW_MONTHS, ThirteenthMonthPeriod};
