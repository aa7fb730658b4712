//! Request types for the payroll API.
//!
//! This module defines the JSON request bodies. Field names are camelCase
//! to match the records the HR API serves.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, LegalParameter, PayrollOverride};

/// Request body for `POST /payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRunRequest {
    /// The payroll date; its month drives rate selection and the thirteenth month.
    pub payroll_date: NaiveDate,
    /// The employees to pay.
    pub employees: Vec<Employee>,
    /// Legal parameters; the configured default set is used when omitted.
    #[serde(default)]
    pub parameters: Option<Vec<LegalParameter>>,
    /// Adjusted amounts keyed by `cedula`.
    #[serde(default)]
    pub overrides: HashMap<String, PayrollOverride>,
    /// Whether to include thirteenth-month columns in the totals.
    #[serde(default)]
    pub include_thirteenth: bool,
}

/// Request body for `POST /payroll/thirteenth-month`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirteenthMonthRequest {
    /// Qualifying income earned during the window.
    pub total_income: Decimal,
    /// Zero-based payroll month (0 = January).
    pub month: u32,
    /// The date the ISR brackets are resolved for; today when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// Legal parameters; the configured default set is used when omitted.
    #[serde(default)]
    pub parameters: Option<Vec<LegalParameter>>,
}
