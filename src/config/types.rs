//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::LegalParameter;

/// Social-security rate used when no active employee rate is published (2.87 %).
pub const DEFAULT_SOCIAL_SECURITY_RATE: Decimal = Decimal::from_parts(287, 0, 0, false, 2);

/// Biweekly pay periods in a year.
pub const DEFAULT_BIWEEKLY_PERIODS_PER_YEAR: u32 = 26;

/// Social-security rate withheld from the thirteenth month (7.25 %).
pub const DEFAULT_THIRTEENTH_MONTH_SOCIAL_SECURITY_RATE: Decimal =
    Decimal::from_parts(725, 0, 0, false, 2);

/// Annual income below which the thirteenth month carries no income tax.
pub const DEFAULT_ISR_EXEMPTION_THRESHOLD: Decimal = Decimal::from_parts(11000, 0, 0, false, 0);

/// Metadata about the jurisdiction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// ISO country code (e.g., "PA").
    pub code: String,
    /// The human-readable name of the jurisdiction.
    pub name: String,
    /// The version or effective date of the rule set.
    pub version: String,
    /// URL to the official legal source.
    pub source_url: String,
}

/// Thirteenth-month rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirteenthMonthRules {
    /// Social-security rate withheld from the installment, in percent.
    pub social_security_rate: Decimal,
    /// Annualized income at or below which the installment is not taxed.
    pub isr_exemption_threshold: Decimal,
}

impl Default for ThirteenthMonthRules {
    fn default() -> Self {
        Self {
            social_security_rate: DEFAULT_THIRTEENTH_MONTH_SOCIAL_SECURITY_RATE,
            isr_exemption_threshold: DEFAULT_ISR_EXEMPTION_THRESHOLD,
        }
    }
}

/// The jurisdictional constants the calculator depends on.
///
/// `PayrollRules::default()` carries the Panama values, so the calculator
/// stays usable when no configuration directory is available.
///
/// # Example
///
/// ```
/// use planilla_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayrollRules::default();
/// assert_eq!(rules.default_social_security_rate, Decimal::new(287, 2));
/// assert_eq!(rules.biweekly_periods_per_year, 26);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRules {
    /// Employee social-security rate used when none is published, in percent.
    pub default_social_security_rate: Decimal,
    /// Number of biweekly pay periods in a year.
    pub biweekly_periods_per_year: u32,
    /// Thirteenth-month rules.
    #[serde(default)]
    pub thirteenth_month: ThirteenthMonthRules,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            default_social_security_rate: DEFAULT_SOCIAL_SECURITY_RATE,
            biweekly_periods_per_year: DEFAULT_BIWEEKLY_PERIODS_PER_YEAR,
            thirteenth_month: ThirteenthMonthRules::default(),
        }
    }
}

/// Jurisdiction configuration file structure (`jurisdiction.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionFile {
    /// Jurisdiction metadata.
    pub jurisdiction: JurisdictionMetadata,
    /// Payroll constants.
    pub payroll: PayrollRules,
}

/// Legal parameters file structure (`legal_parameters.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct LegalParametersFile {
    /// The default legal parameter set.
    pub parameters: Vec<LegalParameter>,
}

/// The complete jurisdiction configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct JurisdictionConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Payroll constants.
    rules: PayrollRules,
    /// Default legal parameters (sorted by effective date, oldest first).
    parameters: Vec<LegalParameter>,
}

impl JurisdictionConfig {
    /// Creates a new JurisdictionConfig from its component parts.
    pub fn new(
        metadata: JurisdictionMetadata,
        rules: PayrollRules,
        parameters: Vec<LegalParameter>,
    ) -> Self {
        let mut sorted_parameters = parameters;
        sorted_parameters.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rules,
            parameters: sorted_parameters,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the payroll constants.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Returns all default legal parameters.
    pub fn parameters(&self) -> &[LegalParameter] {
        &self.parameters
    }

    /// Returns the default parameters in force on `date`.
    pub fn parameters_in_force(&self, date: NaiveDate) -> Vec<LegalParameter> {
        self.parameters
            .iter()
            .filter(|p| p.is_in_force(date))
            .cloned()
            .collect()
    }
}
