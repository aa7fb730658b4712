//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading jurisdiction
//! configurations from YAML files.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::calculation::{isr_brackets, validate_percentages};
use crate::error::{EngineError, EngineResult};
use crate::models::{LegalParameter, ParameterCategory};

use super::types::{
    JurisdictionConfig, JurisdictionFile, JurisdictionMetadata, LegalParametersFile, PayrollRules,
};

/// Loads and provides access to jurisdiction configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// validates the default legal parameters before exposing them.
///
/// # Directory Structure
///
/// ```text
/// config/panama/
/// ├── jurisdiction.yaml     # Metadata and payroll constants
/// └── legal_parameters.yaml # Default legal parameter set
/// ```
///
/// # Example
///
/// ```no_run
/// use planilla_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/panama").unwrap();
/// println!("Jurisdiction: {}", loader.jurisdiction().name);
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// println!("{} parameters in force", loader.parameters_in_force(date).len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: JurisdictionConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/panama")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A parameter percentage is outside 0-100
    /// - The ISR brackets in force on any of their effective dates overlap or
    ///   are inverted
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let jurisdiction_path = path.join("jurisdiction.yaml");
        let jurisdiction = Self::load_yaml::<JurisdictionFile>(&jurisdiction_path)?;

        let parameters_path = path.join("legal_parameters.yaml");
        let parameters = Self::load_yaml::<LegalParametersFile>(&parameters_path)?;

        Self::validate_parameters(&parameters.parameters)?;

        Ok(Self {
            config: JurisdictionConfig::new(
                jurisdiction.jurisdiction,
                jurisdiction.payroll,
                parameters.parameters,
            ),
        })
    }

    /// Creates a loader from an already-built configuration.
    pub fn from_config(config: JurisdictionConfig) -> EngineResult<Self> {
        Self::validate_parameters(config.parameters())?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects parameter sets that would produce a wrong withholding.
    fn validate_parameters(parameters: &[LegalParameter]) -> EngineResult<()> {
        validate_percentages(parameters)?;

        // The bracket table can change on every ISR effective date.
        let isr_dates: BTreeSet<NaiveDate> = parameters
            .iter()
            .filter(|p| p.category == ParameterCategory::Isr)
            .map(|p| p.effective_date)
            .collect();
        for date in isr_dates {
            isr_brackets(parameters, date)?;
        }

        Ok(())
    }

    /// Returns the underlying jurisdiction configuration.
    pub fn config(&self) -> &JurisdictionConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.config.jurisdiction()
    }

    /// Returns the payroll constants.
    pub fn rules(&self) -> &PayrollRules {
        self.config.rules()
    }

    /// Returns all default legal parameters.
    pub fn parameters(&self) -> &[LegalParameter] {
        self.config.parameters()
    }

    /// Returns the default legal parameters in force on `date`.
    pub fn parameters_in_force(&self, date: NaiveDate) -> Vec<LegalParameter> {
        self.config.parameters_in_force(date)
    }
}
