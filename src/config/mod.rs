//! Configuration loading and management for the payroll engine.
//!
//! This module loads the jurisdiction's payroll constants and its default
//! legal parameter set from YAML files. The constants live in
//! [`PayrollRules`] so that a different jurisdiction can be configured
//! without code changes.
//!
//! # Example
//!
//! ```no_run
//! use planilla_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/panama").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_BIWEEKLY_PERIODS_PER_YEAR, DEFAULT_ISR_EXEMPTION_THRESHOLD,
    DEFAULT_SOCIAL_SECURITY_RATE, DEFAULT_THIRTEENTH_MONTH_SOCIAL_SECURITY_RATE,
    JurisdictionConfig, JurisdictionFile, JurisdictionMetadata, LegalParametersFile,
    PayrollRules, ThirteenthMonthRules,
};
