//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading legal rules or
//! computing a payroll.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Missing data is handled by falling back to configured defaults, so most
/// calculations never fail. Errors are reserved for configuration problems and
/// for legal parameters that would silently produce a wrong withholding.
///
/// # Example
///
/// ```
/// use planilla_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/jurisdiction.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/jurisdiction.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An ISR bracket table could not be built from the supplied parameters.
    #[error("Invalid ISR bracket '{key}': {message}")]
    InvalidBracket {
        /// The key of the offending legal parameter.
        key: String,
        /// A description of what made the bracket invalid.
        message: String,
    },

    /// A legal parameter was invalid or contained inconsistent data.
    #[error("Invalid legal parameter '{key}': {message}")]
    InvalidParameter {
        /// The key of the invalid parameter.
        key: String,
        /// A description of what made the parameter invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
