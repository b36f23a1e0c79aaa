//! Analyzer error taxonomy
//!
//! Every analyzer either returns a complete assessment or fails atomically with
//! one of these errors. Nothing is silently defaulted: a fabricated diagnosis is
//! worse than a reported failure.

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the domain analyzers.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    /// A name (pump size, product, foundation) that the reference data does not know.
    #[error("Unknown {category} '{value}'")]
    Configuration {
        category: &'static str,
        value: String,
    },

    /// A physically impossible reading or reference value.
    #[error("Invalid {field} = {value}: {reason}")]
    Validation {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A domain needs several reading sections and only some were supplied.
    #[error("Incomplete input: '{missing}' section is required alongside '{present}'")]
    Incomplete {
        missing: &'static str,
        present: &'static str,
    },
}

impl AnalysisError {
    pub fn unknown(category: &'static str, value: impl Into<String>) -> Self {
        Self::Configuration {
            category,
            value: value.into(),
        }
    }

    pub fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Validation {
            field,
            value,
            reason,
        }
    }

    /// Short machine-readable category for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Validation { .. } => "validation",
            Self::Incomplete { .. } => "incomplete",
        }
    }
}

/// Result alias used across the analyzers.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

pub(crate) fn check_finite(field: &'static str, value: f64) -> AnalysisResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::invalid(field, value, "must be a finite number"))
    }
}

pub(crate) fn check_non_negative(field: &'static str, value: f64) -> AnalysisResult<f64> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(AnalysisError::invalid(field, value, "cannot be negative"));
    }
    Ok(value)
}

/// Used for reference values that end up as divisors.
pub(crate) fn check_positive(field: &'static str, value: f64) -> AnalysisResult<f64> {
    check_finite(field, value)?;
    if value <= 0.0 {
        return Err(AnalysisError::invalid(
            field,
            value,
            "must be greater than zero (used as divisor)",
        ));
    }
    Ok(value)
}
