//! Error types for math-forge operations.
//!
//! Defines error types for the fallible subsystems:
//! - Task generation (unsupported selectors, invalid parameters)
//! - Engine configuration loading and validation
//!
//! Answer validation and difficulty adaptation are total functions and
//! have no error type of their own.

use thiserror::Error;

/// Which kind of selector a caller passed to a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// A micro-skill tag passed to `generate_task`.
    MicroSkill,
    /// A misconception name passed to `generate_misconception_task`.
    Misconception,
}

impl std::fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectorKind::MicroSkill => write!(f, "micro-skill"),
            SelectorKind::Misconception => write!(f, "misconception"),
        }
    }
}

/// Errors that can occur during task generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Unsupported {kind} '{value}' for department '{department}'")]
    UnsupportedSelector {
        department: String,
        kind: SelectorKind,
        value: String,
    },

    #[error("Invalid parameter value: {0}")]
    InvalidParameter(String),
}

impl GeneratorError {
    /// Shorthand for an unsupported selector error.
    pub fn unsupported(
        department: impl Into<String>,
        kind: SelectorKind,
        value: impl Into<String>,
    ) -> Self {
        GeneratorError::UnsupportedSelector {
            department: department.into(),
            kind,
            value: value.into(),
        }
    }

    /// Returns true if this error is an unsupported selector outcome.
    pub fn is_unsupported_selector(&self) -> bool {
        matches!(self, GeneratorError::UnsupportedSelector { .. })
    }
}

/// Errors that can occur while loading or validating engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
