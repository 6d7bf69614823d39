//! Engine configuration.
//!
//! Settings can be read from a YAML file, overridden from the environment
//! and adjusted with builder methods. Every default matches the built-in
//! constants of the validator and the difficulty controller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::difficulty::ControllerConfig;
use crate::error::ConfigError;
use crate::generator::SelectorPolicy;
use crate::validation::ValidatorConfig;

/// Configuration for [`crate::TaskEngine`], [`crate::AnswerValidator`] and
/// [`crate::DifficultyController`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub validator: ValidatorConfig,
    pub controller: ControllerConfig,
    /// Handling of unknown micro-skill and misconception names.
    pub selector_policy: SelectorPolicy,
}

impl EngineConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates a YAML configuration file. Missing keys keep
    /// their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `MATH_FORGE_NUMERIC_TOLERANCE`: Tolerance for numeric answers (default: 1e-9)
    /// - `MATH_FORGE_EQUATION_TOLERANCE`: Tolerance for solution sets (default: 1e-6)
    /// - `MATH_FORGE_HISTORY_WINDOW`: Entries used for the optimal difficulty (default: 5)
    /// - `MATH_FORGE_DEFAULT_DIFFICULTY`: Difficulty for an empty history (default: 3)
    /// - `MATH_FORGE_SELECTOR_POLICY`: `strict` or `fallback` (default: strict)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Applies the `MATH_FORGE_*` environment variables on top of this
    /// configuration.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(val) = std::env::var("MATH_FORGE_NUMERIC_TOLERANCE") {
            self.validator.numeric_tolerance =
                parse_env_value(&val, "MATH_FORGE_NUMERIC_TOLERANCE")?;
        }

        if let Ok(val) = std::env::var("MATH_FORGE_EQUATION_TOLERANCE") {
            self.validator.equation_tolerance =
                parse_env_value(&val, "MATH_FORGE_EQUATION_TOLERANCE")?;
        }

        if let Ok(val) = std::env::var("MATH_FORGE_HISTORY_WINDOW") {
            self.controller.history_window = parse_env_value(&val, "MATH_FORGE_HISTORY_WINDOW")?;
        }

        if let Ok(val) = std::env::var("MATH_FORGE_DEFAULT_DIFFICULTY") {
            self.controller.default_difficulty =
                parse_env_value(&val, "MATH_FORGE_DEFAULT_DIFFICULTY")?;
        }

        if let Ok(val) = std::env::var("MATH_FORGE_SELECTOR_POLICY") {
            self.selector_policy = val.parse().map_err(|message| ConfigError::InvalidValue {
                key: "MATH_FORGE_SELECTOR_POLICY".to_string(),
                message,
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let validator = &self.validator;
        if validator.numeric_tolerance.is_nan() || validator.numeric_tolerance <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "validator.numeric_tolerance must be greater than 0".to_string(),
            ));
        }

        if validator.equation_tolerance.is_nan() || validator.equation_tolerance <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "validator.equation_tolerance must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("exact_confidence", validator.exact_confidence),
            ("formula_confidence", validator.formula_confidence),
            ("misconception_confidence", validator.misconception_confidence),
            ("incorrect_confidence", validator.incorrect_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationFailed(format!(
                    "validator.{} must be between 0.0 and 1.0",
                    name
                )));
            }
        }

        let controller = &self.controller;
        if controller.history_window == 0 {
            return Err(ConfigError::ValidationFailed(
                "controller.history_window must be greater than 0".to_string(),
            ));
        }

        if controller.mastery_window == 0 {
            return Err(ConfigError::ValidationFailed(
                "controller.mastery_window must be greater than 0".to_string(),
            ));
        }

        if !(1.0..=10.0).contains(&controller.default_difficulty) {
            return Err(ConfigError::ValidationFailed(
                "controller.default_difficulty must be between 1 and 10".to_string(),
            ));
        }

        if !(1.0..=10.0).contains(&controller.mastery_min_difficulty) {
            return Err(ConfigError::ValidationFailed(
                "controller.mastery_min_difficulty must be between 1 and 10".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&controller.mastery_min_confidence) {
            return Err(ConfigError::ValidationFailed(
                "controller.mastery_min_confidence must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }

    // Builder methods

    pub fn with_validator(mut self, validator: ValidatorConfig) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_controller(mut self, controller: ControllerConfig) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_selector_policy(mut self, policy: SelectorPolicy) -> Self {
        self.selector_policy = policy;
        self
    }

    pub fn with_numeric_tolerance(mut self, tolerance: f64) -> Self {
        self.validator.numeric_tolerance = tolerance;
        self
    }

    pub fn with_equation_tolerance(mut self, tolerance: f64) -> Self {
        self.validator.equation_tolerance = tolerance;
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.controller.history_window = window;
        self
    }

    pub fn with_default_difficulty(mut self, difficulty: f64) -> Self {
        self.controller.default_difficulty = difficulty;
        self
    }
}

/// Parse an environment variable value into a type.
fn parse_env_value<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("could not parse '{}'", value),
    })
}
