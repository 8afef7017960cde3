// crates/ontology-rules-config/src/config.rs
// ============================================================================
// Module: Ontology Rules Configuration
// Description: Configuration loading and validation for rule limits.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: ontology-rules-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional; missing sections fall back to the same defaults
//! the core validators use. Out-of-range limits fail closed.
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use ontology_rules_core::ConditionLimits;
use ontology_rules_core::MappingLimits;
use ontology_rules_core::condition::DEFAULT_MAX_DEPTH;
use ontology_rules_core::condition::DEFAULT_MAX_SUB_CONDITIONS;
use ontology_rules_core::mapping::DEFAULT_MAX_MAPPING_RULES;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "ontology-rules.toml";
/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "ONTOLOGY_RULES_CONFIG";
/// Maximum size of a configuration file in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a configuration path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Upper bound for `condition.max_sub_conditions`.
pub(crate) const MAX_SUB_CONDITIONS_CEILING: usize = 1024;
/// Upper bound for `condition.max_depth`.
pub(crate) const MAX_DEPTH_CEILING: usize = 256;
/// Upper bound for `mapping.max_rules`.
pub(crate) const MAX_MAPPING_RULES_CEILING: usize = 65_536;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Ontology rules configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Condition tree limits.
    #[serde(default)]
    pub condition: ConditionConfig,
    /// Mapping rule limits.
    #[serde(default)]
    pub mapping: MappingConfig,
}

impl RulesConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: `path`, then [`CONFIG_ENV_VAR`], then
    /// `ontology-rules.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range limits.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.condition.validate()?;
        self.mapping.validate()?;
        Ok(())
    }

    /// Returns the limits for the condition validator.
    #[must_use]
    pub const fn condition_limits(&self) -> ConditionLimits {
        ConditionLimits {
            max_sub_conditions: self.condition.max_sub_conditions,
            max_depth: self.condition.max_depth,
        }
    }

    /// Returns the limits for the mapping rule validator.
    #[must_use]
    pub const fn mapping_limits(&self) -> MappingLimits {
        MappingLimits {
            max_rules: self.mapping.max_rules,
        }
    }
}

/// Condition tree limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionConfig {
    /// Maximum sub-conditions per `and`/`or`/`knn` node.
    #[serde(default = "default_max_sub_conditions")]
    pub max_sub_conditions: usize,
    /// Maximum nesting depth below the root node.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ConditionConfig {
    fn default() -> Self {
        Self {
            max_sub_conditions: default_max_sub_conditions(),
            max_depth: default_max_depth(),
        }
    }
}

impl ConditionConfig {
    /// Validates condition limits.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_range(
            "condition.max_sub_conditions",
            self.max_sub_conditions,
            MAX_SUB_CONDITIONS_CEILING,
        )?;
        validate_range("condition.max_depth", self.max_depth, MAX_DEPTH_CEILING)
    }
}

/// Mapping rule limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    /// Maximum pairs per mapping rule list.
    #[serde(default = "default_max_rules")]
    pub max_rules: usize,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            max_rules: default_max_rules(),
        }
    }
}

impl MappingConfig {
    /// Validates mapping limits.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_range("mapping.max_rules", self.max_rules, MAX_MAPPING_RULES_CEILING)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from an explicit path, env var, or default name.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Rejects overlong paths and path components.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Checks that `value` lies in `1..=max`.
fn validate_range(field: &str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{field} must be greater than zero")));
    }
    if value > max {
        return Err(ConfigError::Invalid(format!("{field} must be at most {max}")));
    }
    Ok(())
}

/// Default fan-out limit.
const fn default_max_sub_conditions() -> usize {
    DEFAULT_MAX_SUB_CONDITIONS
}

/// Default depth limit.
const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Default mapping rule count limit.
const fn default_max_rules() -> usize {
    DEFAULT_MAX_MAPPING_RULES
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    #[test]
    fn validate_path_accepts_component_at_max() {
        let component = "a".repeat(MAX_PATH_COMPONENT_LENGTH);
        let path = PathBuf::from(format!("./{component}"));
        assert!(validate_path(&path).is_ok(), "max-length component should pass");
    }

    #[test]
    fn validate_path_rejects_component_too_long() {
        let component = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        let path = PathBuf::from(format!("./{component}"));
        let err = validate_path(&path).unwrap_err();
        assert!(err.to_string().contains("component too long"));
    }

    #[test]
    fn validate_range_bounds_are_inclusive() {
        assert!(validate_range("field", 1, 4).is_ok());
        assert!(validate_range("field", 4, 4).is_ok());
        assert!(validate_range("field", 0, 4).unwrap_err().to_string().contains("greater than zero"));
        assert!(validate_range("field", 5, 4).unwrap_err().to_string().contains("at most 4"));
    }

    #[test]
    fn explicit_path_wins_over_default_name() {
        let resolved = resolve_path(Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(resolved, PathBuf::from("custom.toml"));
    }

    #[test]
    fn defaults_match_core_limits() {
        let config = RulesConfig::default();
        assert!(config.validate().is_ok(), "defaults should pass validation");
        assert_eq!(config.condition_limits(), ConditionLimits::default());
        assert_eq!(config.mapping_limits(), MappingLimits::default());
    }
}
