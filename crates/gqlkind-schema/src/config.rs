//! Schema configuration.
//!
//! Configuration can be embedded in an application's TOML file under a
//! `[schema]` section.
//!
//! # Example Configuration
//!
//! ```toml
//! [schema]
//! validate_reachable = true
//! max_wrapper_depth = 6
//! sdl_descriptions = false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Options controlling schema construction and printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Validate every type reachable from the root fields when building.
    /// This forces all lazy field lists up front.
    /// Default: false (root fields only)
    #[serde(default = "default_validate_reachable")]
    pub validate_reachable: bool,

    /// Maximum number of List/NonNullable layers on one type reference.
    /// Default: 8
    #[serde(default = "default_max_wrapper_depth")]
    pub max_wrapper_depth: usize,

    /// Include descriptions when printing SDL.
    /// Default: true
    #[serde(default = "default_sdl_descriptions")]
    pub sdl_descriptions: bool,
}

fn default_validate_reachable() -> bool {
    false
}

fn default_max_wrapper_depth() -> usize {
    8
}

fn default_sdl_descriptions() -> bool {
    true
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            validate_reachable: default_validate_reachable(),
            max_wrapper_depth: default_max_wrapper_depth(),
            sdl_descriptions: default_sdl_descriptions(),
        }
    }
}

/// TOML document layout: options live under `[schema]`, other sections
/// belong to the application.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    schema: SchemaConfig,
}

impl SchemaConfig {
    /// Parses the `[schema]` section of a TOML document.
    ///
    /// A document without the section yields the defaults. Keys placed at the
    /// root are left to the application.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidConfig` if the TOML is malformed, the
    /// section holds unknown keys, or the values fail
    /// [`SchemaConfig::validate`].
    pub fn from_toml(source: &str) -> Result<Self, SchemaError> {
        let file: ConfigFile =
            toml::from_str(source).map_err(|e| SchemaError::InvalidConfig(e.to_string()))?;
        file.schema.validate()?;
        Ok(file.schema)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.max_wrapper_depth == 0 {
            return Err(SchemaError::InvalidConfig(
                "schema.max_wrapper_depth must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert!(!config.validate_reachable);
        assert_eq!(config.max_wrapper_depth, 8);
        assert!(config.sdl_descriptions);
    }

    #[test]
    fn test_valid_config() {
        assert!(SchemaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_max_wrapper_depth() {
        let config = SchemaConfig {
            max_wrapper_depth: 0,
            ..SchemaConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SchemaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            [schema]
            validate_reachable = true
            max_wrapper_depth = 4
        "#;

        let config = SchemaConfig::from_toml(toml).unwrap();
        assert!(config.validate_reachable);
        assert_eq!(config.max_wrapper_depth, 4);
        assert!(config.sdl_descriptions);
    }

    #[test]
    fn test_from_toml_reads_schema_section() {
        let toml = r#"
            [server]
            port = 8080

            [schema]
            validate_reachable = true
            max_wrapper_depth = 0
        "#;

        // The section is read, so its invalid depth is reported.
        assert!(matches!(
            SchemaConfig::from_toml(toml),
            Err(SchemaError::InvalidConfig(msg)) if msg.contains("max_wrapper_depth")
        ));
    }

    #[test]
    fn test_from_toml_without_section_uses_defaults() {
        assert_eq!(SchemaConfig::from_toml("").unwrap(), SchemaConfig::default());
        assert_eq!(
            SchemaConfig::from_toml("[server]\nport = 8080").unwrap(),
            SchemaConfig::default()
        );
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(SchemaConfig::from_toml("[schema]\nmax_wrapper_depth = 0").is_err());
        assert!(SchemaConfig::from_toml("[schema]\nmax_wrapper_depth = \"deep\"").is_err());
        assert!(SchemaConfig::from_toml("[schema]\nmax_depth = 4").is_err());
    }
}
