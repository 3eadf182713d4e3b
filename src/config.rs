use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Settings of the `cqlmap` tool
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Mapping definition YAML file
    #[validate(custom(function = "validate_definition_path"))]
    pub definition_path: PathBuf,

    /// Eagerly resolve every mapped property before producing output
    pub validate_mappings: bool,

    /// Default log filter, overridden by RUST_LOG
    #[validate(length(min = 1, message = "Log filter cannot be empty"))]
    pub log_filter: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            definition_path: PathBuf::from("cqlmap.yaml"),
            validate_mappings: true,
            log_filter: "info".to_string(),
        }
    }
}

fn validate_definition_path(path: &PathBuf) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::new("empty_definition_path"));
    }
    Ok(())
}

impl ToolConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            definition_path: PathBuf::from(
                env::var("CQLMAP_DEFINITION").unwrap_or_else(|_| "cqlmap.yaml".to_string()),
            ),
            validate_mappings: parse_env_var("CQLMAP_VALIDATE", "true")?,
            log_filter: env::var("CQLMAP_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation
    ///
    /// Arguments left unset on the command line fall back to the environment.
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let defaults = Self::from_env()?;
        let config = Self {
            definition_path: cli.definition_path.unwrap_or(defaults.definition_path),
            validate_mappings: if cli.skip_validation {
                false
            } else {
                defaults.validate_mappings
            },
            log_filter: defaults.log_filter,
        };

        config.validate()?;
        Ok(config)
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub definition_path: Option<PathBuf>,
    pub skip_validation: bool,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
