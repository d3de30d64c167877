//! Configuration loading via `ortho-config`.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::manifest::{DEFAULT_DELIMITER, ManifestDefaults};
use crate::script::AssembleOptions;
use crate::statement::validate_delimiter;
use crate::target::TargetFamily;

/// Rendering defaults derived from configuration files and environment
/// variables.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "BOOTSCRIPT",
    discovery(
        app_name = "bootscript",
        env_var = "BOOTSCRIPT_CONFIG_PATH",
        config_file_name = "bootscript.toml",
        dotfile_name = ".bootscript.toml",
        project_file_name = "bootscript.toml"
    )
)]
pub struct RenderConfig {
    /// Target family used when neither the CLI nor the manifest picks one.
    #[ortho_config(default = "posix".to_owned())]
    pub target: String,
    /// Heredoc delimiter for file statements that do not set one.
    #[ortho_config(default = DEFAULT_DELIMITER.to_owned())]
    pub default_delimiter: String,
    /// Whether rendered scripts carry the prologue, error guards, and
    /// epilogue.
    #[ortho_config(default = true)]
    pub framed: bool,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }

    fn hint(&self) -> String {
        format!(
            "set {} or add {} to bootscript.toml",
            self.env_var, self.toml_key
        )
    }
}

const TARGET_FIELD: FieldMetadata =
    FieldMetadata::new("target family", "BOOTSCRIPT_TARGET", "target");
const DELIMITER_FIELD: FieldMetadata = FieldMetadata::new(
    "default heredoc delimiter",
    "BOOTSCRIPT_DEFAULT_DELIMITER",
    "default_delimiter",
);

impl RenderConfig {
    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("bootscript")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation. Error messages name the environment
    /// variable and TOML key that supply each field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when the target or delimiter is
    /// not usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target_family()?;
        validate_delimiter(&self.default_delimiter).map_err(|err| {
            ConfigError::InvalidField(format!(
                "invalid {}: {err}; {}",
                DELIMITER_FIELD.description,
                DELIMITER_FIELD.hint()
            ))
        })
    }

    /// Parses the configured target family.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] for unknown family names.
    pub fn target_family(&self) -> Result<TargetFamily, ConfigError> {
        self.target.parse::<TargetFamily>().map_err(|err| {
            ConfigError::InvalidField(format!(
                "invalid {}: {err}; {}",
                TARGET_FIELD.description,
                TARGET_FIELD.hint()
            ))
        })
    }

    /// Defaults applied while loading manifests.
    #[must_use]
    pub fn manifest_defaults(&self) -> ManifestDefaults {
        ManifestDefaults {
            delimiter: self.default_delimiter.clone(),
        }
    }

    /// Assembly options derived from configuration.
    #[must_use]
    pub const fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            framed: self.framed,
        }
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a configuration field holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
