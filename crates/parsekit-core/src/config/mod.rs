//! Configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate.
//! Each sub-module represents a logical configuration section.

pub mod code_frame;
pub mod logging;

use std::path::Path;

use config::Map;
use serde::{Deserialize, Serialize};

use self::code_frame::CodeFrameConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root configuration.
///
/// Every section is optional; an empty document yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Diagnostic rendering settings.
    #[serde(default)]
    pub code_frame: CodeFrameConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PipelineConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default` with an environment-specific overlay and
    /// environment variables prefixed with `PARSEKIT`, e.g.
    /// `PARSEKIT__CODE_FRAME__LINES_ABOVE=4`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env, None)
    }

    /// Load configuration from `<base_dir>/default`, `<base_dir>/<env>`, and
    /// `PARSEKIT__` variables, later sources winning.
    ///
    /// `vars` replaces the process environment when given.
    pub fn load_from(
        base_dir: &Path,
        env: &str,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, AppError> {
        tracing::info!(
            base_dir = %base_dir.display(),
            env = %env,
            "Loading configuration"
        );

        let default_path = base_dir.join("default");
        let env_path = base_dir.join(env);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default_path.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&env_path.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("PARSEKIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
