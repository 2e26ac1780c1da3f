//! Settings for the envload binary itself

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Prefix for environment variables read into [`Settings`]
pub const ENV_PREFIX: &str = "ENVLOAD_";

const VALID_LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// Tool settings, layered from defaults and `ENVLOAD_*` variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Log level filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Log load failures
    #[serde(default)]
    pub debug: bool,
}

impl Settings {
    /// Load settings from defaults and the process environment
    pub fn load() -> Result<Self> {
        Self::from_figment(Figment::new().merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Extract settings from `overrides` layered on top of the defaults
    pub fn from_figment(overrides: Figment) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(overrides)
            .extract()
            .context("Failed to parse envload settings")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, log_level: Option<&str>, log_format: Option<&str>) -> Result<Self> {
        if let Some(level) = log_level {
            self.log_level = level.to_string();
        }
        if let Some(format) = log_format {
            self.log_format = format.to_string();
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!(
                "Invalid log level: {}. Valid levels: {:?}",
                self.log_level,
                VALID_LOG_LEVELS
            );
        }
        if !VALID_LOG_FORMATS.contains(&self.log_format.as_str()) {
            bail!(
                "Invalid log format: {}. Valid formats: {:?}",
                self.log_format,
                VALID_LOG_FORMATS
            );
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            debug: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
