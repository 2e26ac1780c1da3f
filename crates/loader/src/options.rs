//! Per-loader options

use crate::format::ContentFormat;
use std::ffi::OsStr;

/// Environment variable that turns on failure logging in [`LoadOptions::from_env`]
pub const DEBUG_ENV_VAR: &str = "DEBUG";

/// Options controlling a [`ConfigLoader`](crate::ConfigLoader)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Log every load failure before returning it
    pub debug_logging: bool,
    /// Force a content format instead of detecting it from the extension
    pub format: Option<ContentFormat>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options derived from the process environment: `DEBUG` set to any
    /// non-empty value enables failure logging.
    pub fn from_env() -> Self {
        Self {
            debug_logging: debug_flag(std::env::var_os(DEBUG_ENV_VAR).as_deref()),
            format: None,
        }
    }

    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    pub fn with_format(mut self, format: ContentFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Interpret the raw value of the debug variable
pub fn debug_flag(value: Option<&OsStr>) -> bool {
    value.map_or(false, |v| !v.is_empty())
}
