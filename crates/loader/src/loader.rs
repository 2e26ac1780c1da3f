//! Env file loader implementation

use crate::format::ContentFormat;
use crate::options::LoadOptions;
use crate::schema::Schema;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use types::{LoadError, Location, Result};

/// Message logged ahead of the error when failure logging is enabled
pub const LOAD_ERROR_MESSAGE: &str = "Error loading env file:";

/// Loads an env file and validates it against a schema
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    options: LoadOptions,
}

impl ConfigLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Resolve `location`, read it, decode it and validate it with `schema`.
    ///
    /// Any failure is returned as raised. With `debug_logging` set, one
    /// error event is logged first.
    pub fn load<L, S>(&self, location: L, schema: S) -> Result<S::Output>
    where
        L: Into<Location>,
        S: Schema,
    {
        let location = location.into();
        self.try_load(&location, &schema).map_err(|err| {
            if self.options.debug_logging {
                error!(error = %err, "{}", LOAD_ERROR_MESSAGE);
            }
            err
        })
    }

    fn try_load<S: Schema>(&self, location: &Location, schema: &S) -> Result<S::Output> {
        let path = location.resolve();
        let raw = read_raw(&path)?;

        let format = self
            .options
            .format
            .unwrap_or_else(|| ContentFormat::detect(&path));
        let value = format.decode(&raw).map_err(|source| LoadError::Parse {
            path: path.clone(),
            format: format.name(),
            source,
        })?;

        let validated = schema.parse(value)?;
        debug!(path = %path.display(), format = %format, "Loaded env file");
        Ok(validated)
    }
}

/// Read the whole file, blocking until done
pub fn read_raw(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| LoadError::Read {
        path: PathBuf::from(path),
        source,
    })
}

/// Load with default options
pub fn load<L, S>(location: L, schema: S) -> Result<S::Output>
where
    L: Into<Location>,
    S: Schema,
{
    ConfigLoader::default().load(location, schema)
}
