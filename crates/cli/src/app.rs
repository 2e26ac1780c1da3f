//! Load-and-validate run for one command line invocation

use crate::cli::Cli;
use crate::settings::Settings;
use anyhow::{Context, Result};
use loader::{schema, ConfigLoader, LoadOptions, ObjectSchema};
use serde_json::Value;
use tracing::info;
use types::{IssueKind, Location, ValidationErrors, ROOT_FIELD};

/// Decide the loader options from flags, settings and the environment
pub fn load_options(cli: &Cli, settings: &Settings, env: LoadOptions) -> LoadOptions {
    let mut options = LoadOptions::new()
        .with_debug_logging(cli.debug || settings.debug || env.debug_logging);
    if let Some(format) = cli.format {
        options = options.with_format(format);
    }
    options
}

/// Read a schema description with the loader used for env files
pub fn load_schema(cli: &Cli) -> Result<ObjectSchema> {
    let description = schema::from_fn(|value: Value| {
        serde_json::from_value::<ObjectSchema>(value).map_err(|e| {
            ValidationErrors::single(ROOT_FIELD, IssueKind::InvalidValue, e.to_string())
        })
    });

    // Default options: the env file's forced format and failure logging do
    // not apply to the schema file, whose errors carry their own context.
    ConfigLoader::default()
        .load(&cli.schema, description)
        .with_context(|| format!("Failed to load schema from {}", cli.schema.display()))
}

/// Run one invocation and return the rendered output
pub fn run(cli: &Cli, settings: &Settings) -> Result<String> {
    let loader = ConfigLoader::new(load_options(cli, settings, LoadOptions::from_env()));
    let schema = load_schema(cli)?;

    let location = Location::segments(cli.location.iter().cloned());
    let path = location.resolve();
    let validated = loader
        .load(location, &schema)
        .with_context(|| format!("Failed to load env file {}", path.display()))?;

    info!("Validated {} field(s) from {}", validated.len(), path.display());

    let value = Value::Object(validated);
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .context("Failed to serialize validated env")?;

    Ok(rendered)
}
