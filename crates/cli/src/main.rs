//! envload - load and validate an env file from the command line

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cli;
mod settings;

use cli::Cli;
use settings::Settings;

fn main() -> Result<()> {
    // Load .env file if it exists
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            eprintln!("Could not load .env file: {}", e);
        }
    }

    let cli = Cli::parse();
    let settings = Settings::load()?
        .with_overrides(cli.log_level.as_deref(), cli.log_format.as_deref())?;

    init_logging(&settings)?;
    debug!("envload v{} starting", env!("CARGO_PKG_VERSION"));

    let output = app::run(&cli, &settings)?;
    println!("{}", output);
    Ok(())
}

/// Initialize logging on stderr; `RUST_LOG` takes precedence over settings
fn init_logging(settings: &Settings) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match settings.log_format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize logging")?;
        }
    }

    if settings.log_level == "trace" {
        warn!("Trace logging enabled");
    }

    Ok(())
}
