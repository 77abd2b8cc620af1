//! PiliPili frontend configuration check.
//!
//! Resolves the configuration the frontend would start with, initializes
//! logging at the resolved level and reports what was loaded.

use std::path::PathBuf;

use clap::Parser;

use pilipili_frontend::config::{self, ConfigOrigin};
use pilipili_frontend::observability::logging;

/// Resolve and report the PiliPili frontend configuration
#[derive(Parser, Debug)]
#[command(name = "pilipili-frontend")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (default: ./config.yaml or ./config.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overrides LogLevel from the configuration file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print the resolved configuration as JSON, secrets masked
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let resolution = config::resolve(args.config.as_deref(), args.log_level.as_deref());
    logging::init(&resolution.config.log_level)?;

    match &resolution.origin {
        ConfigOrigin::File(path) => {
            tracing::info!(path = %path.display(), "Configuration loaded")
        }
        ConfigOrigin::Defaults => match &args.config {
            Some(path) => tracing::warn!(
                path = %path.display(),
                "Configuration file could not be loaded, using built-in defaults"
            ),
            None => tracing::info!("No configuration file found, using built-in defaults"),
        },
    }

    let resolved = &resolution.config;
    tracing::info!(
        log_level = %resolved.log_level,
        stream_source_type = %resolved.stream_source_type,
        emby_url = %resolved.full_emby_url(),
        backend_url = %resolved.full_backend_url(),
        server_port = resolved.server_port,
        play_url_max_alive_time = resolved.play_url_max_alive_time,
        special_medias = resolved.special_medias.len(),
        "Configuration resolved"
    );

    for media in resolved.special_medias.iter().filter(|m| !m.is_valid()) {
        tracing::warn!(key = %media.key, name = %media.name, "Incomplete special media entry");
    }

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&resolved.redacted())?);
    }

    config::install(resolution.config);
    Ok(())
}
