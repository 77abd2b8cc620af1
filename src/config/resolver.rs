//! Configuration resolution.
//!
//! # Responsibilities
//! - Load the configuration file, explicit or discovered
//! - Fall back to the complete built-in default set when loading fails
//! - Pull every field out of a loaded source by key
//!
//! # Design Decisions
//! - Fail open: resolution always produces a fully populated `Config`
//! - No partial merge: a failed load ignores anything read so far
//! - A caller-supplied log level always wins over the file's

use std::path::{Path, PathBuf};

use crate::config::loader::{ConfigError, ConfigSource};
use crate::config::schema::Config;
use crate::config::special_media::load_special_medias;
use crate::config::value::StreamSourceType;

/// Where a resolved configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from this file.
    File(PathBuf),
    /// Built-in defaults; no file could be loaded.
    Defaults,
}

/// A resolved configuration and its origin.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub config: Config,
    pub origin: ConfigOrigin,
}

/// Resolve the configuration.
///
/// `config_file = None` (or an empty path) searches the default candidates
/// in the working directory. An empty `log_level` counts as absent.
pub fn resolve(config_file: Option<&Path>, log_level: Option<&str>) -> Resolution {
    let loaded = match config_file.filter(|path| !path.as_os_str().is_empty()) {
        Some(path) => ConfigSource::from_file(path),
        None => ConfigSource::discover_default(),
    };

    match loaded {
        Ok(source) => Resolution {
            config: from_source(&source, log_level),
            origin: source
                .path()
                .map(|path| ConfigOrigin::File(path.to_path_buf()))
                .unwrap_or(ConfigOrigin::Defaults),
        },
        Err(e) => {
            match &e {
                ConfigError::NoCandidate { .. } => {
                    tracing::debug!(error = %e, "No configuration file, using built-in defaults")
                }
                _ => tracing::warn!(error = %e, "Failed to load configuration, using built-in defaults"),
            }
            Resolution {
                config: Config::defaults(log_level),
                origin: ConfigOrigin::Defaults,
            }
        }
    }
}

/// Build a `Config` from an already loaded source.
pub fn from_source(source: &ConfigSource, log_level: Option<&str>) -> Config {
    let log_level = match log_level.filter(|level| !level.is_empty()) {
        Some(level) => level.to_string(),
        None => source.get_string("LogLevel"),
    };

    Config {
        log_level,
        encipher: source.get_string("Encipher"),
        stream_source_type: stream_source_type(source),
        emby_url: source.get_string("Emby.url"),
        emby_port: source.get_int("Emby.port"),
        emby_api_key: source.get_string("Emby.apiKey"),
        frontend_symlink_base_path: source.get_string("Frontend.symlinkBasePath"),
        backend_url: source.get_string("Backend.url"),
        backend_storage_base_path: source.get_string("Backend.storageBasePath"),
        play_url_max_alive_time: source.get_int("PlayURLMaxAliveTime"),
        server_port: source.get_int("Server.port"),
        special_medias: load_special_medias(source),
    }
}

fn stream_source_type(source: &ConfigSource) -> StreamSourceType {
    let raw = source.get_string("StreamSourceType");
    if !raw.is_empty() && !StreamSourceType::is_recognized(&raw) {
        tracing::warn!(
            value = %raw,
            fallback = %StreamSourceType::Backend,
            "Unrecognized StreamSourceType"
        );
    }
    StreamSourceType::parse(Some(&raw))
}
