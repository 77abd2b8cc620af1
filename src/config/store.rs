//! Process-wide configuration store.
//!
//! # Design Decisions
//! - The resolved `Config` is held as an `Arc` snapshot in an `ArcSwap`
//! - Readers never lock; `initialize` swaps the whole value at once
//! - `ConfigStore` can be constructed and injected; the free functions
//!   below operate on one lazily created global instance

use std::path::Path;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::config::loader::ConfigError;
use crate::config::resolver::resolve;
use crate::config::schema::{Config, SpecialMediaConfig};
use crate::config::value::StreamSourceType;

/// Holder of the current resolved configuration.
#[derive(Debug)]
pub struct ConfigStore {
    current: ArcSwap<Config>,
}

impl ConfigStore {
    pub fn new(config: Config) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Resolve the configuration and replace the stored value.
    ///
    /// Never fails today: a file that cannot be loaded yields the built-in
    /// defaults. The `Result` leaves room for stricter loading later.
    pub fn initialize(
        &self,
        config_file: Option<&Path>,
        log_level: Option<&str>,
    ) -> Result<(), ConfigError> {
        self.install(resolve(config_file, log_level).config);
        Ok(())
    }

    /// Replace the stored value with an already resolved one.
    pub fn install(&self, config: Config) {
        self.current.store(Arc::new(config));
    }

    /// Shared handle to the current value.
    pub fn snapshot(&self) -> Arc<Config> {
        self.current.load_full()
    }

    /// Copy of the current value.
    pub fn get_config(&self) -> Config {
        Config::clone(&self.current.load())
    }

    /// The configured stream source kind.
    ///
    /// `StreamSourceType` only has the two valid variants and every text
    /// path into it defaults to `Backend`, so the stored value is always
    /// usable as is.
    pub fn stream_source_type(&self) -> StreamSourceType {
        self.current.load().stream_source_type
    }

    pub fn full_emby_url(&self) -> String {
        self.current.load().full_emby_url()
    }

    pub fn full_backend_url(&self) -> String {
        self.current.load().full_backend_url()
    }

    pub fn find_special_media(&self, key: &str) -> Option<SpecialMediaConfig> {
        self.current.load().find_special_media(key).cloned()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

static GLOBAL: LazyLock<ConfigStore> = LazyLock::new(ConfigStore::default);

/// The process-wide store. Holds the built-in defaults until initialized.
pub fn global() -> &'static ConfigStore {
    &GLOBAL
}

/// Resolve the configuration into the process-wide store.
pub fn initialize(config_file: Option<&Path>, log_level: Option<&str>) -> Result<(), ConfigError> {
    global().initialize(config_file, log_level)
}

/// Install an already resolved configuration into the process-wide store.
pub fn install(config: Config) {
    global().install(config);
}

pub fn get_config() -> Config {
    global().get_config()
}

pub fn get_stream_source_type() -> StreamSourceType {
    global().stream_source_type()
}

pub fn get_full_emby_url() -> String {
    global().full_emby_url()
}

pub fn get_full_backend_url() -> String {
    global().full_backend_url()
}
