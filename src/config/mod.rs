//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML/TOML), explicit or discovered
//!     → loader.rs (parse, normalize keys)
//!     → resolver.rs (read every field; defaults if the load failed)
//!         → value.rs (StreamSourceType)
//!         → special_media.rs (SpecialMedias)
//!     → Config (resolved, immutable)
//!     → store.rs (Arc snapshot, read by all subsystems)
//! ```
//!
//! # Design Decisions
//! - Fail open: missing files, malformed sections and unknown values all
//!   reduce to built-in defaults without surfacing an error
//! - Config is immutable once resolved; a new `initialize` replaces it whole
//! - A caller-supplied log level always wins over the file's

pub mod loader;
pub mod resolver;
pub mod schema;
pub mod special_media;
pub mod store;
pub mod value;

pub use loader::{ConfigError, ConfigSource};
pub use resolver::{resolve, ConfigOrigin, Resolution};
pub use schema::{Config, SpecialMediaConfig};
pub use special_media::load_special_medias;
pub use store::{
    get_config, get_full_backend_url, get_full_emby_url, get_stream_source_type, initialize,
    install, ConfigStore,
};
pub use value::StreamSourceType;
