//! Configuration core of the PiliPili streaming frontend.
//!
//! Resolves the frontend's runtime settings (Emby and backend addresses,
//! stream source kind, special media overrides) from a YAML file, falling
//! back to built-in defaults whenever the file or a section is unusable.

pub mod config;
pub mod observability;
pub mod util;

pub use config::{Config, ConfigStore, SpecialMediaConfig, StreamSourceType};
pub use util::build_full_url;
