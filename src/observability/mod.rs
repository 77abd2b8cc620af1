//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config (LogLevel, or RUST_LOG)
//!     → logging.rs (EnvFilter + fmt layer)
//!     → structured events from every subsystem
//! ```

pub mod logging;
