//! Logging setup.
//!
//! The crate logs through the `log` facade; this module only installs
//! `env_logger` as the backend for binaries that want it.

mod init;

pub use init::{LoggingConfig, init_logging};
