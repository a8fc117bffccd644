//! Adapters for configuration, files, logging and SMTP

pub mod config;
pub mod email;
pub mod logging;
pub mod sources;
