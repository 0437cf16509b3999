//! Shared error model and configuration for docbot.
//!
//! This crate is the foundation depended on by all other docbot crates.
//! It provides:
//! - [`DocbotError`]: the unified error type
//! - Configuration ([`AppConfig`], [`LookupConfig`], config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, LookupConfig, LookupSection, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{DocbotError, Result};
