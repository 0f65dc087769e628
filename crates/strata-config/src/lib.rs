//! Host configuration for the strata world generator.
//!
//! Wraps the generator's [`WorldConfig`](strata_worldgen::WorldConfig) with
//! seed, preview and debug settings, persists it to disk as a RON file, and
//! applies command-line overrides via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AppConfig, CONFIG_FILE_NAME, DebugConfig, GenerationConfig, PreviewConfig};
pub use error::ConfigFileError;
