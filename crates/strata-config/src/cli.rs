//! Command-line argument parsing for the `strata` tool.

use std::path::PathBuf;

use clap::Parser;

use crate::AppConfig;

/// Generate a 2D side-view world from a seed.
///
/// CLI values override settings loaded from `strata.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Seeded 2D world generator")]
pub struct CliArgs {
    /// World seed. Omit to use the configured seed, or a random one.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Number of columns.
    #[arg(long)]
    pub world_size: Option<u32>,

    /// Columns per chunk.
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// Keep every cell solid.
    #[arg(long)]
    pub no_caves: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write a PNG preview to this path.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Skip the ASCII preview.
    #[arg(long)]
    pub no_ascii: bool,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl AppConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generation.seed = Some(seed);
        }
        if let Some(size) = args.world_size {
            self.world.world_size = size;
        }
        if let Some(size) = args.chunk_size {
            self.world.chunk_size = size;
        }
        if args.no_caves {
            self.world.generate_caves = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref path) = args.png {
            self.preview.png_path = Some(path.clone());
        }
        if args.no_ascii {
            self.preview.ascii = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            seed: Some(-7),
            world_size: Some(300),
            no_caves: true,
            png: Some(PathBuf::from("world.png")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.generation.seed, Some(-7));
        assert_eq!(config.world.world_size, 300);
        assert!(!config.world.generate_caves);
        assert_eq!(config.preview.png_path, Some(PathBuf::from("world.png")));
        // Non-overridden fields retain defaults
        assert_eq!(config.world.chunk_size, 16);
        assert!(config.preview.ascii);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = AppConfig::default();
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "strata",
            "--seed",
            "-12",
            "--chunk-size",
            "8",
            "--no-ascii",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(-12));
        assert_eq!(args.chunk_size, Some(8));
        assert!(args.no_ascii);
        assert!(!args.no_caves);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
