//! `strata`: generate a seeded 2D world and preview it.
//!
//! Loads `strata.ron` from the config directory (creating it on first run),
//! applies command-line overrides, generates one world and prints an ASCII
//! side view. `--png` also writes an image.
//!
//! Run with: `cargo run -p strata-cli -- --seed 42`

mod preview;

use anyhow::Context;
use clap::Parser;
use strata_config::{AppConfig, CONFIG_FILE_NAME, CliArgs};
use strata_worldgen::{Seed, WorldGenerator, debug_viz};
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => AppConfig::default_dir()
            .context("no platform config directory; pass --config <dir>")?,
    };
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let existed = config_path.exists();
    let mut config = AppConfig::load_or_create(&config_dir)
        .with_context(|| format!("failed to load config from {}", config_dir.display()))?;
    config.apply_cli_overrides(&args);

    strata_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );
    info!("{} {}", config_origin(existed), config_path.display());

    let seed = config.generation.seed.map_or_else(Seed::random, Seed);
    info!(
        "World: seed={} size={} chunk_size={} caves={}",
        seed, config.world.world_size, config.world.chunk_size, config.world.generate_caves
    );

    let generator = WorldGenerator::new(config.world.clone()).context("invalid world config")?;
    let world = generator.generate(seed);

    for chunk in world.chunks().iter() {
        let columns = chunk.columns();
        debug!(
            "chunk {}: columns {}..{}, {} cells",
            chunk.index(),
            columns.start,
            columns.end,
            chunk.len()
        );
    }
    info!(
        "Generated {} cells in {} chunks, {} decorations, hash {:016x}",
        world.cell_count(),
        world.chunks().len(),
        world.decorations().len(),
        world.content_hash()
    );

    if config.preview.ascii {
        print!("{}", debug_viz::render_ascii(&world));
    }

    if let Some(path) = &config.preview.png_path {
        let image = preview::upscale(&debug_viz::render_world(&world), preview::PNG_SCALE);
        preview::write_png(&image, path)?;
        info!("Wrote preview to {}", path.display());
    }

    Ok(())
}

/// Startup log prefix for the config file, depending on whether it was already on disk.
fn config_origin(existed: bool) -> &'static str {
    if existed {
        "Loaded config from"
    } else {
        "Created default config at"
    }
}
