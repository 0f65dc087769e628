//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_worldgen::WorldConfig;

use crate::error::ConfigFileError;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "strata.ron";

/// Top-level configuration of the `strata` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// World generation parameters.
    pub world: WorldConfig,
    /// Seed selection.
    pub generation: GenerationConfig,
    /// Preview output.
    pub preview: PreviewConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Seed selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Fixed world seed. `None` draws a fresh seed on every run.
    pub seed: Option<i64>,
}

/// Preview output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Print an ASCII side view to stdout.
    pub ascii: bool,
    /// Write a PNG preview to this path.
    pub png_path: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            ascii: true,
            png_path: None,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Platform config directory for strata, e.g. `~/.config/strata`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("strata"))
    }

    /// Load config from the given directory, or create a default config file.
    ///
    /// A loaded file is validated; a freshly created one uses the defaults.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigFileError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `strata.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigFileError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigFileError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigFileError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigFileError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigFileError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            new_config.validate()?;
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Check the world settings.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        Ok(self.world.validate()?)
    }

    fn read(path: &Path) -> Result<Self, ConfigFileError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigFileError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigFileError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_worldgen::ConfigError;

    #[test]
    fn test_default_config_serializes() {
        let config = AppConfig::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("world_size: 100"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = AppConfig::default();
        config.generation.seed = Some(-42);
        config.preview.png_path = Some(PathBuf::from("out/world.png"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: AppConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(world: (world_size: 64), debug: ())";
        let config: AppConfig = ron::from_str(ron_str).unwrap();
        assert_eq!(config.world.world_size, 64);
        assert_eq!(config.world.chunk_size, 16);
        assert_eq!(config.preview, PreviewConfig::default());
        assert_eq!(config.generation.seed, None);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<AppConfig, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.world.world_size = 256;
        config.world.generate_caves = false;
        config.generation.seed = Some(1234);

        config.save(dir.path()).unwrap();
        let loaded = AppConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_rejects_invalid_world() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "(world: (chunk_size: 0))",
        )
        .unwrap();

        let err = AppConfig::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::Invalid(ConfigError::NonPositive {
                field: "chunk_size"
            })
        ));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.world.dirt_layer_height = 8;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.world.dirt_layer_height), Some(8));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        assert!(matches!(
            AppConfig::load_or_create(dir.path()),
            Err(ConfigFileError::ParseError(_))
        ));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// generated world\n(\n  // nothing overridden\n)";
        let config: AppConfig = ron::from_str(ron_str).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
