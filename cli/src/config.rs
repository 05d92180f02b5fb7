use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

use healthdesk_core::bmi::CategoryScheme;
use healthdesk_core::water::WaterGranularity;

pub const WATER_LOG_FILE: &str = "water_log.txt";
pub const WEIGHT_LOG_FILE: &str = "weight_log.txt";

/// Values that may override the platform defaults.
#[derive(Debug, Default)]
pub struct ConfigOptions {
    pub data_dir: Option<PathBuf>,
    pub recipes_dir: Option<PathBuf>,
    pub water_granularity: WaterGranularity,
    pub bmi_scheme: CategoryScheme,
}

#[derive(Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub water_log_path: PathBuf,
    pub weight_log_path: PathBuf,
    pub recipes_dir: PathBuf,
    pub water_granularity: WaterGranularity,
    pub bmi_scheme: CategoryScheme,
}

impl Config {
    pub fn load(options: ConfigOptions) -> Result<Self> {
        let data_dir = match options.data_dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "healthdesk")
                .context("Could not determine home directory")?
                .data_dir()
                .to_path_buf(),
        };

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let recipes_dir = options
            .recipes_dir
            .unwrap_or_else(|| data_dir.join("recipes"));

        Ok(Config {
            water_log_path: data_dir.join(WATER_LOG_FILE),
            weight_log_path: data_dir.join(WEIGHT_LOG_FILE),
            recipes_dir,
            data_dir,
            water_granularity: options.water_granularity,
            bmi_scheme: options.bmi_scheme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_with_data_dir_override() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("nested").join("data");

        let config = Config::load(ConfigOptions {
            data_dir: Some(data_dir.clone()),
            ..ConfigOptions::default()
        })
        .unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(config.water_log_path, data_dir.join("water_log.txt"));
        assert_eq!(config.weight_log_path, data_dir.join("weight_log.txt"));
        assert_eq!(config.recipes_dir, data_dir.join("recipes"));
        assert_eq!(config.water_granularity, WaterGranularity::Timestamp);
        assert_eq!(config.bmi_scheme, CategoryScheme::Detailed);
    }

    #[test]
    fn test_load_with_recipes_dir_and_modes() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(ConfigOptions {
            data_dir: Some(tmp.path().to_path_buf()),
            recipes_dir: Some(PathBuf::from("/srv/recipes")),
            water_granularity: WaterGranularity::Date,
            bmi_scheme: CategoryScheme::Simple,
        })
        .unwrap();

        assert_eq!(config.recipes_dir, PathBuf::from("/srv/recipes"));
        assert_eq!(config.water_granularity, WaterGranularity::Date);
        assert_eq!(config.bmi_scheme, CategoryScheme::Simple);
    }
}
