use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::store::LogNaming;

/// Names an explicit config file, overriding the lookup paths.
pub const CONFIG_ENV: &str = "MEGAKEEP_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the probe writes snapshot logs
    pub log_dir: PathBuf,
    /// Where change reports are written
    pub report_dir: PathBuf,
    pub naming: LogNaming,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_dir: PathBuf::from("logs/raw"),
            report_dir: PathBuf::from("logs/reports"),
            naming: LogNaming::default(),
        }
    }
}

impl Config {
    /// Load from `$MEGAKEEP_CONFIG`, `./megakeep.toml` or the platform config
    /// dir, in that order. Falls back to defaults when no file exists.
    pub fn load() -> Result<Self, Error> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Config::from_file(Path::new(&path));
        }

        for path in config_paths() {
            if path.exists() {
                return Config::from_file(&path);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(Config::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = toml::from_str(&content).map_err(|e: toml::de::Error| Error::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("megakeep.toml"));
    }

    if let Some(dirs) = directories::ProjectDirs::from("", "", "megakeep") {
        paths.push(dirs.config_dir().join("config.toml"));
    }

    paths
}
