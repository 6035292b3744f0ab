//! Configuration file handling
//!
//! Looked up in order: an explicit path, `partforge.yaml` in the working
//! directory, then `config.yaml` in the user config directory. A missing
//! file means defaults.

use directories::ProjectDirs;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::search::Thresholds;
use crate::core::stats::Stat;
use crate::yaml::{parse_yaml_optional, YamlError};

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "partforge.yaml";

/// Config file name inside the user config directory
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Errors from loading configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("Unknown stat in thresholds of {}: {stat}", path.display())]
    #[diagnostic(help("Use weaponDamage, magSize, reloadTime, fireRate, or accuracy"))]
    UnknownStat { path: PathBuf, stat: String },
}

/// Raw config file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Catalog files, relative to the config file
    pub catalog: Vec<PathBuf>,

    /// Directory of catalog files, relative to the config file
    pub catalog_dir: Option<PathBuf>,

    /// Default thresholds by stat name
    pub thresholds: BTreeMap<String, f64>,

    /// Directory the config was loaded from
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist; the fallback locations are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        for candidate in Self::search_paths() {
            if let Some(config) = Self::read(&candidate)? {
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Parse one config file and validate its threshold names
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        Self::read(path)?.ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))
    }

    fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let Some(mut config) = parse_yaml_optional::<Config>(path)? else {
            return Ok(None);
        };
        config.base_dir = path.parent().map(Path::to_path_buf);

        if let Some(stat) = config
            .thresholds
            .keys()
            .find(|name| name.parse::<Stat>().is_err())
        {
            return Err(ConfigError::UnknownStat {
                path: path.to_path_buf(),
                stat: stat.clone(),
            });
        }

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Some(config))
    }

    /// Fallback config locations, in lookup order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dirs) = ProjectDirs::from("", "", "partforge") {
            paths.push(dirs.config_dir().join(USER_CONFIG_FILE));
        }
        paths
    }

    /// Threshold defaults as typed limits
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
            .iter()
            .filter_map(|(name, value)| name.parse::<Stat>().ok().map(|stat| (stat, *value)))
            .fold(Thresholds::new(), |t, (stat, value)| t.with(stat, value))
    }

    /// Catalog files resolved against the config location
    pub fn catalog_files(&self) -> Vec<PathBuf> {
        self.catalog.iter().map(|p| self.resolve(p)).collect()
    }

    /// Catalog directory resolved against the config location
    pub fn catalog_directory(&self) -> Option<PathBuf> {
        self.catalog_dir.as_ref().map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
