//! Application configuration.
//!
//! A small TOML file in the platform config directory can override where the
//! SQLite database lives; everything else defaults sensibly. A missing file
//! is normal; a malformed one is logged and ignored.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the SQLite database location
    pub database_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load `config.toml` from the platform config directory.
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(raw) => Self::parse(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Where the SQLite database lives: the configured override, or
    /// `study-calendar.db` in the platform data directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join("study-calendar.db"))
            .unwrap_or_else(|| PathBuf::from("study-calendar.db"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "study-calendar")
}

fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}
