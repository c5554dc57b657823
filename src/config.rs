//! Application settings, stored as JSON in the platform config directory
//! (e.g. `~/.config/project-planner/config.json`).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// File name looked up when no task file is given.
    pub tasks_file: String,

    /// File name looked up when no resource file is given.
    pub resources_file: String,

    /// Directories searched, in order, for the default input files.
    pub search_dirs: Vec<PathBuf>,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Load the default input files on startup when they exist.
    pub auto_load: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tasks_file: "tasks.txt".to_string(),
            resources_file: "resources.txt".to_string(),
            search_dirs: vec![PathBuf::from("."), PathBuf::from(".."), PathBuf::from("GUI")],
            log_filter: "project_planner=info,planner=info".to_string(),
            auto_load: true,
        }
    }
}

impl AppConfig {
    /// Platform config directory for this application.
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "project-planner").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load from the platform config directory, falling back to defaults
    /// when there is no directory or no file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_dir() {
            Some(dir) => Self::load_from(&dir.join(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// First existing `dir/name` across the search directories.
    pub fn find_input(&self, name: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    pub fn default_tasks_path(&self) -> Option<PathBuf> {
        self.find_input(&self.tasks_file)
    }

    pub fn default_resources_path(&self) -> Option<PathBuf> {
        self.find_input(&self.resources_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "tasks_file": "plan.txt", "auto_load": false }"#).unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.tasks_file, "plan.txt");
        assert!(!cfg.auto_load);
        assert_eq!(cfg.resources_file, "resources.txt");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn find_input_searches_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(second.path().join("tasks.txt"), "").unwrap();

        let cfg = AppConfig {
            search_dirs: vec![first.path().to_path_buf(), second.path().to_path_buf()],
            ..Default::default()
        };
        assert_eq!(
            cfg.default_tasks_path(),
            Some(second.path().join("tasks.txt"))
        );
        assert_eq!(cfg.default_resources_path(), None);

        std::fs::write(first.path().join("tasks.txt"), "").unwrap();
        assert_eq!(cfg.default_tasks_path(), Some(first.path().join("tasks.txt")));
    }
}
