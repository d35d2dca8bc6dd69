//! Path management
//!
//! Resolves where the settings file lives.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "deezer-discovery";
const SETTINGS_FILE: &str = "settings.json";

/// Filesystem locations used by the application
#[derive(Debug, Clone)]
pub struct Paths {
    config_dir: PathBuf,
}

impl Paths {
    /// Resolve the config directory, creating it if needed
    pub fn init(config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => directories::ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".").join(APP_NAME)),
        };

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("conf");
        let paths = Paths::init(Some(dir.clone())).unwrap();
        assert!(dir.is_dir());
        assert_eq!(paths.settings_path(), dir.join("settings.json"));
    }
}
