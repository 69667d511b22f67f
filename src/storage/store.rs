use std::{fs, path::PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use super::definitions::Definitions;
use crate::core::errors::ConfigError;

const FILE_NAME: &str = "definitions.json";

/// The default home of a definitions file.
#[derive(Debug, Clone)]
pub struct DefinitionsStore {
    dir: PathBuf,
}

impl DefinitionsStore {
    /// `~/.config/goosemgr` on Linux, `%APPDATA%\goosemgr` on Windows, etc.
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("", "", "goosemgr").ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::at(proj.config_dir()))
    }

    /// A store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    pub fn load<D: DeserializeOwned>(&self) -> Result<Definitions<D>, ConfigError> {
        Definitions::from_file(self.path())
    }

    /// Create or overwrite the definitions file.
    pub fn save<D: Serialize>(&self, definitions: &Definitions<D>) -> Result<(), ConfigError> {
        let path = self.path();
        let io_err = |source| ConfigError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let file = fs::File::create(&path).map_err(io_err)?;
        serde_json::to_writer_pretty(file, definitions).map_err(|source| ConfigError::Encode {
            path: path.clone(),
            source,
        })
    }
}
