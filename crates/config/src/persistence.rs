//! Reading and writing the TOML file
//!
//! A save writes a sibling temporary file and renames it over the target.
//! The previous file survives as `config.toml.backup`.

use crate::error::FileAction;
use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One config file on disk
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("toml.backup")
    }

    /// Missing file gives the defaults. Out-of-range values load with a warning.
    pub fn read(&self) -> ConfigResult<Config> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", self.path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::file(FileAction::Read, &self.path, e)),
        };

        if text.trim().is_empty() {
            let empty = io::Error::new(io::ErrorKind::InvalidData, "file has no content");
            return Err(ConfigError::file(FileAction::Read, &self.path, empty));
        }

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;

        if config.version != CONFIG_VERSION {
            log::warn!(
                "{} has format version {}, expected {}",
                self.path.display(),
                config.version,
                CONFIG_VERSION
            );
        }
        if let Err(errors) = config.validate() {
            for error in &errors {
                log::warn!("{}: {}", self.path.display(), error);
            }
        }

        Ok(config)
    }

    /// Refuses invalid values, then replaces the file atomically
    pub fn write(&self, config: &Config) -> ConfigResult<()> {
        config.validate().map_err(ConfigError::Invalid)?;
        let text = toml::to_string_pretty(config)?;

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .map_err(|e| ConfigError::file(FileAction::CreateDirectory, dir, e))?;

        if self.path.is_file() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup)
                .map_err(|e| ConfigError::file(FileAction::Backup, &self.path, e))?;
            log::debug!("Previous config kept at {}", backup.display());
        }

        let mut staged =
            NamedTempFile::new_in(dir).map_err(|e| ConfigError::file(FileAction::Write, dir, e))?;
        staged
            .write_all(text.as_bytes())
            .and_then(|()| staged.flush())
            .map_err(|e| ConfigError::file(FileAction::Write, staged.path(), e))?;
        staged
            .persist(&self.path)
            .map_err(|e| ConfigError::file(FileAction::Write, &self.path, e.error))?;

        log::info!("Config written to {}", self.path.display());
        Ok(())
    }

    pub fn write_default(&self) -> ConfigResult<()> {
        self.write(&Config::default())
    }
}
