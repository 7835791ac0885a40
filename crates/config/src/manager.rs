//! Locating, loading and overriding the configuration

use crate::persistence::ConfigFile;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variables consulted by [`ConfigManager::load_with_env_overrides`]
pub const ENV_DATABASE_PATH: &str = "CATALOG_APP_DATABASE_PATH";
pub const ENV_LOG_LEVEL: &str = "CATALOG_APP_LOG_LEVEL";
pub const ENV_MIN_YEAR: &str = "CATALOG_CATALOG_MIN_YEAR";
pub const ENV_MAX_TEXT_LENGTH: &str = "CATALOG_CATALOG_MAX_TEXT_LENGTH";

const FILE_NAME: &str = "config.toml";

/// Owns `config.toml` inside one config directory
///
/// Relative paths in the file, such as the database path, resolve against
/// that directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    dir: PathBuf,
    file: ConfigFile,
}

impl ConfigManager {
    /// Uses the platform directory, e.g. `~/.config/media-catalog/` on Linux
    pub fn new() -> ConfigResult<Self> {
        let dirs = ProjectDirs::from("", "", "media-catalog").ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::in_directory(dirs.config_dir()))
    }

    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file = ConfigFile::new(dir.join(FILE_NAME));
        Self { dir, file }
    }

    pub fn config_dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> &Path {
        self.file.path()
    }

    pub fn database_path(&self, config: &Config) -> PathBuf {
        let path = &config.app.database_path;
        if path.is_absolute() {
            path.clone()
        } else {
            self.dir.join(path)
        }
    }

    /// Defaults when there is no file yet. A corrupt file is an error.
    pub fn load(&self) -> ConfigResult<Config> {
        self.file.read()
    }

    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_else(|e| {
            log::warn!("{}; falling back to defaults", e);
            Config::default()
        })
    }

    /// Refuses invalid values and leaves the file untouched
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.file.write(config)
    }

    /// Load, edit, save
    ///
    /// ```rust,no_run
    /// # use catalog_config::ConfigManager;
    /// # fn main() -> Result<(), catalog_config::ConfigError> {
    /// let manager = ConfigManager::new()?;
    /// manager.update(|config| config.catalog.min_year = 1900)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn update(&self, edit: impl FnOnce(&mut Config)) -> ConfigResult<()> {
        let mut config = self.load()?;
        edit(&mut config);
        self.save(&config)
    }

    /// Writes the defaults unless a file exists. True when one was written.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::debug!("Keeping existing {}", self.config_path().display());
            return Ok(false);
        }

        self.file.write_default()?;
        Ok(true)
    }

    pub fn reset(&self) -> ConfigResult<()> {
        self.file.write_default()
    }

    /// Problems in the stored file, one message per field
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        Ok(self
            .load()?
            .validate()
            .err()
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// Loads the file, then applies `CATALOG_<SECTION>_<FIELD>` variables
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

        if let Err(errors) = config.validate() {
            for error in errors {
                log::warn!("After environment overrides: {}", error);
            }
        }
        Ok(config)
    }
}

/// Applies overrides read through `lookup`, keyed by variable name
///
/// Nothing is changed when any value fails to parse.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let mut patched = config.clone();

    if let Some(path) = lookup(ENV_DATABASE_PATH) {
        patched.app.database_path = PathBuf::from(path);
    }
    if let Some(level) = parsed::<LogLevel, _>(&lookup, ENV_LOG_LEVEL)? {
        patched.app.log_level = level;
    }
    if let Some(year) = parsed(&lookup, ENV_MIN_YEAR)? {
        patched.catalog.min_year = year;
    }
    if let Some(length) = parsed(&lookup, ENV_MAX_TEXT_LENGTH)? {
        patched.catalog.max_text_length = length;
    }

    if patched != *config {
        log::info!("Configuration overridden from the environment");
    }
    *config = patched;
    Ok(())
}

fn parsed<T, F>(lookup: &F, variable: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(variable)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidOverride {
                    variable: variable.to_string(),
                    value,
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn manager() -> (TempDir, ConfigManager) {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::in_directory(dir.path());
        (dir, manager)
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_paths() {
        let (dir, manager) = manager();
        assert_eq!(manager.config_dir(), dir.path());
        assert_eq!(manager.config_path(), dir.path().join("config.toml"));
    }

    #[test]
    fn test_update_persists() {
        let (_dir, manager) = manager();

        manager
            .update(|config| config.catalog.max_text_length = 250)
            .unwrap();

        assert_eq!(manager.load().unwrap().catalog.max_text_length, 250);
    }

    #[test]
    fn test_initialize_only_once() {
        let (_dir, manager) = manager();

        assert!(manager.initialize().unwrap());
        manager.update(|config| config.catalog.min_year = 1990).unwrap();
        assert!(!manager.initialize().unwrap());
        assert_eq!(manager.load().unwrap().catalog.min_year, 1990);
    }

    #[test]
    fn test_invalid_config_is_not_saved() {
        let (_dir, manager) = manager();

        let mut config = Config::default();
        config.catalog.min_year = 3000;
        assert!(matches!(
            manager.save(&config),
            Err(ConfigError::Invalid(_))
        ));
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn test_database_path_resolves_against_config_dir() {
        let (dir, manager) = manager();
        let mut config = Config::default();

        assert_eq!(manager.database_path(&config), dir.path().join("catalog.db"));

        let absolute = dir.path().join("elsewhere").join("media.db");
        config.app.database_path = absolute.clone();
        assert_eq!(manager.database_path(&config), absolute);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_DATABASE_PATH, "/tmp/override.db"),
                (ENV_LOG_LEVEL, " Debug "),
                (ENV_MIN_YEAR, "1950"),
            ]),
        )
        .unwrap();

        assert_eq!(config.app.database_path, PathBuf::from("/tmp/override.db"));
        assert_eq!(config.app.log_level, LogLevel::Debug);
        assert_eq!(config.catalog.min_year, 1950);
        assert_eq!(config.catalog.max_text_length, 1000);
    }

    #[test]
    fn test_bad_override_changes_nothing() {
        let mut config = Config::default();
        let result = apply_env_overrides(
            &mut config,
            env(&[(ENV_MIN_YEAR, "1950"), (ENV_MAX_TEXT_LENGTH, "lots")]),
        );

        match result {
            Err(ConfigError::InvalidOverride { variable, value }) => {
                assert_eq!(variable, ENV_MAX_TEXT_LENGTH);
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidOverride, got {:?}", other),
        }
        assert_eq!(config, Config::default());
    }
}
