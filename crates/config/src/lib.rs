//! Configuration of the media catalog
//!
//! One TOML file with an `[app]` and a `[catalog]` table. Each table is a
//! [`ConfigSection`] with its own validation. A missing file means
//! defaults, invalid values are logged on load and refused on save, and
//! writes replace the file atomically.
//!
//! ```rust,no_run
//! use catalog_config::ConfigManager;
//!
//! # fn main() -> Result<(), catalog_config::ConfigError> {
//! let manager = ConfigManager::new()?;
//! let config = manager.load_or_default();
//! println!("Earliest year: {}", config.catalog.min_year);
//! # Ok(())
//! # }
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

mod app_config;
mod catalog_config;

pub use error::{ConfigError, ConfigResult, FileAction, ValidationError};
pub use manager::{
    apply_env_overrides, ConfigManager, ENV_DATABASE_PATH, ENV_LOG_LEVEL, ENV_MAX_TEXT_LENGTH,
    ENV_MIN_YEAR,
};
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use catalog_config::CatalogConfig;

use serde::{Deserialize, Serialize};

/// Format version written to new files
pub const CONFIG_VERSION: u32 = 1;

/// The whole file; missing tables and keys take their defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub app: AppConfig,
    pub catalog: CatalogConfig,
}

impl Config {
    /// Errors of every section, in file order
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [self.app.validate(), self.catalog.validate()]
            .into_iter()
            .filter_map(Result::err)
            .flatten()
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Layers `other` on top, section by section
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.catalog.merge(other.catalog);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}
