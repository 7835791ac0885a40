//! Config file failures

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// File system step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Read,
    Write,
    Backup,
    CreateDirectory,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::Backup => write!(f, "back up"),
            Self::CreateDirectory => write!(f, "create directory"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not {action} {}: {source}", path.display())]
    File {
        action: FileAction,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid TOML: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not serialize the configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Refused to save values that break a section's rules
    #[error("Invalid configuration: {}", join(.0))]
    Invalid(Vec<ValidationError>),

    #[error("No configuration directory is known for this platform")]
    NoConfigDir,

    #[error("Invalid value '{value}' in environment variable {variable}")]
    InvalidOverride { variable: String, value: String },
}

impl ConfigError {
    pub(crate) fn file(
        action: FileAction,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::File {
            action,
            path: path.into(),
            source,
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// One bad field, e.g. `catalog.min_year`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {message}{}", .value.as_ref().map(|v| format!(" (got {})", v)).unwrap_or_default())]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}
