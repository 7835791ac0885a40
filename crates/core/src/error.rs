//! Errors of the core types and the storage layer
//!
//! Ordering failures carry their own [`OrderingError`] and convert into
//! [`CatalogError::Ordering`].

use crate::ordering::OrderingError;
use std::fmt;
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// How far a failure reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Retrying the same call may succeed
    Transient,
    /// Only this request failed
    Request,
    /// The database file itself is unusable until someone repairs it
    Storage,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transient => "transient",
            Self::Request => "request",
            Self::Storage => "storage",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Another connection holds the write lock
    #[error("Database locked during {operation}")]
    DatabaseLocked { operation: String },

    #[error("Database corrupted: {details}")]
    DatabaseCorrupted { details: String },

    #[error("Migration {version} failed: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("{entity} {id} does not exist")]
    NotFound { entity: String, id: String },

    /// A stored column did not decode
    #[error("Column {field} holds unreadable value '{value}'")]
    InvalidData { field: String, value: String },

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error("Invalid {argument}: {reason}")]
    InvalidArgument { argument: String, reason: String },
}

impl CatalogError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DatabaseLocked { .. } => ErrorSeverity::Transient,
            Self::DatabaseCorrupted { .. } | Self::MigrationFailed { .. } => ErrorSeverity::Storage,
            Self::Database { .. }
            | Self::NotFound { .. }
            | Self::InvalidData { .. }
            | Self::Ordering(_)
            | Self::InvalidArgument { .. } => ErrorSeverity::Request,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Transient
    }

    pub fn database<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Database {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn not_found(entity: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
