//! Error taxonomy of the public catalog API
//!
//! Every failure reaching a caller falls into one of four kinds. Lower-tier
//! errors are wrapped into [`FacadeError::Operation`] and never surface as
//! their own type.

use catalog_core::{CatalogError, EntityId, EntityKind, OrderingError};
use std::fmt;
use thiserror::Error;

/// Coarse classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed input, rejected before touching storage
    InvalidArgument,
    /// Well-formed input that breaks a content or ordering rule
    Validation,
    /// A referenced entity does not exist
    NotFound,
    /// Storage or another lower tier failed
    Operation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not found"),
            Self::Operation => write!(f, "operation"),
        }
    }
}

#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{entity} {id} was not found")]
    NotFound { entity: EntityKind, id: EntityId },

    #[error("Operation failed: {0}")]
    Operation(#[source] CatalogError),
}

impl FacadeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Operation(_) => ErrorKind::Operation,
        }
    }

    /// True when storage was only busy and the same call may succeed later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Operation(error) if error.is_retryable())
    }

    /// Single-message validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    pub fn not_found(entity: EntityKind, id: EntityId) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<CatalogError> for FacadeError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Ordering(ordering) => ordering.into(),
            other => Self::Operation(other),
        }
    }
}

impl From<OrderingError> for FacadeError {
    fn from(error: OrderingError) -> Self {
        match error {
            OrderingError::AlreadyAtBoundary { .. } => Self::validation(error.to_string()),
            OrderingError::NotPersisted
            | OrderingError::AlreadyPersisted { .. }
            | OrderingError::NotInGroup { .. } => Self::InvalidArgument(error.to_string()),
        }
    }
}

pub type FacadeResult<T> = std::result::Result<T, FacadeError>;
