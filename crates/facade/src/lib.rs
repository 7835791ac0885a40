//! Media Catalog Facades
//!
//! Validating layer between callers and storage. Each entity family gets a
//! [`Facade`] that checks input, resolves references and keeps sibling
//! positions contiguous; [`Catalog`] wires them all against one database.

pub mod catalog;
pub mod collaborators;
pub mod error;
pub mod facade;

pub use catalog::{validation_rules, Catalog, SqliteFacade};
pub use collaborators::{ChildCopier, Existence, GenreUsage, Lookup};
pub use error::{ErrorKind, FacadeError, FacadeResult};
pub use facade::Facade;
