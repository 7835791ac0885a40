//! Catalog content rules

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Limits applied when validating catalog entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Earliest accepted release year; the latest is always the current year
    pub min_year: i32,

    /// Maximum length of notes, links and other free text
    pub max_text_length: usize,
}

impl CatalogConfig {
    const EARLIEST_YEAR: i32 = 1800;
    const LATEST_YEAR: i32 = 2100;
    const TEXT_LENGTH_LIMIT: usize = 100_000;
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            min_year: 1930,
            max_text_length: 1000,
        }
    }
}

impl ConfigSection for CatalogConfig {
    const NAME: &'static str = "catalog";

    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::for_section::<Self>()
            .in_range(
                "min_year",
                self.min_year,
                Self::EARLIEST_YEAR..=Self::LATEST_YEAR,
            )
            .in_range(
                "max_text_length",
                self.max_text_length,
                1..=Self::TEXT_LENGTH_LIMIT,
            )
            .finish()
    }

    fn merge(&mut self, other: Self) {
        *self = other;
    }
}
