//! Per-section validation of configuration values
//!
//! A section reports every bad field at once. Field names in the reported
//! errors are qualified with the section name, e.g. `catalog.min_year`.

pub use crate::error::ValidationError;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::Path;

/// One table of the TOML file
pub trait ConfigSection: Default {
    /// Table name in the TOML file
    const NAME: &'static str;

    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Takes every value from `other`
    fn merge(&mut self, other: Self);
}

/// Collects field errors for one section
#[derive(Debug)]
pub struct Validator {
    section: &'static str,
    errors: Vec<ValidationError>,
}

impl Validator {
    pub fn for_section<S: ConfigSection>() -> Self {
        Self {
            section: S::NAME,
            errors: Vec::new(),
        }
    }

    pub fn in_range<T>(&mut self, field: &str, value: T, range: RangeInclusive<T>) -> &mut Self
    where
        T: PartialOrd + Display + Copy,
    {
        if !range.contains(&value) {
            let field = self.qualified(field);
            let message = format!("must be between {} and {}", range.start(), range.end());
            self.errors.push(ValidationError::with_value(field, message, value));
        }
        self
    }

    /// A file path must name a file, not just a directory
    pub fn file_path(&mut self, field: &str, value: &Path) -> &mut Self {
        let field = self.qualified(field);
        if value.as_os_str().is_empty() {
            self.errors.push(ValidationError::new(field, "must not be empty"));
        } else if value.file_name().is_none() {
            self.errors.push(ValidationError::with_value(
                field,
                "must name a file",
                value.display(),
            ));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }

    fn qualified(&self, field: &str) -> String {
        format!("{}.{}", self.section, field)
    }
}
