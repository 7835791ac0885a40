//! Common types and utilities shared across domain models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage-assigned identity of a catalog entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Wraps a raw identifier
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn get(&self) -> i64 {
        self.0
    }

    /// Storage only hands out strictly positive identifiers
    pub fn is_well_formed(&self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Duration in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration(u64);

impl Duration {
    /// Zero duration constant
    pub const ZERO: Self = Self(0);

    /// Longest length a catalog database can hold (a signed 64-bit count of ms)
    pub const MAX_STORED: Self = Self(i64::MAX as u64);

    /// Creates a duration from milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Creates a duration from seconds
    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds.saturating_mul(1000))
    }

    /// Returns the duration in milliseconds
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Returns the duration in seconds
    pub fn as_seconds(&self) -> u64 {
        self.0 / 1000
    }

    /// Returns true if the duration is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Formats as H:MM:SS (always shows hours)
    pub fn as_hms(&self) -> String {
        let total_seconds = self.as_seconds();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hms())
    }
}

impl std::ops::Add for Duration {
    type Output = Self;

    /// Saturates at `u64::MAX` ms
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, d| acc + d)
    }
}

/// Audio/subtitle language of a medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "CZ")]
    Czech,
    #[serde(rename = "EN")]
    English,
    #[serde(rename = "FR")]
    French,
    #[serde(rename = "JP")]
    Japanese,
    #[serde(rename = "SK")]
    Slovak,
}

impl Language {
    /// Short code used in storage and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            Self::Czech => "CZ",
            Self::English => "EN",
            Self::French => "FR",
            Self::Japanese => "JP",
            Self::Slovak => "SK",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CZ" => Ok(Self::Czech),
            "EN" => Ok(Self::English),
            "FR" => Ok(Self::French),
            "JP" => Ok(Self::Japanese),
            "SK" => Ok(Self::Slovak),
            other => Err(format!("unknown language code '{}'", other)),
        }
    }
}

/// Limits applied when validating entity content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Earliest accepted year
    pub min_year: i32,
    /// Latest accepted year, normally the current one
    pub max_year: i32,
    /// Maximum length of optional free-text fields
    pub max_text_length: usize,
}

impl ValidationRules {
    /// Lowest release year the catalog accepts unless configured otherwise
    pub const DEFAULT_MIN_YEAR: i32 = 1930;

    /// Default limit for notes and links
    pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1000;

    /// Creates rules with default limits and the given upper year bound
    pub fn with_max_year(max_year: i32) -> Self {
        Self {
            min_year: Self::DEFAULT_MIN_YEAR,
            max_year,
            max_text_length: Self::DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

/// Trait for types that can validate their content
pub trait Validator {
    /// Validates the instance and returns errors if invalid
    fn validate(&self, rules: &ValidationRules) -> Result<(), Vec<String>>;

    /// Returns true if the instance is valid
    fn is_valid(&self, rules: &ValidationRules) -> bool {
        self.validate(rules).is_ok()
    }
}

/// Collects validation failures for one entity
#[derive(Debug)]
pub struct Checks<'a> {
    rules: &'a ValidationRules,
    errors: Vec<String>,
}

impl<'a> Checks<'a> {
    pub fn new(rules: &'a ValidationRules) -> Self {
        Self {
            rules,
            errors: Vec::new(),
        }
    }

    /// Required text must contain something besides whitespace
    pub fn not_blank(&mut self, value: &str, field: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{} must not be empty", field));
        }
        self
    }

    /// Optional text, when present, must be non-blank and within the length limit
    pub fn optional_text(&mut self, value: Option<&str>, field: &str) -> &mut Self {
        if let Some(value) = value {
            if value.trim().is_empty() {
                self.errors
                    .push(format!("{} must not be empty when present", field));
            } else if value.chars().count() > self.rules.max_text_length {
                self.errors.push(format!(
                    "{} must not be longer than {} characters",
                    field, self.rules.max_text_length
                ));
            }
        }
        self
    }

    /// Year must lie in the configured range
    pub fn year(&mut self, value: i32, field: &str) -> &mut Self {
        if value < self.rules.min_year || value > self.rules.max_year {
            self.errors.push(format!(
                "{} must be between {} and {}",
                field, self.rules.min_year, self.rules.max_year
            ));
        }
        self
    }

    /// Numbering starts at one
    pub fn positive(&mut self, value: u32, field: &str) -> &mut Self {
        if value == 0 {
            self.errors.push(format!("{} must be greater than zero", field));
        }
        self
    }

    /// Length must fit the database
    pub fn length(&mut self, value: Duration, field: &str) -> &mut Self {
        if value > Duration::MAX_STORED {
            self.errors.push(format!(
                "{} must not be longer than {} ms",
                field,
                Duration::MAX_STORED.as_millis()
            ));
        }
        self
    }

    /// Collection must hold at least one element
    pub fn not_empty<T>(&mut self, values: &[T], field: &str) -> &mut Self {
        if values.is_empty() {
            self.errors.push(format!("{} must not be empty", field));
        }
        self
    }

    /// IMDB codes are seven-digit identifiers
    pub fn imdb_code(&mut self, value: Option<i32>, field: &str) -> &mut Self {
        if let Some(code) = value {
            if !(1..=9_999_999).contains(&code) {
                self.errors
                    .push(format!("{} must be between 1 and 9999999", field));
            }
        }
        self
    }

    /// Adds a failure when the condition does not hold
    pub fn ensure(&mut self, condition: bool, message: impl Into<String>) -> &mut Self {
        if !condition {
            self.errors.push(message.into());
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), Vec<String>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}
