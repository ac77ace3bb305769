//! Adapter between the organisation's generic directory of daycare centres
//! and the [`Daycare`] value object the calculator consumes.
//!
//! Directory fields carry whatever labels the organisation typed in, so
//! the mapping from label to meaning is declared explicitly; substring
//! inference over the labels exists only as a best-effort fallback.

mod parser;

pub use parser::read_entries;

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::daycare::Daycare;
use crate::services::slug;

/// A single directory row: a title plus dynamically-labeled field values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryEntry {
    pub title: String,
    pub values: HashMap<String, String>,
}

impl DirectoryEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(label.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("no directory field label matches {needle:?}")]
    UnmappedField { needle: &'static str },
    #[error("entry {entry:?} has no value for field {field:?}")]
    MissingValue { entry: String, field: String },
    #[error("entry {entry:?} field {field:?} is not a number: {value:?}")]
    InvalidNumber {
        entry: String,
        field: String,
        value: String,
    },
    #[error("no daycare centre titled {0:?}")]
    UnknownTitle(String),
    #[error("failed to read directory export: {0}")]
    Read(String),
}

/// Declared mapping from directory field labels to their meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Label of the daily-tariff field.
    pub rate: String,
    /// Label of the yearly-opening-weeks field.
    pub weeks: String,
    /// Label of the website field, if the directory has one.
    pub url: Option<String>,
}

/// The three fixed substrings of the deployment language that identify the
/// fields of interest.
const RATE_NEEDLE: &str = "tagestarif";
const WEEKS_NEEDLE: &str = "öffnungswochen";
const URL_NEEDLE: &str = "webseite";

impl FieldMapping {
    /// Best-effort schema inference: matches each label case-insensitively
    /// against the fixed substrings. The first matching label wins; a
    /// directory without a tariff or opening-weeks field cannot be mapped.
    pub fn infer<'a, I>(labels: I) -> Result<Self, DirectoryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rate = None;
        let mut weeks = None;
        let mut url = None;

        for label in labels {
            let lowered = label.to_lowercase();

            if lowered.contains(RATE_NEEDLE) {
                rate.get_or_insert_with(|| label.to_string());
            } else if lowered.contains(WEEKS_NEEDLE) {
                weeks.get_or_insert_with(|| label.to_string());
            } else if lowered.contains(URL_NEEDLE) {
                url.get_or_insert_with(|| label.to_string());
            }
        }

        Ok(Self {
            rate: rate.ok_or(DirectoryError::UnmappedField {
                needle: RATE_NEEDLE,
            })?,
            weeks: weeks.ok_or(DirectoryError::UnmappedField {
                needle: WEEKS_NEEDLE,
            })?,
            url,
        })
    }
}

/// Resolves directory entries into [`Daycare`] value objects.
#[derive(Debug, Clone)]
pub struct DirectoryDaycareAdapter {
    mapping: FieldMapping,
}

impl DirectoryDaycareAdapter {
    pub fn new(mapping: FieldMapping) -> Self {
        Self { mapping }
    }

    /// Builds an adapter by inferring the mapping from an entry set's
    /// labels.
    pub fn infer(entries: &[DirectoryEntry]) -> Result<Self, DirectoryError> {
        let labels: Vec<&str> = entries
            .iter()
            .flat_map(|entry| entry.values.keys().map(String::as_str))
            .collect();

        let mapping = FieldMapping::infer(labels)?;
        debug!(?mapping, "inferred directory field mapping");

        Ok(Self::new(mapping))
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Resolves one entry. Missing or unparseable fields surface here, at
    /// calculation-request time, as configuration errors.
    pub fn as_daycare(&self, entry: &DirectoryEntry) -> Result<Daycare, DirectoryError> {
        let rate = self.decimal_field(entry, &self.mapping.rate)?;

        let weeks_raw = self.string_field(entry, &self.mapping.weeks)?;
        let weeks: u32 =
            weeks_raw
                .trim()
                .parse()
                .map_err(|_| DirectoryError::InvalidNumber {
                    entry: entry.title.clone(),
                    field: self.mapping.weeks.clone(),
                    value: weeks_raw.to_string(),
                })?;

        Ok(Daycare::new(
            slug::normalize_for_url(&entry.title),
            entry.title.clone(),
            rate,
            weeks,
        ))
    }

    /// Resolves every entry of a directory export.
    pub fn daycares(&self, entries: &[DirectoryEntry]) -> Result<Vec<Daycare>, DirectoryError> {
        entries.iter().map(|entry| self.as_daycare(entry)).collect()
    }

    /// Looks a centre up the way the calculator form does, by its display
    /// title.
    pub fn daycare_by_title(
        &self,
        entries: &[DirectoryEntry],
        title: &str,
    ) -> Result<Daycare, DirectoryError> {
        entries
            .iter()
            .find(|entry| entry.title == title)
            .map(|entry| self.as_daycare(entry))
            .transpose()?
            .ok_or_else(|| DirectoryError::UnknownTitle(title.to_string()))
    }

    fn string_field<'a>(
        &self,
        entry: &'a DirectoryEntry,
        field: &str,
    ) -> Result<&'a str, DirectoryError> {
        entry
            .values
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| DirectoryError::MissingValue {
                entry: entry.title.clone(),
                field: field.to_string(),
            })
    }

    fn decimal_field(
        &self,
        entry: &DirectoryEntry,
        field: &str,
    ) -> Result<Decimal, DirectoryError> {
        let value = self.string_field(entry, field)?;

        value
            .trim()
            .parse()
            .map_err(|_| DirectoryError::InvalidNumber {
                entry: entry.title.clone(),
                field: field.to_string(),
                value: value.to_string(),
            })
    }
}
