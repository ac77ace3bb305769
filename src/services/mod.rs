//! The configurable weekly service grid: which day-parts a daycare centre
//! offers, and which of them a household has selected.

pub(crate) mod slug;
mod weekday;

pub use weekday::Weekday;

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfigError;

/// A selectable day-part, e.g. "Ganzer Tag inkl. Mittagessen" at 100%.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDefinition {
    /// URL-safe slug of the title, unique within one catalog.
    pub id: String,
    pub title: String,
    /// Fraction of the full daily rate this day-part represents, in
    /// percentage points.
    pub percentage: Decimal,
    /// Weekdays on which the service may be booked.
    pub days: BTreeSet<Weekday>,
}

/// Raw service record as the organisation stores it. The German keys are a
/// fixed external contract of the settings document.
#[derive(Debug, Deserialize)]
struct ServiceRecord {
    titel: String,
    tage: String,
    prozent: Decimal,
}

/// Errors in a household's attendance selection. These are user input
/// errors the caller must surface before any subsidy is computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no service with id {0:?} exists in this catalog")]
    UnknownService(String),
    #[error("more than one service selected on {}", .day.label())]
    OverlappingDays { day: Weekday },
}

/// The parsed service catalog together with the household's selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Services {
    available: Vec<ServiceDefinition>,
    selected: BTreeMap<String, BTreeSet<Weekday>>,
}

impl Services {
    /// Parses the organisation's service-definition document, a YAML
    /// sequence of `{titel, tage, prozent}` records.
    ///
    /// Slug collisions overwrite the earlier entry in place: the last
    /// record wins, at the position of the first. This mirrors how the
    /// settings document has always behaved and is covered by tests; it is
    /// not an oversight.
    pub fn from_definition(definition: &str) -> Result<Self, ConfigError> {
        let records: Vec<ServiceRecord> =
            serde_yaml::from_str(definition).map_err(ConfigError::InvalidServiceDefinition)?;

        let mut available: Vec<ServiceDefinition> = Vec::with_capacity(records.len());

        for record in records {
            let id = slug::normalize_for_url(&record.titel);

            let mut days = BTreeSet::new();
            for name in record.tage.split(',') {
                let day = Weekday::from_german_name(name).ok_or_else(|| {
                    ConfigError::UnknownWeekday {
                        service: record.titel.clone(),
                        name: name.trim().to_string(),
                    }
                })?;
                days.insert(day);
            }

            let service = ServiceDefinition {
                id: id.clone(),
                title: record.titel,
                percentage: record.prozent,
                days,
            };

            match available.iter_mut().find(|existing| existing.id == id) {
                Some(existing) => *existing = service,
                None => available.push(service),
            }
        }

        debug!(services = available.len(), "parsed service definition");

        Ok(Self {
            available,
            selected: BTreeMap::new(),
        })
    }

    /// Syntax-checks a definition document without keeping the result,
    /// for use by settings forms.
    pub fn check_definition(definition: &str) -> Result<(), ConfigError> {
        Self::from_definition(definition).map(|_| ())
    }

    pub fn available(&self) -> &[ServiceDefinition] {
        &self.available
    }

    pub fn get(&self, service_id: &str) -> Option<&ServiceDefinition> {
        self.available.iter().find(|s| s.id == service_id)
    }

    /// Marks a weekday as selected for a service. Idempotent.
    pub fn select(&mut self, service_id: &str, day: Weekday) -> Result<(), SelectionError> {
        if self.get(service_id).is_none() {
            return Err(SelectionError::UnknownService(service_id.to_string()));
        }

        self.selected
            .entry(service_id.to_string())
            .or_default()
            .insert(day);

        Ok(())
    }

    /// Removes a weekday from a service's selection. Idempotent.
    pub fn deselect(&mut self, service_id: &str, day: Weekday) {
        if let Some(days) = self.selected.get_mut(service_id) {
            days.remove(&day);
        }
    }

    pub fn is_selected(&self, service_id: &str, day: Weekday) -> bool {
        self.selected
            .get(service_id)
            .map(|days| days.contains(&day))
            .unwrap_or(false)
    }

    /// Checks that no weekday is covered by more than one service. Two
    /// day-parts on the same day are a user input error, never resolved
    /// silently.
    pub fn validate_selection(&self) -> Result<(), SelectionError> {
        for day in Weekday::ordered() {
            let covering = self
                .selected
                .values()
                .filter(|days| days.contains(&day))
                .count();

            if covering > 1 {
                return Err(SelectionError::OverlappingDays { day });
            }
        }

        Ok(())
    }

    /// Total selected percentage points: Σ percentage × selected days.
    ///
    /// Deliberately uncapped; a selection of five full days at 100% totals
    /// 500.
    pub fn total(&self) -> Decimal {
        self.selected
            .iter()
            .filter_map(|(id, days)| {
                self.get(id)
                    .map(|service| service.percentage * Decimal::from(days.len()))
            })
            .sum()
    }
}
