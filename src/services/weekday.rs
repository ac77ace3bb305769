use serde::Serialize;

/// A weekday slot of the weekly attendance grid, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Display label in the deployment language.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Montag",
            Self::Tuesday => "Dienstag",
            Self::Wednesday => "Mittwoch",
            Self::Thursday => "Donnerstag",
            Self::Friday => "Freitag",
            Self::Saturday => "Samstag",
            Self::Sunday => "Sonntag",
        }
    }

    /// Matches a weekday name by its first two characters, case-insensitive.
    ///
    /// The table Mo, Di, Mi, Do, Fr, Sa, So is a fixed external contract of
    /// the service-definition documents, not a configurable mapping.
    pub fn from_german_name(name: &str) -> Option<Self> {
        let mut chars = name.trim().chars().flat_map(char::to_lowercase);
        let first = chars.next()?;
        let second = chars.next()?;

        match (first, second) {
            ('m', 'o') => Some(Self::Monday),
            ('d', 'i') => Some(Self::Tuesday),
            ('m', 'i') => Some(Self::Wednesday),
            ('d', 'o') => Some(Self::Thursday),
            ('f', 'r') => Some(Self::Friday),
            ('s', 'a') => Some(Self::Saturday),
            ('s', 'o') => Some(Self::Sunday),
            _ => None,
        }
    }
}
