//! Organisation-level configuration of the subsidy calculation.
//!
//! The policy is an explicit record with every field enumerated; unknown or
//! missing keys fail at load time rather than on first arithmetic use.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::services::Services;

/// Errors raised while loading organisation configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid policy configuration: {0}")]
    InvalidPolicy(#[source] serde_yaml::Error),
    #[error("invalid daycare settings document: {0}")]
    InvalidSettings(#[source] serde_yaml::Error),
    #[error("invalid service definition: {0}")]
    InvalidServiceDefinition(#[source] serde_yaml::Error),
    #[error("service {service:?} names unknown weekday {name:?}")]
    UnknownWeekday { service: String, name: String },
}

/// The municipality's policy constants, immutable for the duration of one
/// calculation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfiguration {
    /// Highest taxable income the settings form accepts; not a term of the
    /// pipeline itself.
    pub max_income: Decimal,
    /// Wealth below this threshold carries no surcharge.
    pub max_wealth: Decimal,
    /// Subtracted from the total income to form the calculation base.
    pub min_income: Decimal,
    /// Minimum daily parent contribution.
    pub min_rate: Decimal,
    /// Daily tariff ceiling; anything above is charged to the parents.
    pub max_rate: Decimal,
    /// Surcharge multiplier on wealth above `max_wealth`.
    pub wealth_premium: Decimal,
    /// Income-dependent contribution factor (Kita-Reglement Art. 20 Abs 3).
    pub wealth_factor: Decimal,
    /// Rebate percentage on the gross parent contribution.
    pub rebate: Decimal,
}

impl PolicyConfiguration {
    pub fn from_yaml(document: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(document).map_err(ConfigError::InvalidPolicy)
    }
}

/// The complete `daycare_settings` document as the organisation stores it:
/// the policy constants, the service-definition document and the title of
/// the directory holding the daycare centres.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaycareSettings {
    pub max_income: Decimal,
    pub max_wealth: Decimal,
    pub min_income: Decimal,
    pub min_rate: Decimal,
    pub max_rate: Decimal,
    pub wealth_premium: Decimal,
    pub wealth_factor: Decimal,
    pub rebate: Decimal,
    pub services: String,
    pub directory: Option<String>,
}

impl DaycareSettings {
    pub fn from_yaml(document: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(document).map_err(ConfigError::InvalidSettings)
    }

    pub fn policy(&self) -> PolicyConfiguration {
        PolicyConfiguration {
            max_income: self.max_income,
            max_wealth: self.max_wealth,
            min_income: self.min_income,
            min_rate: self.min_rate,
            max_rate: self.max_rate,
            wealth_premium: self.wealth_premium,
            wealth_factor: self.wealth_factor,
            rebate: self.rebate,
        }
    }

    /// Parses the embedded service-definition document.
    pub fn services(&self) -> Result<Services, ConfigError> {
        Services::from_definition(&self.services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const POLICY: &str = r#"
max_income: 75000
max_wealth: 154000
min_income: 20000
min_rate: 15
max_rate: 107
wealth_premium: 10.00
wealth_factor: "0.0016727273"
rebate: 5.00
"#;

    #[test]
    fn loads_a_complete_policy() {
        let policy = PolicyConfiguration::from_yaml(POLICY).expect("policy loads");
        assert_eq!(policy.max_wealth, dec!(154000));
        assert_eq!(policy.wealth_factor, dec!(0.0016727273));
        assert_eq!(policy.rebate, dec!(5.00));
    }

    #[test]
    fn missing_fields_fail_at_load_time() {
        let document = "max_income: 75000\nmax_wealth: 154000\n";
        assert!(matches!(
            PolicyConfiguration::from_yaml(document),
            Err(ConfigError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let document = format!("{POLICY}surcharge: 3\n");
        assert!(matches!(
            PolicyConfiguration::from_yaml(&document),
            Err(ConfigError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn settings_wrap_policy_and_service_definition() {
        let document = format!(
            "{POLICY}directory: \"Kitas\"\nservices: |\n  - titel: \"Ganzer Tag\"\n    tage: \"Mo, Di, Mi, Do, Fr\"\n    prozent: 100.00\n"
        );

        let settings = DaycareSettings::from_yaml(&document).expect("settings load");
        assert_eq!(settings.policy().min_rate, dec!(15));
        assert_eq!(settings.directory.as_deref(), Some("Kitas"));

        let services = settings.services().expect("services parse");
        assert_eq!(services.available().len(), 1);
        assert_eq!(services.available()[0].id, "ganzer-tag");
    }
}
