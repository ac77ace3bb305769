use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A daycare centre as resolved from the organisation's directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Daycare {
    pub id: String,
    pub title: String,
    /// Posted daily tariff in CHF.
    pub rate: Decimal,
    /// Opening weeks per year, 0..=52.
    pub weeks: u32,
}

impl Daycare {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        rate: Decimal,
        weeks: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            rate,
            weeks,
        }
    }

    /// Conversion from yearly opening weeks to effective weeks per month.
    ///
    /// The constant 4.25/51 is taken verbatim from the established
    /// calculation; its derivation was never documented and it must not be
    /// re-derived.
    pub fn factor(&self) -> Decimal {
        Decimal::from(self.weeks) * dec!(4.25) / dec!(51)
    }
}
