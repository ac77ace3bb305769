use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const FIVE_CENTS: Decimal = dec!(0.05);
const HALF: Decimal = dec!(0.5);

/// Rounds an amount to the nearest five cents.
///
/// This is the only rounding rule the municipality applies to amounts that
/// are actually paid; everything else stays at its exact decimal value.
pub fn round_to_5_cents(amount: Decimal) -> Decimal {
    (amount / FIVE_CENTS + HALF).floor() * FIVE_CENTS
}

/// An amount that has passed through [`round_to_5_cents`].
///
/// Only the two monthly figures of the pipeline are ever paid out, so only
/// they are represented as `RoundedAmount`; the type makes it impossible to
/// round anything else by accident.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedAmount(Decimal);

impl RoundedAmount {
    pub fn new(amount: Decimal) -> Self {
        Self(round_to_5_cents(amount))
    }

    pub fn get(self) -> Decimal {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_the_nearest_five_cents() {
        assert_eq!(round_to_5_cents(dec!(2181.3)), dec!(2181.30));
        assert_eq!(round_to_5_cents(dec!(113.69)), dec!(113.70));
        assert_eq!(round_to_5_cents(dec!(113.67)), dec!(113.65));
        assert_eq!(round_to_5_cents(dec!(0.024)), dec!(0.00));
        assert_eq!(round_to_5_cents(dec!(0.025)), dec!(0.05));
    }

    #[test]
    fn rounding_is_idempotent() {
        for raw in [dec!(496.48), dec!(113.6875), dec!(0.01), dec!(55000)] {
            let once = round_to_5_cents(raw);
            assert_eq!(round_to_5_cents(once), once);
        }
    }

    #[test]
    fn result_is_always_a_multiple_of_five_cents() {
        for raw in [dec!(2181.3125), dec!(113.6875), dec!(496.485), dec!(0.07)] {
            let rounded = round_to_5_cents(raw);
            assert_eq!(rounded % FIVE_CENTS, Decimal::ZERO, "{raw} -> {rounded}");
        }
    }

    #[test]
    fn rounded_amount_applies_the_rule_on_construction() {
        assert_eq!(RoundedAmount::new(dec!(113.6875)).get(), dec!(113.70));
    }
}
