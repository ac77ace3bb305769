use rust_decimal::{Decimal, RoundingStrategy};

use super::ArithmeticError;

/// Decimal context with an explicit number of significant digits.
///
/// The subsidy pipeline runs its monetary arithmetic under a coarse
/// five-digit context, mirroring the legally established calculation. The
/// fine context exists for render-time formatting, which must never lose
/// precision on already-computed amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcContext {
    significant_digits: u32,
}

impl CalcContext {
    /// The coarse pass used for all monetary pipeline arithmetic.
    pub const fn coarse() -> Self {
        Self {
            significant_digits: 5,
        }
    }

    /// The fine pass used for formatting stored amounts.
    pub const fn fine() -> Self {
        Self {
            significant_digits: 28,
        }
    }

    /// Rounds a result to the context's significant digits, half to even.
    pub fn apply(&self, value: Decimal) -> Decimal {
        value
            .round_sf_with_strategy(self.significant_digits, RoundingStrategy::MidpointNearestEven)
            .unwrap_or(value)
    }

    pub fn add(&self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ArithmeticError> {
        lhs.checked_add(rhs)
            .map(|value| self.apply(value))
            .ok_or(ArithmeticError::Overflow)
    }

    pub fn sub(&self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ArithmeticError> {
        lhs.checked_sub(rhs)
            .map(|value| self.apply(value))
            .ok_or(ArithmeticError::Overflow)
    }

    pub fn mul(&self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ArithmeticError> {
        lhs.checked_mul(rhs)
            .map(|value| self.apply(value))
            .ok_or(ArithmeticError::Overflow)
    }

    pub fn div(&self, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }

        lhs.checked_div(rhs)
            .map(|value| self.apply(value))
            .ok_or(ArithmeticError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn coarse_context_keeps_five_significant_digits() {
        let ctx = CalcContext::coarse();
        assert_eq!(
            ctx.mul(dec!(55000), dec!(0.0016727273)).unwrap(),
            dec!(92.000)
        );
        assert_eq!(ctx.add(dec!(8.3636365), dec!(15)).unwrap(), dec!(23.364));
    }

    #[test]
    fn midpoints_round_half_to_even() {
        let ctx = CalcContext::coarse();
        assert_eq!(ctx.apply(dec!(496.485)), dec!(496.48));
        assert_eq!(ctx.apply(dec!(496.475)), dec!(496.48));
    }

    #[test]
    fn fine_context_leaves_amounts_untouched() {
        let ctx = CalcContext::fine();
        assert_eq!(ctx.apply(dec!(2181.3125)), dec!(2181.3125));
    }

    #[test]
    fn division_by_zero_is_reported() {
        let ctx = CalcContext::coarse();
        assert_eq!(
            ctx.div(dec!(1), Decimal::ZERO),
            Err(ArithmeticError::DivisionByZero)
        );
    }
}
