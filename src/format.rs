//! Swiss-locale decimal formatting for note texts and the presentation
//! layer: apostrophe thousands grouping, `.` as decimal separator, at most
//! three fraction digits and no trailing zero padding.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calc::CalcContext;

/// Formats an amount the way the de_CH locale renders plain decimals,
/// e.g. `154000` becomes `154'000` and `5.3500` becomes `5.35`.
///
/// Formatting re-enters the fine decimal context and never mutates the
/// stored amount it renders.
pub fn format_decimal(value: Decimal) -> String {
    let value = CalcContext::fine()
        .apply(value)
        .round_dp_with_strategy(3, RoundingStrategy::MidpointNearestEven)
        .normalize();

    let text = value.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    if value.is_sign_negative() && !value.is_zero() {
        grouped.push('-');
    }

    let digits: Vec<char> = integer.chars().collect();
    for (position, digit) in digits.iter().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push('\'');
        }
        grouped.push(*digit);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}
