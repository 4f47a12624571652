//! Shared helpers for premium math and field display formatting.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (midpoint away from zero), the usual convention for currency.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` into the inclusive `[min, max]` range.
pub fn clamp(
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Decimal {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Formats a whole-dollar amount with a thousands separator: `$45,000`.
///
/// Fractional cents are dropped toward zero; display-only.
pub fn format_currency(value: Decimal) -> String {
    let negative = value < Decimal::ZERO;
    let whole = value.abs().trunc().to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 1);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats raw digits as a US phone number, `(813) 555-0123`.
///
/// Non-digits in the input are stripped first, so already-formatted
/// values pass through unchanged. Partial input is formatted as far as
/// it goes, matching as-you-type field behavior.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).take(10).collect();

    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({digits}"),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Formats raw digits as an SSN, `123-45-6789`, progressively for
/// partial input.
pub fn format_ssn(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).take(9).collect();

    match digits.len() {
        0..=3 => digits,
        4..=5 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..5], &digits[5..]),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(clamp(dec!(0.5), dec!(0.8), dec!(2.0)), dec!(0.8));
        assert_eq!(clamp(dec!(3.1), dec!(0.8), dec!(2.0)), dec!(2.0));
        assert_eq!(clamp(dec!(1.2), dec!(0.8), dec!(2.0)), dec!(1.2));
    }

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(45000)), "$45,000");
        assert_eq!(format_currency(dec!(1234567.89)), "$1,234,567");
        assert_eq!(format_currency(dec!(999)), "$999");
        assert_eq!(format_currency(dec!(0)), "$0");
        assert_eq!(format_currency(dec!(-1500)), "-$1,500");
    }

    #[test]
    fn format_phone_full_number() {
        assert_eq!(format_phone("8135550123"), "(813) 555-0123");
        assert_eq!(format_phone("(813) 555-0123"), "(813) 555-0123");
    }

    #[test]
    fn format_phone_partial_input() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("81"), "(81");
        assert_eq!(format_phone("81355"), "(813) 55");
        assert_eq!(format_phone("8135550"), "(813) 555-0");
    }

    #[test]
    fn format_phone_ignores_excess_digits() {
        assert_eq!(format_phone("81355501239999"), "(813) 555-0123");
    }

    #[test]
    fn format_ssn_full_and_partial() {
        assert_eq!(format_ssn("123456789"), "123-45-6789");
        assert_eq!(format_ssn("123-45-6789"), "123-45-6789");
        assert_eq!(format_ssn("123"), "123");
        assert_eq!(format_ssn("12345"), "123-45");
        assert_eq!(format_ssn("1234567"), "123-45-67");
    }
}
