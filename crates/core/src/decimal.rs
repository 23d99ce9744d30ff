//! Decimal parsing and display shared by `Money` and `Quantity`.

use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Parse `input` as a decimal with at most `scale` fraction digits and return
/// it in units of `10^-scale` (e.g. `"0.25"` at scale 3 is `250`).
pub(crate) fn parse_scaled(input: &str, scale: u32) -> Result<i128, String> {
    let mut value = Decimal::from_str(input.trim())
        .map_err(|e| format!("not a decimal number: {input:?} ({e})"))?;
    if value.scale() > scale {
        return Err(format!("more than {scale} fraction digits: {input:?}"));
    }
    value.rescale(scale);
    if value.scale() != scale {
        return Err(format!("number out of range: {input:?}"));
    }
    Ok(value.mantissa())
}

/// `value` rounded to a whole number, halves away from zero. `None` when the
/// result does not fit an `i64`.
pub(crate) fn round_to_i64(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Render a non-negative value with grouped thousands. `fixed` pins the
/// number of fraction digits; `None` drops trailing zeros.
pub(crate) fn format_grouped(value: Decimal, fixed: Option<usize>) -> String {
    let text = match fixed {
        Some(digits) => format!("{value:.digits$}"),
        None => value.normalize().to_string(),
    };
    match text.split_once('.') {
        Some((whole, frac)) => format!("{}.{frac}", group_thousands(whole)),
        None => group_thousands(&text),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_values() {
        assert_eq!(parse_scaled("5", 3), Ok(5000));
        assert_eq!(parse_scaled("0.25", 3), Ok(250));
        assert_eq!(parse_scaled(" 0.5 ", 3), Ok(500));
        assert_eq!(parse_scaled("-1.5", 2), Ok(-150));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(parse_scaled("", 2).is_err());
        assert!(parse_scaled("1.234", 2).is_err());
        assert!(parse_scaled("1,000", 2).is_err());
        assert!(parse_scaled("abc", 2).is_err());
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn formats_fixed_and_trimmed() {
        assert_eq!(format_grouped(Decimal::new(7500, 2), Some(2)), "75.00");
        assert_eq!(format_grouped(Decimal::new(90000, 2), None), "900");
        assert_eq!(format_grouped(Decimal::new(36250, 2), None), "362.5");
        assert_eq!(format_grouped(Decimal::new(107_500_000, 2), Some(2)), "1,075,000.00");
    }

    #[test]
    fn rounds_halves_away_from_zero() {
        assert_eq!(round_to_i64(Decimal::new(1500, 3)), Some(2));
        assert_eq!(round_to_i64(Decimal::new(1499, 3)), Some(1));
        assert_eq!(round_to_i64(Decimal::new(-1500, 3)), Some(-2));
        assert_eq!(round_to_i64(Decimal::new(-1499, 3)), Some(-1));
    }
}
