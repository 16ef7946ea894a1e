//! Exact decimal amounts.
//!
//! Amounts are never routed through floating point. Both the fixture lines
//! and the node's JSON numbers are parsed from their textual form.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Most fractional digits a [`Decimal`] holds without rounding.
const MAX_SCALE: i64 = 28;

/// Parses a decimal amount in plain (`49.9999`, `-0.00015`) or scientific
/// (`1.5e-4`) notation.
///
/// Only a sign, ASCII digits, one point and an exponent are accepted. Values
/// that would need more than 28 fractional digits are rejected rather than
/// rounded.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    let scale = literal_scale(raw)?;
    if scale > MAX_SCALE {
        return None;
    }
    if raw.contains(['e', 'E']) {
        Decimal::from_scientific(raw).ok()
    } else {
        Decimal::from_str(raw).ok()
    }
}

/// Scale the literal needs once its exponent is applied, or `None` if `raw`
/// is not `[+-]digits[.digits][(e|E)[+-]digits]`.
fn literal_scale(raw: &str) -> Option<i64> {
    let (mantissa, exponent) = match raw.find(['e', 'E']) {
        Some(pos) => (&raw[..pos], Some(&raw[pos + 1..])),
        None => (raw, None),
    };

    let unsigned = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.len() + fraction.len() == 0 || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    let exponent = match exponent {
        None => 0,
        Some(text) => {
            let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
            if digits.is_empty() || !all_digits(digits) {
                return None;
            }
            text.parse::<i64>().ok()?
        }
    };
    i64::try_from(fraction.len()).ok()?.checked_sub(exponent)
}

/// Formats an amount without trailing zeros, so `10.00000000` prints as `10`.
pub fn format_amount(amount: &Decimal) -> String {
    amount.normalize().to_string()
}
