use crate::errors::{NotaryError, Result};
use crate::model::{Asset, MAX_DECIMAL_POWER};

/// Parse a human-entered amount into the asset's smallest unit
///
/// Accepts `digits` or `digits.digits`, surrounded by optional whitespace.
/// The fractional part may not have more digits than `asset.decimal_power`:
/// the parser never rounds or truncates.
///
/// - `MalformedAmount`: empty, a sign (`+` or `-`), stray characters, a
///   second `.`, a bare `.`
/// - `AmountOutOfRange`: zero, too many decimals, overflows `i64`, or an asset
///   whose precision has no `i64` unit
///
/// ```
/// use tally_core::model::Asset;
/// use tally_core::rules::amount::parse_amount;
///
/// let usd = Asset::new("usd", "US Dollar", 2);
/// assert_eq!(parse_amount("5.25", &usd), Ok(525));
/// assert_eq!(parse_amount("500", &Asset::new("tok", "Token", 0)), Ok(500));
/// assert!(parse_amount("abc", &usd).is_err());
/// ```
pub fn parse_amount(text: &str, asset: &Asset) -> Result<i64> {
    let input = text.trim();
    let malformed = || NotaryError::MalformedAmount {
        input: text.to_string(),
    };
    let out_of_range = |reason: String| NotaryError::AmountOutOfRange {
        input: text.to_string(),
        reason,
    };

    let (whole, fraction) = match input.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (input, None),
    };

    if !is_digits(whole) {
        return Err(malformed());
    }
    if let Some(f) = fraction {
        if !is_digits(f) {
            return Err(malformed());
        }
    }

    if !asset.has_supported_precision() {
        return Err(out_of_range(format!(
            "{} has {} decimal places, at most {} are supported",
            asset.id, asset.decimal_power, MAX_DECIMAL_POWER
        )));
    }

    let power = asset.decimal_power;
    let fraction = fraction.unwrap_or("");
    if fraction.len() > power as usize {
        return Err(out_of_range(format!(
            "{} allows at most {} decimal places",
            asset.id, power
        )));
    }

    let overflow = || out_of_range("amount is too large".to_string());
    let unit = 10_i64.checked_pow(power).ok_or_else(overflow)?;
    let whole: i64 = whole.parse().map_err(|_| overflow())?;
    let fraction_value: i64 = if fraction.is_empty() {
        0
    } else {
        let padding = 10_i64
            .checked_pow(power - fraction.len() as u32)
            .ok_or_else(overflow)?;
        fraction
            .parse::<i64>()
            .map_err(|_| overflow())?
            .checked_mul(padding)
            .ok_or_else(overflow)?
    };

    let value = whole
        .checked_mul(unit)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(overflow)?;

    if value == 0 {
        return Err(out_of_range("amount must be greater than zero".to_string()));
    }

    Ok(value)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
