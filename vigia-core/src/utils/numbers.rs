// File: vigia-core/src/utils/numbers.rs

use crate::Error;

/// Parses a user-typed money amount in Brazilian conventions.
///
/// Strips an optional `R$` prefix and spaces. When a comma is present
/// it is the decimal separator and any dots are thousands separators;
/// without a comma the input is read as a plain number, so `1.5` still
/// means one and a half.
pub fn parse_money(input: &str) -> Result<f64, Error> {
    let mut cleaned = input.trim().to_string();
    let lower = cleaned.to_lowercase();
    if let Some(rest) = lower.strip_prefix("r$") {
        cleaned = rest.to_string();
    }
    cleaned.retain(|c| !c.is_whitespace());

    if cleaned.is_empty() {
        return Err(Error::Parse("empty amount".to_string()));
    }
    // A trailing separator is a typo, not a number.
    if cleaned.ends_with(',') || cleaned.ends_with('.') {
        return Err(Error::Parse(format!("invalid amount: {}", input)));
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    let value: f64 = normalized
        .parse()
        .map_err(|_| Error::Parse(format!("invalid amount: {}", input)))?;
    if !value.is_finite() {
        return Err(Error::Parse(format!("invalid amount: {}", input)));
    }
    Ok(value)
}
