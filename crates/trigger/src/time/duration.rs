//! Duration string parsing over a fixed unit ladder.

use std::time::Duration;

use crate::error::{Result, TriggerError};

use super::instant::MS_PER_DAY;

/// Unit ladder after milliseconds, smallest first.
///
/// A unit string resolves to the first rung that has a name starting with it,
/// so ambiguous prefixes pick the smallest unit they could mean.
pub(crate) const UNIT_LADDER: &[(&[&str], u64)] = &[
    (&["seconds"], 1_000),
    (&["minutes"], 60_000),
    (&["hours"], 3_600_000),
    (&["days"], MS_PER_DAY as u64),
    (&["weeks"], 7 * MS_PER_DAY as u64),
    (&["months"], 30 * MS_PER_DAY as u64),
    (&["years"], 365 * MS_PER_DAY as u64),
    (&["century", "centuries"], 36_500 * MS_PER_DAY as u64),
];

/// Parse a human-readable duration string into a [`Duration`].
///
/// The string is scanned for `<digits><letters>` tokens (whitespace between
/// the two is allowed, anything else separates tokens) and the tokens are
/// summed. Units may be abbreviated down to any prefix:
///
/// - `ms` / `mil` / `milliseconds`
/// - `s` / `sec` / `seconds` (also used when the unit is empty)
/// - `m` / `min` / `minutes` (`m` is minutes, never milliseconds)
/// - `h`, `d`, `w`, `mo`, `y`, `c` for hours up to centuries
///
/// A string without any token parses to zero.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let mut total: u64 = 0;
    for (amount, unit) in tokens(input) {
        let amount: u64 = amount
            .parse()
            .map_err(|_| TriggerError::DurationOverflow(input.to_string()))?;
        total = unit_to_millis(amount, unit)?
            .checked_add(total)
            .ok_or_else(|| TriggerError::DurationOverflow(input.to_string()))?;
    }
    Ok(Duration::from_millis(total))
}

/// Convert `amount` of `unit` into milliseconds.
///
/// Fails with [`TriggerError::InvalidUnit`] if the unit matches no rung, or
/// [`TriggerError::DurationOverflow`] if the product leaves `u64`.
pub fn unit_to_millis(amount: u64, unit: &str) -> Result<u64> {
    let unit = unit.to_ascii_lowercase();
    let multiplier = unit_multiplier(&unit).ok_or_else(|| TriggerError::InvalidUnit(unit.clone()))?;
    amount
        .checked_mul(multiplier)
        .ok_or_else(|| TriggerError::DurationOverflow(format!("{}{}", amount, unit)))
}

fn unit_multiplier(unit: &str) -> Option<u64> {
    // "m" alone means minutes; the empty unit falls through to seconds.
    if !unit.is_empty() && unit != "m" && (unit == "ms" || "milliseconds".starts_with(unit)) {
        return Some(1);
    }
    UNIT_LADDER
        .iter()
        .find(|(names, _)| names.iter().any(|name| name.starts_with(unit)))
        .map(|(_, multiplier)| *multiplier)
}

/// Split `input` into `(digits, letters)` pairs.
fn tokens(input: &str) -> Vec<(&str, &str)> {
    let bytes = input.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let digits = &input[digits_start..i];

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let unit_start = i;
        while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
            i += 1;
        }

        found.push((digits, &input[unit_start..i]));
    }

    found
}
