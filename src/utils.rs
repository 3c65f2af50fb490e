//! Small numeric and formatting helpers shared by the chart modules.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time in milliseconds since the Unix epoch.
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(0)
}

/// Maximum over the finite values of an iterator.
///
/// `NaN` and infinities are skipped. Returns `None` when no finite value is present.
pub fn nan_safe_max<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc: Option<f64>, value| match acc {
            Some(current) if current >= value => Some(current),
            _ => Some(value),
        })
}

/// Formats a number with comma thousands separators, e.g. `1234567.5` -> `"1,234,567.5"`.
///
/// Non-finite values format as an empty string.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let raw = format!("{}", value.abs());
    let (integer, fraction) = match raw.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(raw.len() + integer.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Formats a price with a fixed number of decimals; non-finite values format as `""`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        String::new()
    }
}

/// Formats the magnitude of an axis tick value, e.g. `-250` -> `"250"`.
pub fn format_abs(value: f64) -> String {
    // -0.0 would otherwise print as "-0"
    let magnitude = value.abs() + 0.0;
    format!("{magnitude}")
}
