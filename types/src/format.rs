//! Human-readable formatting for byte counts and dates.

use chrono::Datelike;

/// Base-1024 unit labels, smallest first.
const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

const KIB: u64 = 1024;

/// Precision used by [`format_bytes`].
pub const DEFAULT_BYTE_DECIMALS: usize = 2;

/// Format a byte count with two decimal places, e.g. `1536 -> "1.5 KB"`.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with_precision(bytes, DEFAULT_BYTE_DECIMALS)
}

/// Format a byte count using the largest base-1024 unit that keeps the value >= 1.
///
/// The value is rounded to `decimals` places, then trailing zeros and a
/// dangling decimal point are dropped (`1.50 KB` prints as `1.5 KB`,
/// `1.00 KB` as `1 KB`). Zero is always `"0 Bytes"`.
#[must_use]
pub fn format_bytes_with_precision(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0usize;
    let mut scale = 1u64;
    while exponent + 1 < BYTE_UNITS.len() {
        match scale.checked_mul(KIB) {
            Some(next) if bytes >= next => {
                scale = next;
                exponent += 1;
            }
            _ => break,
        }
    }

    let value = round_half_up(bytes as f64 / scale as f64, decimals);
    let rendered = format!("{value:.decimals$}");
    format!("{} {}", trim_fraction(&rendered), BYTE_UNITS[exponent])
}

/// Round to `decimals` places with ties going up, as `toFixed` does for the
/// exact binary fractions a byte ratio produces. `format!` alone rounds ties
/// to even (`1.125 -> 1.12`).
fn round_half_up(value: f64, decimals: usize) -> f64 {
    // Past 15 places an f64 has no digits left to round.
    if decimals > 15 {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Drop trailing zeros after a decimal point, and the point itself if nothing remains.
fn trim_fraction(number: &str) -> &str {
    if !number.contains('.') {
        return number;
    }
    number.trim_end_matches('0').trim_end_matches('.')
}

/// Long-form US English date, e.g. `"January 5, 2024"`.
#[must_use]
pub fn format_date(date: &impl Datelike) -> String {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    let month = MONTHS[date.month0() as usize];
    format!("{month} {}, {}", date.day(), date.year())
}
