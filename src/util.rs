// Utility helpers for parsing and basic statistics.
//
// All of the forgiving cell handling lives here so the loader and the views
// can work with `Option<f64>` / `Option<NaiveDate>` and nothing else.
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};
use once_cell::sync::Lazy;

/// Date layouts tried in order when no list is configured.
///
/// Ambiguous numeric dates are read month first. The day-first layouts only
/// match what month-first cannot, such as `20.04.2014`.
pub static DEFAULT_DATE_FORMATS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%m/%d/%Y %H:%M:%S",
        "%m.%d.%Y",
        "%m.%d.%Y %H:%M:%S",
        "%m.%d.%Y %H:%M",
        "%d/%m/%Y",
        "%d/%m/%Y %H:%M:%S",
        "%d.%m.%Y",
        "%d.%m.%Y %H:%M:%S",
        "%d.%m.%Y %H:%M",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

// Day zero of spreadsheet serial dates (accounts for the 1900 leap-year bug).
static SERIAL_EPOCH: Lazy<Option<NaiveDate>> = Lazy::new(|| NaiveDate::from_ymd_opt(1899, 12, 30));

/// Parse a rating-like cell into `f64`.
///
/// - Trims whitespace; empty is missing.
/// - Rejects anything with letters (`"n/a"`, `"ikke vurdert"`).
/// - Accepts a decimal comma (`"2,5"`) when there is no decimal point.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_alphabetic()) {
        return None;
    }
    let normalized = if s.contains('.') {
        s.replace(',', "")
    } else {
        s.replace(',', ".")
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a date cell against `formats`, then RFC 3339, then as a
/// spreadsheet serial day number. Anything else is missing.
pub fn parse_date_safe(s: Option<&str>, formats: &[String]) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    parse_serial_date(s)
}

fn parse_serial_date(s: &str) -> Option<NaiveDate> {
    let serial = s.parse::<f64>().ok()?;
    // Starts in 1927 so a bare year such as `2019` is not read as a serial.
    if !(10_000.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    let epoch = (*SERIAL_EPOCH)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

pub fn average(v: &[f64]) -> Option<f64> {
    if v.is_empty() {
        return None;
    }
    Some(v.iter().sum::<f64>() / v.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Undefined below two values.
pub fn sample_std_dev(v: &[f64]) -> Option<f64> {
    if v.len() < 2 {
        return None;
    }
    let mean = average(v)?;
    let ss: f64 = v.iter().map(|x| (x - mean).powi(2)).sum();
    Some((ss / (v.len() - 1) as f64).sqrt())
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale thousands separators (`1,234.50`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Blank for missing values, as in the raw table.
pub fn format_opt(n: Option<f64>, decimals: usize) -> String {
    n.map(|v| format_number(v, decimals)).unwrap_or_default()
}

pub fn format_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
