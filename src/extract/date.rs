//! Date extraction for German press releases.
//!
//! Two spellings are recognized, in a single alternation so that whichever
//! occurs first in the text wins:
//!
//! ```text
//! 12.3.2024          numeric, day and month 1-2 digits
//! 1. November 2025   day, German month name, year
//! ```
//!
//! The result is always `YYYY-MM-DD`. Day and month are zero-padded; nothing
//! checks that the day exists in the month.

use once_cell::sync::Lazy;
use regex::Regex;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})\.(\d{1,2})\.(\d{4})|\b(\d{1,2})\.\s*(Januar|Februar|März|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember)\s*(\d{4})\b",
    )
    .expect("date regex")
});

const MONTHS: [(&str, &str); 12] = [
    ("januar", "01"),
    ("februar", "02"),
    ("märz", "03"),
    ("april", "04"),
    ("mai", "05"),
    ("juni", "06"),
    ("juli", "07"),
    ("august", "08"),
    ("september", "09"),
    ("oktober", "10"),
    ("november", "11"),
    ("dezember", "12"),
];

/// Return the first date in `text` as `YYYY-MM-DD`, or `None` if there is none.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_date("am 12.3.2024 gegen"), Some("2024-03-12".to_string()));
/// assert_eq!(extract_date("am 1. November 2025"), Some("2025-11-01".to_string()));
/// ```
pub fn extract_date(text: &str) -> Option<String> {
    let caps = DATE_PATTERN.captures(text)?;

    if let (Some(day), Some(month), Some(year)) = (caps.get(1), caps.get(2), caps.get(3)) {
        return Some(format!(
            "{}-{}-{}",
            year.as_str(),
            zero_pad(month.as_str()),
            zero_pad(day.as_str())
        ));
    }

    if let (Some(day), Some(month), Some(year)) = (caps.get(4), caps.get(5), caps.get(6)) {
        return Some(format!(
            "{}-{}-{}",
            year.as_str(),
            month_number(month.as_str()),
            zero_pad(day.as_str())
        ));
    }

    None
}

/// Two-digit month for a German month name.
///
/// Unknown names map to `"01"`.
pub fn month_number(name: &str) -> &'static str {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .find(|(month, _)| *month == name)
        .map(|(_, number)| *number)
        .unwrap_or("01")
}

fn zero_pad(digits: &str) -> String {
    format!("{:0>2}", digits)
}
