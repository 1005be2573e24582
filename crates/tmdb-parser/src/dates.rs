use chrono::{DateTime, NaiveDate, NaiveDateTime};

static DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%d %b %Y",
];
static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];
/// Layouts without a day; the date falls on the first of the month.
static MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%b %Y"];

/// Parses a release date cell. Returns `None` for blank or unrecognised text.
///
/// A bare year such as `2009` means January 1st of that year.
pub fn parse_release_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    let first_of_month = format!("{trimmed} 01");
    for fmt in MONTH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&first_of_month, &format!("{fmt} %d")) {
            return Some(date);
        }
    }

    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    None
}
