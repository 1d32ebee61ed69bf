//! Date and time display helpers for terminal output.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

const NOT_AVAILABLE: &str = "N/A";

fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn with_pattern(raw: Option<&str>, pattern: &str) -> String {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => NOT_AVAILABLE.to_string(),
        Some(raw) => match parse_date_time(raw) {
            Some(dt) => dt.format(pattern).to_string(),
            // Unknown formats are shown as sent
            None => raw.to_string(),
        },
    }
}

/// "Mar 5, 2024"
pub fn short_date(raw: Option<&str>) -> String {
    with_pattern(raw, "%b %-d, %Y")
}

/// "05 Mar 2024"
pub fn day_month_year(raw: Option<&str>) -> String {
    with_pattern(raw, "%d %b %Y")
}

/// "Mar 05, 2024 - 02:30 PM"
pub fn date_time(raw: Option<&str>) -> String {
    with_pattern(raw, "%b %d, %Y - %I:%M %p")
}

fn clock(raw: &str) -> Option<String> {
    ["%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|p| NaiveTime::parse_from_str(raw.trim(), p).ok())
        .map(|t| t.format("%-I:%M %p").to_string())
}

/// Shift window such as "9:00 AM - 5:30 PM"
pub fn shift_range(start: Option<&str>, end: Option<&str>) -> String {
    match (start.and_then(clock), end.and_then(clock)) {
        (Some(start), Some(end)) => format!("{} - {}", start, end),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// "Monday, March 4, 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// "in_progress" -> "In Progress"
pub fn humanize(status: Option<&str>) -> String {
    match status.filter(|s| !s.is_empty()) {
        None => NOT_AVAILABLE.to_string(),
        Some(status) => status
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}
