use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

pub const NOT_SPECIFIED: &str = "Not specified";

/// `March 7th, 2025`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        date.format("%B"),
        ordinal(date.day()),
        date.year()
    )
}

/// `March 7th 2025, 3:04:05 pm`
pub fn submission_timestamp(at: NaiveDateTime) -> String {
    format!(
        "{} {} {}, {}",
        at.format("%B"),
        ordinal(at.day()),
        at.year(),
        at.format("%-I:%M:%S %P")
    )
}

/// Renders a date typed into a form. Unparseable input is shown verbatim.
pub fn describe_date(raw: Option<&str>) -> String {
    match raw {
        None => NOT_SPECIFIED.to_string(),
        Some(raw) => parse_date(raw)
            .map(long_date)
            .unwrap_or_else(|| raw.to_string()),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
                .ok()
                .map(|d| d.date())
        })
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}
