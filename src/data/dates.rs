use chrono::{Datelike, NaiveDate};

/// Formats tried, in order, for the free-text `date_added` column.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // September 25, 2021
    "%b %d, %Y", // Sep 25, 2021
    "%Y-%m-%d",
    "%d-%b-%y", // 25-Sep-21
    "%m/%d/%Y",
    "%d %B %Y",
];

/// Parse a free-form date; `None` when no known format matches.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Year component of [`parse_date`].
pub fn parse_year(text: &str) -> Option<i32> {
    parse_date(text).map(|d| d.year())
}
