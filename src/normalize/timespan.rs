//! Agent timespan rendering.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

/// `YYYY-MM-DD`; month and day may omit the leading zero.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month padding:none]-[day padding:none]");

/// A stored agent date that is not `YYYY-MM-DD`.
#[derive(Debug, thiserror::Error)]
#[error("invalid date {value:?}: expected YYYY-MM-DD")]
pub struct TimespanError {
    pub value: String,
    #[source]
    pub source: time::error::Parse,
}

/// Render `"{begin_year}-{end_year}"`; an absent (or empty) date leaves its
/// side of the hyphen empty.
///
/// ```
/// use lux::normalize::timespan;
///
/// assert_eq!(timespan(Some("1900-01-01"), Some("1950-06-01")).unwrap(), "1900-1950");
/// assert_eq!(timespan(Some("1900-01-01"), None).unwrap(), "1900-");
/// assert_eq!(timespan(None, None).unwrap(), "-");
/// ```
pub fn timespan(begin_date: Option<&str>, end_date: Option<&str>) -> Result<String, TimespanError> {
    Ok(format!("{}-{}", year_of(begin_date)?, year_of(end_date)?))
}

fn year_of(date: Option<&str>) -> Result<String, TimespanError> {
    match date {
        Some(value) if !value.is_empty() => {
            let parsed = Date::parse(value, DATE_FORMAT).map_err(|source| TimespanError {
                value: value.to_string(),
                source,
            })?;
            Ok(parsed.year().to_string())
        }
        _ => Ok(String::new()),
    }
}
