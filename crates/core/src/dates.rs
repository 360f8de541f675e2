//! Service date parsing and display formatting.
//!
//! Target dates arrive in a short numeric form (`3/10/24`) and are shown in
//! templates in a long form (`March 10, 2024`). Both formats are chrono
//! strftime strings and can be overridden from the config file.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

/// Default format for dates given on the command line.
pub const DEFAULT_INPUT_FORMAT: &str = "%m/%d/%y";

/// Default format for the `DATE` template variable.
pub const DEFAULT_DISPLAY_FORMAT: &str = "%B %-d, %Y";

/// Default spelling of a computed target date, matching how schedules
/// usually store dates (`3/10/24`).
pub const DEFAULT_SCHEDULE_FORMAT: &str = "%-m/%-d/%y";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("invalid date '{input}': expected {expected}")]
    Malformed {
        input: String,
        expected: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid date format string: {0}")]
    InvalidFormat(String),
}

/// The three strftime formats used when handling service dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormats {
    pub input: String,
    pub display: String,
    pub schedule: String,
}

impl Default for DateFormats {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_FORMAT.to_string(),
            display: DEFAULT_DISPLAY_FORMAT.to_string(),
            schedule: DEFAULT_SCHEDULE_FORMAT.to_string(),
        }
    }
}

impl DateFormats {
    /// Reject formats chrono cannot interpret before any date is handled.
    pub fn validate(&self) -> Result<(), DateParseError> {
        for fmt in [&self.input, &self.display, &self.schedule] {
            check_format(fmt)?;
        }
        Ok(())
    }
}

/// Parse a short-form date and render it in long display form.
///
/// `normalize("3/10/24", &DateFormats::default())` yields `"March 10, 2024"`.
pub fn normalize(input: &str, formats: &DateFormats) -> Result<String, DateParseError> {
    let date = parse_short_date(input, &formats.input)?;
    format_date(date, &formats.display)
}

/// Parse `input` against `fmt`. Impossible calendar dates are rejected.
pub fn parse_short_date(input: &str, fmt: &str) -> Result<NaiveDate, DateParseError> {
    check_format(fmt)?;
    NaiveDate::parse_from_str(input.trim(), fmt).map_err(|source| {
        DateParseError::Malformed {
            input: input.to_string(),
            expected: describe_format(fmt),
            source,
        }
    })
}

/// Format a date, surfacing bad format strings as errors instead of panics.
pub fn format_date(date: NaiveDate, fmt: &str) -> Result<String, DateParseError> {
    check_format(fmt)?;
    let mut out = String::new();
    write!(out, "{}", date.format(fmt))
        .map_err(|_| DateParseError::InvalidFormat(fmt.to_string()))?;
    Ok(out)
}

/// The first Sunday on or after `today`.
pub fn next_sunday(today: NaiveDate) -> NaiveDate {
    let days_until = (7 - today.weekday().num_days_from_sunday()) % 7;
    today.checked_add_days(Days::new(u64::from(days_until))).unwrap_or(today)
}

fn check_format(fmt: &str) -> Result<(), DateParseError> {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(DateParseError::InvalidFormat(fmt.to_string()));
    }
    Ok(())
}

/// Turn a strftime string into something a user can read, e.g.
/// `%m/%d/%y` -> `MM/DD/YY`.
pub fn describe_format(fmt: &str) -> String {
    const TOKENS: &[(&str, &str)] = &[
        ("%-m", "M"),
        ("%-d", "D"),
        ("%m", "MM"),
        ("%d", "DD"),
        ("%Y", "YYYY"),
        ("%y", "YY"),
        ("%B", "Month"),
        ("%b", "Mon"),
        ("%A", "Weekday"),
    ];

    let mut out = fmt.to_string();
    for (token, label) in TOKENS {
        out = out.replace(token, label);
    }
    out
}
