//! Date helper functions
//!
//! Post dates are written by hand in front-matter as `DD/MM/YYYY`; day and
//! month may omit their leading zero.

use chrono::NaiveDate;
use std::fmt::Write;

/// Compact a `DD/MM/YYYY` date into `DDMMYYYY`
///
/// Every `/`-separated part is left-padded with `0` to two characters, so the
/// result is the same whether or not the author wrote leading zeros.
///
/// # Examples
/// ```
/// assert_eq!(blog_builder::helpers::compact_tag("5/7/2023"), "05072023");
/// ```
pub fn compact_tag(date: &str) -> String {
    date.trim()
        .split('/')
        .map(|part| format!("{:0>2}", part))
        .collect()
}

/// Parse a `DD/MM/YYYY` date
pub fn parse_post_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.trim().split('/');
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a post date for display, e.g. `"Jun 15, 2023"` with `%b %d, %Y`
///
/// Posts without a usable date, or a format chrono rejects, display as an
/// empty string.
pub fn display_date(date: Option<NaiveDate>, format: &str) -> String {
    let Some(date) = date else {
        return String::new();
    };

    let mut display = String::new();
    if write!(display, "{}", date.format(format)).is_err() {
        tracing::warn!("Invalid date format {:?}", format);
        display.clear();
    }
    display
}
