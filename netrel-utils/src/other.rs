//! Module containing some utility functions that didn't fit anywhere else.

use time::{macros::format_description, OffsetDateTime};

/// Produces a timestamp `String` of the current time in YYYY-MM-DD_HH-mm-SS format.
pub fn get_timestamp() -> String {
    let format = format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| {
        log::trace!("Local offset unavailable, falling back to UTC.");
        OffsetDateTime::now_utc()
    });
    now.format(&format).unwrap_or_default()
}
