// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date formatting.

use chrono::{NaiveDate, Utc};

/// Today's calendar date in UTC.
///
/// The backend stores workout dates as plain `YYYY-MM-DD` strings and the
/// reference client matches them against the UTC calendar day.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a date as `YYYY-MM-DD` for matching against stored workout dates.
pub fn iso_date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Short weekday label ("Mon", "Tue", ...) for chart axes.
pub fn day_label(day: NaiveDate) -> String {
    day.format("%a").to_string()
}
