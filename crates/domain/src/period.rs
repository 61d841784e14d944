// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Iso8601;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Stored form of a bare date. Zero-padded calendar date, so the
/// lexicographic order of stored strings is chronological order.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// An accounting period, typically one calendar month.
///
/// Bounds are inclusive dates. A period is immutable once attached to a
/// commission and forms part of the commission's logical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    start: Date,
    end: Date,
}

impl Period {
    /// Creates a new period.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPeriod` if `start` is not strictly
    /// before `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start date.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the inclusive end date.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Parses a date from its ISO 8601 stored string form.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid
/// ISO 8601 date.
pub fn parse_date(s: &str) -> Result<Date, DomainError> {
    Date::parse(s, &Iso8601::DEFAULT).map_err(|e| DomainError::DateParseError {
        date_string: s.to_string(),
        error: e.to_string(),
    })
}

/// Parses a timestamp from its ISO 8601 stored string form.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid
/// ISO 8601 timestamp.
pub fn parse_datetime(s: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(s, &Iso8601::DEFAULT).map_err(|e| DomainError::DateParseError {
        date_string: s.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as a calendar-date string for persistence.
///
/// A bare date carries no time or offset components, so it uses the
/// explicit date-only format rather than the full ISO 8601 description.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Formats a timestamp as an ISO 8601 string for persistence.
#[must_use]
pub fn format_datetime(datetime: OffsetDateTime) -> String {
    datetime
        .format(&Iso8601::DEFAULT)
        .unwrap_or_else(|_| datetime.to_string())
}
