// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::SeriesStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A time range minute value is outside `[0, 1440)`.
    InvalidTimeRange {
        /// The offending start minute.
        start_minute: u16,
        /// The offending end minute.
        end_minute: u16,
    },
    /// A series status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: SeriesStatus,
        /// The requested status.
        to: SeriesStatus,
    },
    /// A status string could not be parsed.
    InvalidStatus(String),
    /// More than one full-day slot exists for the same day key.
    DuplicateFullDaySlot {
        /// Human-readable day key (weekday name or date).
        day_key: String,
    },
    /// A time-specific slot coexists with a full-day slot for the same day key.
    FullDaySlotConflict {
        /// Human-readable day key (weekday name or date).
        day_key: String,
    },
    /// A full-day slot carries a time range.
    FullDaySlotWithTimeRange {
        /// Human-readable day key (weekday name or date).
        day_key: String,
    },
    /// A holiday window's end date precedes its start date.
    InvalidHolidayWindow {
        /// The window start date.
        start_date: time::Date,
        /// The window end date.
        end_date: time::Date,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeRange {
                start_minute,
                end_minute,
            } => {
                write!(
                    f,
                    "Time range minutes must be in [0, 1440), got start={start_minute}, end={end_minute}"
                )
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(
                    f,
                    "Cannot transition series from {} to {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            Self::InvalidStatus(msg) => write!(f, "Invalid status: {msg}"),
            Self::DuplicateFullDaySlot { day_key } => {
                write!(f, "More than one full-day slot exists for {day_key}")
            }
            Self::FullDaySlotConflict { day_key } => {
                write!(
                    f,
                    "Time-specific slots cannot coexist with a full-day slot for {day_key}"
                )
            }
            Self::FullDaySlotWithTimeRange { day_key } => {
                write!(f, "Full-day slot for {day_key} must not carry a time range")
            }
            Self::InvalidHolidayWindow {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Holiday window end date {end_date} precedes start date {start_date}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
