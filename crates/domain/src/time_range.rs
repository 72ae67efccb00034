// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-open minute-of-day interval arithmetic.
//!
//! All scheduling decisions reduce to overlap and containment checks over
//! `TimeRange` values. Ranges are half-open (`[start, end)`): two ranges
//! that merely touch at a boundary do not overlap.
//!
//! ## Midnight crossing
//!
//! A range whose `end_minute` is less than or equal to its `start_minute`
//! crosses midnight and wraps into the next day. Crossing ranges are
//! decomposed into at most two non-wrapping segments within `[0, 1440)`
//! before any comparison.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A half-open time-of-day range in minutes since midnight.
///
/// `end_minute <= start_minute` means the range crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start minute, in `[0, 1440)`.
    start_minute: u16,
    /// End minute (exclusive), in `[0, 1440)`.
    end_minute: u16,
}

impl TimeRange {
    /// Creates a new `TimeRange`.
    ///
    /// # Arguments
    ///
    /// * `start_minute` - Start minute since midnight
    /// * `end_minute` - End minute since midnight (exclusive)
    ///
    /// # Returns
    ///
    /// * `Ok(TimeRange)` if both minutes are in `[0, 1440)`
    /// * `Err(DomainError::InvalidTimeRange)` otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if either minute value is 1440 or greater.
    pub const fn new(start_minute: u16, end_minute: u16) -> Result<Self, DomainError> {
        if start_minute < MINUTES_PER_DAY && end_minute < MINUTES_PER_DAY {
            Ok(Self {
                start_minute,
                end_minute,
            })
        } else {
            Err(DomainError::InvalidTimeRange {
                start_minute,
                end_minute,
            })
        }
    }

    /// Creates a `TimeRange` from wall-clock times.
    ///
    /// Seconds are discarded; callers exchanging `HH:mm` wire values parse
    /// them into `time::Time` first.
    #[must_use]
    pub fn from_times(start: time::Time, end: time::Time) -> Self {
        Self {
            start_minute: u16::from(start.hour()) * 60 + u16::from(start.minute()),
            end_minute: u16::from(end.hour()) * 60 + u16::from(end.minute()),
        }
    }

    /// Returns the start minute.
    #[must_use]
    pub const fn start_minute(&self) -> u16 {
        self.start_minute
    }

    /// Returns the end minute (exclusive).
    #[must_use]
    pub const fn end_minute(&self) -> u16 {
        self.end_minute
    }

    /// Returns whether this range crosses midnight.
    #[must_use]
    pub const fn crosses_midnight(&self) -> bool {
        self.end_minute <= self.start_minute
    }

    /// Returns the duration of the range in minutes.
    ///
    /// Crossing ranges wrap through midnight, so a `23:00-01:00` range is
    /// 120 minutes. A range whose end equals its start spans the full day.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        if self.crosses_midnight() {
            MINUTES_PER_DAY - self.start_minute + self.end_minute
        } else {
            self.end_minute - self.start_minute
        }
    }

    /// Decomposes the range into non-wrapping half-open segments.
    ///
    /// A non-crossing range yields itself; a crossing range `{s, e}` yields
    /// `[s, 1440)` plus `[0, e)`, the second omitted when `e == 0`.
    #[must_use]
    pub const fn segments(&self) -> ((u16, u16), Option<(u16, u16)>) {
        if self.crosses_midnight() {
            let tail = if self.end_minute > 0 {
                Some((0, self.end_minute))
            } else {
                None
            };
            ((self.start_minute, MINUTES_PER_DAY), tail)
        } else {
            ((self.start_minute, self.end_minute), None)
        }
    }

    /// Reports whether two ranges overlap.
    ///
    /// Half-open semantics: ranges that only touch at a boundary do not
    /// overlap. Either range may cross midnight. Symmetric and O(1).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        for (a_start, a_end) in segment_iter(self) {
            for (b_start, b_end) in segment_iter(other) {
                if a_start < b_end && a_end > b_start {
                    return true;
                }
            }
        }
        false
    }

    /// Reports whether `other` lies entirely inside this range.
    ///
    /// Every segment of `other` must be covered by some segment of `self`.
    /// For two non-crossing ranges this is the plain comparison
    /// `self.start <= other.start && other.end <= self.end`; the segment
    /// formulation extends the same meaning to crossing ranges.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        segment_iter(other).iter().all(|&(o_start, o_end)| {
            segment_iter(self)
                .iter()
                .any(|&(s_start, s_end)| s_start <= o_start && o_end <= s_end)
        })
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_minute / 60,
            self.start_minute % 60,
            self.end_minute / 60,
            self.end_minute % 60
        )
    }
}

/// Collects a range's segments into a small vector for pairwise comparison.
fn segment_iter(range: &TimeRange) -> Vec<(u16, u16)> {
    let (first, second) = range.segments();
    let mut segments: Vec<(u16, u16)> = Vec::with_capacity(2);
    segments.push(first);
    if let Some(tail) = second {
        segments.push(tail);
    }
    segments
}
