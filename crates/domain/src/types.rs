// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::time_range::TimeRange;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Weekday};

/// Opaque identifier of a person (teacher or student) whose availability is
/// being resolved.
///
/// Whether the person is a teacher or a student is the caller's concern;
/// availability rules are identical for both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId {
    value: String,
}

impl PersonId {
    /// Creates a new `PersonId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Opaque teacher identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeacherId {
    value: String,
}

impl TeacherId {
    /// Creates a new `TeacherId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Opaque student identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId {
    value: String,
}

impl StudentId {
    /// Creates a new `StudentId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Opaque booth (classroom seat) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoothId {
    value: String,
}

impl BoothId {
    /// Creates a new `BoothId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Opaque branch identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchId {
    value: String,
}

impl BranchId {
    /// Creates a new `BranchId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Opaque class-series (blueprint) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesId {
    value: String,
}

impl SeriesId {
    /// Creates a new `SeriesId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Opaque subject identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId {
    value: String,
}

impl SubjectId {
    /// Creates a new `SubjectId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Opaque class-type identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassTypeId {
    value: String,
}

impl ClassTypeId {
    /// Creates a new `ClassTypeId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Approval status of an availability slot.
///
/// Only approved slots (and pending ones, when the caller explicitly
/// includes them) participate in availability and conflict decisions.
/// Rejected slots never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SlotStatus {
    /// Requested by the person, awaiting administrator review.
    #[default]
    Pending,
    /// Approved by an administrator; participates in decisions.
    Approved,
    /// Rejected by an administrator; never participates.
    Rejected,
}

impl SlotStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl FromStr for SlotStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus(s.to_owned())),
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which days an availability slot applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotScope {
    /// Recurs every matching weekday.
    Regular(Weekday),
    /// Applies to one specific calendar date only, superseding regular
    /// slots for that date.
    Exception(Date),
}

impl SlotScope {
    /// Returns whether this scope applies to the given date.
    #[must_use]
    pub fn applies_to(&self, date: Date) -> bool {
        match self {
            Self::Regular(weekday) => *weekday == date.weekday(),
            Self::Exception(exception_date) => *exception_date == date,
        }
    }

    /// Returns a human-readable day key (weekday name or date) for
    /// diagnostics.
    #[must_use]
    pub fn day_key(&self) -> String {
        match self {
            Self::Regular(weekday) => format!("{weekday}"),
            Self::Exception(date) => format!("{date}"),
        }
    }
}

/// One row of a person's availability.
///
/// A slot with `full_day == true` covers the whole day and carries no time
/// range. A slot with `full_day == false` and no time range is an explicit
/// "unavailable" placeholder for its day key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Canonical identifier assigned by the persistence layer.
    /// `None` indicates the slot has not been persisted yet.
    pub slot_id: Option<i64>,
    /// The person this slot belongs to.
    pub person_id: PersonId,
    /// Whether the slot recurs weekly or applies to one date.
    pub scope: SlotScope,
    /// Whether the person is available for the entire day.
    pub full_day: bool,
    /// The available window; absent for full-day and placeholder slots.
    pub time_range: Option<TimeRange>,
    /// Approval status.
    pub status: SlotStatus,
}

impl AvailabilitySlot {
    /// Returns whether this slot participates in decisions.
    ///
    /// Approved slots always participate; pending slots only when the
    /// caller opts in; rejected slots never.
    #[must_use]
    pub const fn participates(&self, include_pending: bool) -> bool {
        match self.status {
            SlotStatus::Approved => true,
            SlotStatus::Pending => include_pending,
            SlotStatus::Rejected => false,
        }
    }
}

/// An existing session or blueprint row being checked for overlap against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBooking {
    /// Canonical identifier assigned by the persistence layer.
    pub booking_id: Option<i64>,
    /// The weekday the booking occupies.
    pub day_of_week: Weekday,
    /// The concrete date, when the booking is a generated session.
    pub date: Option<Date>,
    /// The occupied time range.
    pub time_range: TimeRange,
    /// The teacher delivering the class.
    pub teacher_id: TeacherId,
    /// The booth the class takes place in.
    pub booth_id: BoothId,
    /// The enrolled students.
    pub student_ids: Vec<StudentId>,
    /// The owning series, for generated sessions.
    pub series_id: Option<SeriesId>,
}

/// A date range (or recurring annual rule) during which no class should be
/// scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayWindow {
    /// First day of the window.
    pub start_date: Date,
    /// Last day of the window (inclusive).
    pub end_date: Date,
    /// Whether the window recurs every year on the same month/day span.
    pub is_recurring: bool,
}

impl HolidayWindow {
    /// Creates a new `HolidayWindow`.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-recurring window ends before it starts.
    /// Recurring windows may wrap the year boundary (e.g. Dec 28 - Jan 3),
    /// so their month/day ordering is not constrained.
    pub const fn new(
        start_date: Date,
        end_date: Date,
        is_recurring: bool,
    ) -> Result<Self, DomainError> {
        if !is_recurring && end_date.to_julian_day() < start_date.to_julian_day() {
            return Err(DomainError::InvalidHolidayWindow {
                start_date,
                end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
            is_recurring,
        })
    }

    /// Returns whether the window covers the given date.
    ///
    /// Non-recurring windows compare the concrete date span inclusively.
    /// Recurring windows compare month/day pairs, wrapping the year
    /// boundary when the window's end month/day precedes its start.
    #[must_use]
    pub fn contains_date(&self, date: Date) -> bool {
        if self.is_recurring {
            let probe: (u8, u8) = (u8::from(date.month()), date.day());
            let start: (u8, u8) = (u8::from(self.start_date.month()), self.start_date.day());
            let end: (u8, u8) = (u8::from(self.end_date.month()), self.end_date.day());
            if start <= end {
                start <= probe && probe <= end
            } else {
                probe >= start || probe <= end
            }
        } else {
            self.start_date <= date && date <= self.end_date
        }
    }
}

/// Lifecycle status of a class series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeriesStatus {
    /// Sessions are being generated and taught.
    #[default]
    Active,
    /// Generation suspended; may resume.
    Paused,
    /// Terminal. No further sessions will be generated.
    Ended,
}

impl SeriesStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Paused => "Paused",
            Self::Ended => "Ended",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Active ⇄ Paused
    /// - Active → Ended
    /// - Paused → Ended
    ///
    /// Ended is terminal.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Active, Self::Paused)
                | (Self::Paused, Self::Active)
                | (Self::Active | Self::Paused, Self::Ended)
        )
    }
}

impl FromStr for SeriesStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Paused" => Ok(Self::Paused),
            "Ended" => Ok(Self::Ended),
            _ => Err(DomainError::InvalidStatus(s.to_owned())),
        }
    }
}

impl std::fmt::Display for SeriesStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recurring-class blueprint from which individual sessions are generated.
///
/// A branch-sync variant of the same logical series may exist as parallel
/// rows across multiple branches, linked only by the equality key over
/// `{name, start_date, end_date, is_recurring}` rather than a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSeries {
    /// Canonical identifier assigned by the persistence layer.
    /// `None` indicates the row has not been persisted yet.
    pub series_id: Option<SeriesId>,
    /// The branch this row belongs to.
    pub branch_id: BranchId,
    /// The teacher delivering the series.
    pub teacher_id: TeacherId,
    /// The enrolled student.
    pub student_id: StudentId,
    /// The subject taught.
    pub subject_id: SubjectId,
    /// The class type.
    pub class_type_id: ClassTypeId,
    /// The booth sessions are placed in.
    pub booth_id: BoothId,
    /// Display name; part of the branch-sync match key.
    pub name: String,
    /// First date of the generation window.
    pub start_date: Date,
    /// Last date of the generation window; `None` leaves it open-ended.
    pub end_date: Option<Date>,
    /// The session time range.
    pub time_range: TimeRange,
    /// Session length in minutes, derived from the time range unless
    /// explicitly overridden.
    pub duration_minutes: u16,
    /// Weekdays on which sessions recur.
    pub days_of_week: Vec<Weekday>,
    /// Whether the series recurs; part of the branch-sync match key.
    pub is_recurring: bool,
    /// Lifecycle status.
    pub status: SeriesStatus,
    /// The date up to which sessions have already been materialized.
    ///
    /// Invariant: never exceeds `end_date` when an end date is set; the
    /// patch path clamps it down when the end date is shortened.
    pub last_generated_through: Option<Date>,
    /// Free-form notes.
    pub notes: Option<String>,
}
