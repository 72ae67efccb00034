// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling conflict detection for proposed class placements.
//!
//! Given a proposed placement (weekday or concrete date, time range,
//! teacher, booth, student set), finds all colliding existing bookings per
//! actor dimension plus any holiday overlap. Read-only; the caller supplies
//! the candidate booking and holiday sets, already scoped to the relevant
//! branch.
//!
//! ## Holiday semantics
//!
//! With a concrete proposed date, holiday conflicts use precise date
//! intersection (recurring windows mapped onto the probe year). With only a
//! day-of-week (blueprint placement, no date yet), the check is coarse:
//! any recurring window, or any concrete window bracketing `today`,
//! counts.

use crate::availability::resolve_availability;
use crate::time_range::TimeRange;
use crate::types::{
    AvailabilitySlot, BoothId, ClassBooking, HolidayWindow, PersonId, SlotScope, StudentId,
    TeacherId,
};
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// A proposed class placement to be checked for conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedPlacement {
    /// The weekday the class occupies.
    pub day_of_week: Weekday,
    /// The concrete date, when placing a one-off session.
    pub date: Option<Date>,
    /// The candidate time range.
    pub time_range: TimeRange,
    /// The teacher delivering the class.
    pub teacher_id: TeacherId,
    /// The booth the class takes place in.
    pub booth_id: BoothId,
    /// The enrolled students.
    pub student_ids: Vec<StudentId>,
}

/// Conflict tags, one per actor dimension plus holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictTag {
    /// The teacher is double-booked.
    TeacherConflict,
    /// The booth is double-booked.
    BoothConflict,
    /// At least one student is double-booked.
    StudentConflict,
    /// The placement overlaps a holiday window.
    HolidayConflict,
}

impl ConflictTag {
    /// Converts this tag to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TeacherConflict => "TEACHER_CONFLICT",
            Self::BoothConflict => "BOOTH_CONFLICT",
            Self::StudentConflict => "STUDENT_CONFLICT",
            Self::HolidayConflict => "HOLIDAY_CONFLICT",
        }
    }
}

/// Bookings colliding with one student of the proposed placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentConflict {
    /// The double-booked student.
    pub student_id: StudentId,
    /// The colliding bookings.
    pub bookings: Vec<ClassBooking>,
}

/// The outcome of a placement conflict check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementDecision {
    /// Logical OR of all four dimensions.
    pub has_conflicts: bool,
    /// Bookings colliding on the teacher.
    pub teacher_conflicts: Vec<ClassBooking>,
    /// Bookings colliding on the booth.
    pub booth_conflicts: Vec<ClassBooking>,
    /// Per-student colliding bookings.
    pub student_conflicts: Vec<StudentConflict>,
    /// Holiday windows overlapping the placement.
    pub holiday_conflicts: Vec<HolidayWindow>,
    /// One tag per conflicting dimension.
    pub warnings: Vec<ConflictTag>,
}

/// Checks a proposed placement against existing bookings and holidays.
///
/// # Arguments
///
/// * `proposed` - The candidate placement
/// * `existing` - Existing bookings on the relevant weekday(s)
/// * `holidays` - Holiday windows for the branch
/// * `today` - Anchor date for the coarse holiday check (the engine never
///   reads the clock)
/// * `exclude` - Booking id to skip, used when re-checking an edited row
///   against itself
///
/// # Returns
///
/// A [`PlacementDecision`] aggregating colliding records per dimension.
/// Read-only; no side effects.
#[must_use]
pub fn check_placement(
    proposed: &ProposedPlacement,
    existing: &[ClassBooking],
    holidays: &[HolidayWindow],
    today: Date,
    exclude: Option<i64>,
) -> PlacementDecision {
    let candidates: Vec<&ClassBooking> = existing
        .iter()
        .filter(|booking| {
            booking.day_of_week == proposed.day_of_week
                && (exclude.is_none() || booking.booking_id != exclude)
                && booking.time_range.overlaps(&proposed.time_range)
        })
        .collect();

    let teacher_conflicts: Vec<ClassBooking> = candidates
        .iter()
        .filter(|booking| booking.teacher_id == proposed.teacher_id)
        .map(|booking| (*booking).clone())
        .collect();

    let booth_conflicts: Vec<ClassBooking> = candidates
        .iter()
        .filter(|booking| booking.booth_id == proposed.booth_id)
        .map(|booking| (*booking).clone())
        .collect();

    let student_conflicts: Vec<StudentConflict> = proposed
        .student_ids
        .iter()
        .filter_map(|student_id| {
            let bookings: Vec<ClassBooking> = candidates
                .iter()
                .filter(|booking| booking.student_ids.contains(student_id))
                .map(|booking| (*booking).clone())
                .collect();
            if bookings.is_empty() {
                None
            } else {
                Some(StudentConflict {
                    student_id: student_id.clone(),
                    bookings,
                })
            }
        })
        .collect();

    let holiday_conflicts: Vec<HolidayWindow> = holidays
        .iter()
        .filter(|window| match proposed.date {
            Some(date) => window.contains_date(date),
            None => window.is_recurring || window.contains_date(today),
        })
        .cloned()
        .collect();

    let mut warnings: Vec<ConflictTag> = Vec::new();
    if !teacher_conflicts.is_empty() {
        warnings.push(ConflictTag::TeacherConflict);
    }
    if !booth_conflicts.is_empty() {
        warnings.push(ConflictTag::BoothConflict);
    }
    if !student_conflicts.is_empty() {
        warnings.push(ConflictTag::StudentConflict);
    }
    if !holiday_conflicts.is_empty() {
        warnings.push(ConflictTag::HolidayConflict);
    }

    PlacementDecision {
        has_conflicts: !warnings.is_empty(),
        teacher_conflicts,
        booth_conflicts,
        student_conflicts,
        holiday_conflicts,
        warnings,
    }
}

/// A person candidate for the compatibility search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePerson {
    /// The candidate's identifier.
    pub person_id: PersonId,
    /// The candidate's availability slots.
    pub slots: Vec<AvailabilitySlot>,
    /// The candidate's existing bookings on the relevant weekday(s).
    pub bookings: Vec<ClassBooking>,
}

/// A booth candidate for the compatibility search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateBooth {
    /// The booth's identifier.
    pub booth_id: BoothId,
    /// The booth's existing bookings on the relevant weekday(s).
    pub bookings: Vec<ClassBooking>,
}

/// The slot a compatibility search enumerates candidates for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityQuery {
    /// The weekday of the slot.
    pub day_of_week: Weekday,
    /// The concrete date, when known; enables exception-slot resolution.
    pub date: Option<Date>,
    /// The time range of the slot.
    pub time_range: TimeRange,
}

/// Candidates free at the queried slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// Teachers with no colliding booking and a covering availability
    /// window.
    pub teachers: Vec<PersonId>,
    /// Students with no colliding booking and a covering availability
    /// window.
    pub students: Vec<PersonId>,
    /// Booths with no colliding booking.
    pub booths: Vec<BoothId>,
}

/// Enumerates candidates that are free at a slot.
///
/// The inverse of [`check_placement`]: instead of checking one proposed
/// placement, it keeps every candidate with no overlapping existing
/// booking. Person candidates must additionally have a governing
/// availability window containing the slot range.
#[must_use]
pub fn find_compatibility(
    query: &CompatibilityQuery,
    teachers: &[CandidatePerson],
    students: &[CandidatePerson],
    booths: &[CandidateBooth],
) -> CompatibilityResult {
    CompatibilityResult {
        teachers: free_persons(query, teachers),
        students: free_persons(query, students),
        booths: booths
            .iter()
            .filter(|booth| !has_colliding_booking(query, &booth.bookings))
            .map(|booth| booth.booth_id.clone())
            .collect(),
    }
}

/// Keeps person candidates that are free and within their time windows.
fn free_persons(query: &CompatibilityQuery, candidates: &[CandidatePerson]) -> Vec<PersonId> {
    candidates
        .iter()
        .filter(|person| {
            !has_colliding_booking(query, &person.bookings)
                && person_window_covers(query, &person.slots)
        })
        .map(|person| person.person_id.clone())
        .collect()
}

/// `NOT EXISTS an overlapping booking` for the queried slot.
fn has_colliding_booking(query: &CompatibilityQuery, bookings: &[ClassBooking]) -> bool {
    bookings.iter().any(|booking| {
        booking.day_of_week == query.day_of_week
            && booking.time_range.overlaps(&query.time_range)
    })
}

/// Whether a governing availability window contains the queried range.
///
/// With a concrete date the full resolver runs (exception slots
/// supersede). With only a weekday, approved regular slots for that
/// weekday are consulted directly.
fn person_window_covers(query: &CompatibilityQuery, slots: &[AvailabilitySlot]) -> bool {
    match query.date {
        Some(date) => resolve_availability(slots, date, query.time_range, false).available,
        None => slots.iter().any(|slot| {
            slot.participates(false)
                && matches!(slot.scope, SlotScope::Regular(weekday) if weekday == query.day_of_week)
                && (slot.full_day
                    || slot
                        .time_range
                        .is_some_and(|range| range.contains(&query.time_range)))
        }),
    }
}
