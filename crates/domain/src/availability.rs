// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability resolution.
//!
//! Determines whether a person is available for a requested time range on a
//! given date from their layered availability records.
//!
//! ## Override rule
//!
//! Exception slots (date-specific) entirely supersede regular slots
//! (weekly-recurring) for their date. Regular slots govern only when no
//! exception exists for the date. Rejected slots never participate;
//! pending slots participate only when the caller opts in.
//!
//! Absence of data is never an error: it yields `available == false` plus
//! advisory warnings.

use crate::time_range::TimeRange;
use crate::types::{AvailabilitySlot, PersonId, SlotScope};
use serde::{Deserialize, Serialize};
use time::Date;

/// Why an availability verdict came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityReason {
    /// A governing full-day slot covers the date.
    FullDayAvailable,
    /// A governing timed slot fully contains the requested range.
    WithinSlot,
    /// Governing timed slots overlap the requested range only partially.
    PartialOverlap,
    /// Governing timed slots exist but none touches the requested range.
    NoOverlap,
    /// No governing slot exists for the date.
    NoSlots,
    /// Only placeholder records govern: the person is explicitly
    /// unavailable for the date.
    ExplicitlyUnavailable,
}

/// Advisory warning tags. Never blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityWarning {
    /// The person is not available for the requested range.
    NotAvailable,
    /// The person has no regular availability configured for the weekday.
    NoRegularAvailability,
}

/// The outcome of resolving one person's availability for one date/range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDecision {
    /// Whether the requested range is fully covered.
    pub available: bool,
    /// The dominant reason for the verdict.
    pub reason: AvailabilityReason,
    /// Governing timed slots that partially overlap the requested range
    /// without containing it. Reported regardless of the verdict.
    pub conflicts: Vec<AvailabilitySlot>,
    /// Advisory warnings.
    pub warnings: Vec<AvailabilityWarning>,
}

/// One person's verdict within a batch resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonAvailability {
    /// The person the verdict applies to.
    pub person_id: PersonId,
    /// Whether the requested range is fully covered.
    pub available: bool,
    /// Advisory warnings for this person.
    pub warnings: Vec<AvailabilityWarning>,
}

/// Resolves whether a person is available for a requested range on a date.
///
/// # Arguments
///
/// * `slots` - The person's availability slots (any scope, any status)
/// * `date` - The date being scheduled
/// * `requested` - The candidate time range
/// * `include_pending` - Whether pending slots participate
///
/// # Returns
///
/// An [`AvailabilityDecision`]; absence of data yields
/// `available == false` with warnings, never an error.
#[must_use]
pub fn resolve_availability(
    slots: &[AvailabilitySlot],
    date: Date,
    requested: TimeRange,
    include_pending: bool,
) -> AvailabilityDecision {
    let participating: Vec<&AvailabilitySlot> = slots
        .iter()
        .filter(|slot| slot.participates(include_pending) && slot.scope.applies_to(date))
        .collect();

    let exceptions: Vec<&AvailabilitySlot> = participating
        .iter()
        .copied()
        .filter(|slot| matches!(slot.scope, SlotScope::Exception(_)))
        .collect();

    let has_regular: bool = participating
        .iter()
        .any(|slot| matches!(slot.scope, SlotScope::Regular(_)));

    // Override rule: an exception for the date supersedes regulars entirely
    let governing: Vec<&AvailabilitySlot> = if exceptions.is_empty() {
        participating
    } else {
        exceptions
    };

    let conflicts: Vec<AvailabilitySlot> = governing
        .iter()
        .filter(|slot| {
            slot.time_range
                .is_some_and(|range| range.overlaps(&requested) && !range.contains(&requested))
        })
        .map(|slot| (*slot).clone())
        .collect();

    let reason: AvailabilityReason = if governing.is_empty() {
        AvailabilityReason::NoSlots
    } else if governing.iter().any(|slot| slot.full_day) {
        AvailabilityReason::FullDayAvailable
    } else if governing
        .iter()
        .any(|slot| slot.time_range.is_some_and(|range| range.contains(&requested)))
    {
        AvailabilityReason::WithinSlot
    } else if governing.iter().all(|slot| slot.time_range.is_none()) {
        AvailabilityReason::ExplicitlyUnavailable
    } else if conflicts.is_empty() {
        AvailabilityReason::NoOverlap
    } else {
        AvailabilityReason::PartialOverlap
    };

    let available: bool = matches!(
        reason,
        AvailabilityReason::FullDayAvailable | AvailabilityReason::WithinSlot
    );

    let mut warnings: Vec<AvailabilityWarning> = Vec::new();
    if !available {
        warnings.push(AvailabilityWarning::NotAvailable);
    }
    if !has_regular {
        warnings.push(AvailabilityWarning::NoRegularAvailability);
    }

    AvailabilityDecision {
        available,
        reason,
        conflicts,
        warnings,
    }
}

/// Resolves availability for several persons against one shared date/range.
///
/// Each person's decision is computed independently from their own slot
/// set; no state is shared across iterations.
///
/// # Arguments
///
/// * `persons` - Pairs of person id and that person's slots
/// * `date` - The date being scheduled
/// * `requested` - The candidate time range
/// * `include_pending` - Whether pending slots participate
#[must_use]
pub fn resolve_availability_batch(
    persons: &[(PersonId, Vec<AvailabilitySlot>)],
    date: Date,
    requested: TimeRange,
    include_pending: bool,
) -> Vec<PersonAvailability> {
    persons
        .iter()
        .map(|(person_id, slots)| {
            let decision: AvailabilityDecision =
                resolve_availability(slots, date, requested, include_pending);
            PersonAvailability {
                person_id: person_id.clone(),
                available: decision.available,
                warnings: decision.warnings,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::SlotStatus;
    use time::{Month, Weekday};

    fn monday() -> Date {
        // 2026-03-02 is a Monday
        Date::from_calendar_date(2026, Month::March, 2).unwrap()
    }

    fn range(start: u16, end: u16) -> TimeRange {
        TimeRange::new(start, end).unwrap()
    }

    fn regular_slot(weekday: Weekday, time_range: Option<TimeRange>) -> AvailabilitySlot {
        AvailabilitySlot {
            slot_id: None,
            person_id: PersonId::new("p1"),
            scope: SlotScope::Regular(weekday),
            full_day: false,
            time_range,
            status: SlotStatus::Approved,
        }
    }

    fn exception_slot(date: Date, time_range: Option<TimeRange>) -> AvailabilitySlot {
        AvailabilitySlot {
            slot_id: None,
            person_id: PersonId::new("p1"),
            scope: SlotScope::Exception(date),
            full_day: false,
            time_range,
            status: SlotStatus::Approved,
        }
    }

    #[test]
    fn test_full_day_regular_grants_any_range() {
        let mut slot: AvailabilitySlot = regular_slot(Weekday::Monday, None);
        slot.full_day = true;
        let decision: AvailabilityDecision =
            resolve_availability(&[slot], monday(), range(540, 600), false);
        assert!(decision.available);
        assert_eq!(decision.reason, AvailabilityReason::FullDayAvailable);
        assert!(decision.warnings.is_empty());
    }

    #[test]
    fn test_containment_grants_availability() {
        let slots: Vec<AvailabilitySlot> =
            vec![regular_slot(Weekday::Monday, Some(range(480, 720)))];
        let decision: AvailabilityDecision =
            resolve_availability(&slots, monday(), range(540, 600), false);
        assert!(decision.available);
        assert_eq!(decision.reason, AvailabilityReason::WithinSlot);
        assert!(decision.conflicts.is_empty());
    }

    #[test]
    fn test_partial_overlap_reports_conflict() {
        let slots: Vec<AvailabilitySlot> =
            vec![regular_slot(Weekday::Monday, Some(range(540, 570)))];
        let decision: AvailabilityDecision =
            resolve_availability(&slots, monday(), range(540, 600), false);
        assert!(!decision.available);
        assert_eq!(decision.reason, AvailabilityReason::PartialOverlap);
        assert_eq!(decision.conflicts.len(), 1);
        assert!(decision.warnings.contains(&AvailabilityWarning::NotAvailable));
    }

    #[test]
    fn test_exception_supersedes_regular() {
        // Regular Monday slot would grant; exception for the date denies
        let slots: Vec<AvailabilitySlot> = vec![
            regular_slot(Weekday::Monday, Some(range(480, 720))),
            exception_slot(monday(), Some(range(840, 900))),
        ];
        let decision: AvailabilityDecision =
            resolve_availability(&slots, monday(), range(540, 600), false);
        assert!(!decision.available);
        assert_eq!(decision.reason, AvailabilityReason::NoOverlap);

        // The same regular slot governs a Monday without an exception
        let next_monday: Date = Date::from_calendar_date(2026, Month::March, 9).unwrap();
        let decision: AvailabilityDecision =
            resolve_availability(&slots, next_monday, range(540, 600), false);
        assert!(decision.available);
    }

    #[test]
    fn test_exception_grants_where_regular_denies() {
        let slots: Vec<AvailabilitySlot> = vec![
            regular_slot(Weekday::Monday, Some(range(840, 900))),
            exception_slot(monday(), Some(range(480, 720))),
        ];
        let decision: AvailabilityDecision =
            resolve_availability(&slots, monday(), range(540, 600), false);
        assert!(decision.available);
        assert_eq!(decision.reason, AvailabilityReason::WithinSlot);
    }

    #[test]
    fn test_placeholder_exception_is_explicitly_unavailable() {
        let slots: Vec<AvailabilitySlot> = vec![
            regular_slot(Weekday::Monday, Some(range(480, 720))),
            exception_slot(monday(), None),
        ];
        let decision: AvailabilityDecision =
            resolve_availability(&slots, monday(), range(540, 600), false);
        assert!(!decision.available);
        assert_eq!(decision.reason, AvailabilityReason::ExplicitlyUnavailable);
    }

    #[test]
    fn test_no_slots_yields_warnings_not_errors() {
        let decision: AvailabilityDecision =
            resolve_availability(&[], monday(), range(540, 600), false);
        assert!(!decision.available);
        assert_eq!(decision.reason, AvailabilityReason::NoSlots);
        assert!(decision.warnings.contains(&AvailabilityWarning::NotAvailable));
        assert!(
            decision
                .warnings
                .contains(&AvailabilityWarning::NoRegularAvailability)
        );
    }

    #[test]
    fn test_rejected_slots_never_participate() {
        let mut slot: AvailabilitySlot = regular_slot(Weekday::Monday, Some(range(480, 720)));
        slot.status = SlotStatus::Rejected;
        let decision: AvailabilityDecision =
            resolve_availability(&[slot], monday(), range(540, 600), true);
        assert!(!decision.available);
        assert_eq!(decision.reason, AvailabilityReason::NoSlots);
    }

    #[test]
    fn test_pending_slots_opt_in() {
        let mut slot: AvailabilitySlot = regular_slot(Weekday::Monday, Some(range(480, 720)));
        slot.status = SlotStatus::Pending;
        let excluded: AvailabilityDecision =
            resolve_availability(std::slice::from_ref(&slot), monday(), range(540, 600), false);
        assert!(!excluded.available);
        let included: AvailabilityDecision =
            resolve_availability(&[slot], monday(), range(540, 600), true);
        assert!(included.available);
    }

    #[test]
    fn test_wrong_weekday_slot_ignored() {
        let slots: Vec<AvailabilitySlot> =
            vec![regular_slot(Weekday::Tuesday, Some(range(480, 720)))];
        let decision: AvailabilityDecision =
            resolve_availability(&slots, monday(), range(540, 600), false);
        assert_eq!(decision.reason, AvailabilityReason::NoSlots);
    }

    #[test]
    fn test_batch_is_independent_per_person() {
        let available_person: (PersonId, Vec<AvailabilitySlot>) = (
            PersonId::new("p1"),
            vec![regular_slot(Weekday::Monday, Some(range(480, 720)))],
        );
        let unavailable_person: (PersonId, Vec<AvailabilitySlot>) =
            (PersonId::new("p2"), vec![]);

        let results: Vec<PersonAvailability> = resolve_availability_batch(
            &[available_person, unavailable_person],
            monday(),
            range(540, 600),
            false,
        );

        assert_eq!(results.len(), 2);
        assert!(results[0].available);
        assert!(results[0].warnings.is_empty());
        assert!(!results[1].available);
        assert_eq!(results[1].warnings.len(), 2);
    }
}
