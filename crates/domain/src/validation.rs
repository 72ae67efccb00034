// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{AvailabilitySlot, SlotScope, SlotStatus};
use std::collections::HashMap;

/// Stable grouping key for a slot's day: weekday ordinal for regular
/// slots, julian day for exception slots.
fn day_group(scope: &SlotScope) -> (u8, i64) {
    match scope {
        SlotScope::Regular(weekday) => (0, i64::from(weekday.number_days_from_monday())),
        SlotScope::Exception(date) => (1, i64::from(date.to_julian_day())),
    }
}

/// Validates the full-day invariant over a person's slot set.
///
/// Among non-rejected slots sharing a day key:
/// - at most one full-day slot may exist,
/// - time-specific slots cannot coexist with a full-day slot,
/// - a full-day slot must not carry a time range.
///
/// Used by the administrative overwrite path before new slots are
/// persisted. Pure, deterministic, no side effects.
///
/// # Arguments
///
/// * `slots` - The complete slot set for one person
///
/// # Returns
///
/// * `Ok(())` if the invariant holds
/// * `Err(DomainError)` naming the offending day key otherwise
///
/// # Errors
///
/// Returns an error if a day key carries duplicate full-day slots, mixes
/// full-day and time-specific slots, or a full-day slot carries a range.
pub fn validate_slot_set(slots: &[AvailabilitySlot]) -> Result<(), DomainError> {
    // (full-day count, timed/placeholder count) per day key
    let mut groups: HashMap<(u8, i64), (usize, usize)> = HashMap::new();

    for slot in slots {
        if slot.status == SlotStatus::Rejected {
            continue;
        }
        if slot.full_day && slot.time_range.is_some() {
            return Err(DomainError::FullDaySlotWithTimeRange {
                day_key: slot.scope.day_key(),
            });
        }
        let entry: &mut (usize, usize) = groups.entry(day_group(&slot.scope)).or_insert((0, 0));
        if slot.full_day {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    for slot in slots {
        if slot.status == SlotStatus::Rejected {
            continue;
        }
        if let Some(&(full_day_count, timed_count)) = groups.get(&day_group(&slot.scope)) {
            if full_day_count > 1 {
                return Err(DomainError::DuplicateFullDaySlot {
                    day_key: slot.scope.day_key(),
                });
            }
            if full_day_count == 1 && timed_count > 0 {
                return Err(DomainError::FullDaySlotConflict {
                    day_key: slot.scope.day_key(),
                });
            }
        }
    }

    Ok(())
}
