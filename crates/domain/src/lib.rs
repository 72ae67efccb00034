// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod conflict;
mod error;
mod time_range;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{
    AvailabilityDecision, AvailabilityReason, AvailabilityWarning, PersonAvailability,
    resolve_availability, resolve_availability_batch,
};
pub use conflict::{
    CandidateBooth, CandidatePerson, CompatibilityQuery, CompatibilityResult, ConflictTag,
    PlacementDecision, ProposedPlacement, StudentConflict, check_placement, find_compatibility,
};
pub use error::DomainError;
pub use time_range::{MINUTES_PER_DAY, TimeRange};
pub use types::{
    AvailabilitySlot, BoothId, BranchId, ClassBooking, ClassSeries, ClassTypeId, HolidayWindow,
    PersonId, SeriesId, SeriesStatus, SlotScope, SlotStatus, StudentId, SubjectId, TeacherId,
};
pub use validation::validate_slot_set;
