// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Series blueprint patching.
//!
//! A [`SeriesPatch`] carries caller intent as data: only supplied fields
//! are considered, and only supplied-and-different fields are written.
//! Applying a patch recomputes derived fields (duration, generation
//! watermark) and records exactly which fields changed so the propagation
//! step can build its payload.

use crate::error::CoreError;
use juku_sched_domain::{
    BoothId, ClassSeries, ClassTypeId, DomainError, SeriesStatus, StudentId, SubjectId, TeacherId,
    TimeRange,
};
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// A partial update to a series blueprint.
///
/// `None` means "leave the field alone". The clearable fields (`end_date`,
/// `notes`) nest a second `Option` so that `Some(None)` clears while
/// `None` leaves alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesPatch {
    /// New teacher.
    pub teacher_id: Option<TeacherId>,
    /// New student.
    pub student_id: Option<StudentId>,
    /// New subject.
    pub subject_id: Option<SubjectId>,
    /// New class type.
    pub class_type_id: Option<ClassTypeId>,
    /// New booth.
    pub booth_id: Option<BoothId>,
    /// New display name.
    pub name: Option<String>,
    /// New first date of the generation window.
    pub start_date: Option<Date>,
    /// New last date of the generation window; `Some(None)` clears it.
    pub end_date: Option<Option<Date>>,
    /// New start minute of the session time range.
    pub start_minute: Option<u16>,
    /// New end minute of the session time range.
    pub end_minute: Option<u16>,
    /// Explicit session length in minutes; suppresses the derived
    /// recompute.
    pub duration_minutes: Option<u16>,
    /// New recurrence weekdays.
    pub days_of_week: Option<Vec<Weekday>>,
    /// New lifecycle status; validated against the transition table.
    pub status: Option<SeriesStatus>,
    /// New notes; `Some(None)` clears them.
    pub notes: Option<Option<String>>,
}

/// Which blueprint fields a patch actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ChangedFields {
    /// Teacher changed.
    pub teacher: bool,
    /// Student changed.
    pub student: bool,
    /// Subject changed.
    pub subject: bool,
    /// Class type changed.
    pub class_type: bool,
    /// Booth changed.
    pub booth: bool,
    /// Display name changed.
    pub name: bool,
    /// Window start date changed.
    pub start_date: bool,
    /// Window end date changed (set or cleared).
    pub end_date: bool,
    /// Time range start changed.
    pub start_time: bool,
    /// Time range end changed.
    pub end_time: bool,
    /// Duration changed (explicitly or by recompute).
    pub duration: bool,
    /// Recurrence weekdays changed.
    pub days_of_week: bool,
    /// Lifecycle status changed.
    pub status: bool,
    /// Notes changed (set or cleared).
    pub notes: bool,
}

impl ChangedFields {
    /// Returns whether any field changed.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.teacher
            || self.student
            || self.subject
            || self.class_type
            || self.booth
            || self.name
            || self.start_date
            || self.end_date
            || self.start_time
            || self.end_time
            || self.duration
            || self.days_of_week
            || self.status
            || self.notes
    }
}

/// The result of applying a patch to a series blueprint.
///
/// The caller persists `updated` and feeds the outcome to the propagation
/// and branch-sync planners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOutcome {
    /// The blueprint with the patch applied.
    pub updated: ClassSeries,
    /// Exactly which fields changed.
    pub changed: ChangedFields,
    /// Whether `last_generated_through` was clamped down to a shortened
    /// end date.
    pub watermark_clamped: bool,
    /// Whether duration was recomputed from the time boundaries rather
    /// than explicitly supplied.
    pub duration_recomputed: bool,
}

/// Applies a patch to a series blueprint.
///
/// Untouched fields are never rewritten. Derived fields follow:
///
/// - **Duration**: when a time boundary changes and `duration_minutes` is
///   not supplied, duration is recomputed as `end - start`; a non-positive
///   difference (midnight-crossing boundaries) silently skips the
///   recompute.
/// - **Watermark**: when the end date shrinks below
///   `last_generated_through`, the watermark is clamped down to the new
///   end date so generation never runs past the shortened window. An end
///   date equal to the watermark does not clamp.
///
/// # Arguments
///
/// * `series` - The pre-edit blueprint
/// * `patch` - The partial update
///
/// # Returns
///
/// * `Ok(PatchOutcome)` with the updated blueprint and change record
/// * `Err(CoreError)` if the patch violates a domain rule
///
/// # Errors
///
/// Returns an error if the patched time boundaries are out of range or the
/// status change is not a permitted transition.
#[allow(clippy::too_many_lines)]
pub fn apply_patch(series: &ClassSeries, patch: &SeriesPatch) -> Result<PatchOutcome, CoreError> {
    let mut updated: ClassSeries = series.clone();
    let mut changed: ChangedFields = ChangedFields::default();

    if let Some(teacher_id) = &patch.teacher_id {
        if *teacher_id != updated.teacher_id {
            updated.teacher_id = teacher_id.clone();
            changed.teacher = true;
        }
    }
    if let Some(student_id) = &patch.student_id {
        if *student_id != updated.student_id {
            updated.student_id = student_id.clone();
            changed.student = true;
        }
    }
    if let Some(subject_id) = &patch.subject_id {
        if *subject_id != updated.subject_id {
            updated.subject_id = subject_id.clone();
            changed.subject = true;
        }
    }
    if let Some(class_type_id) = &patch.class_type_id {
        if *class_type_id != updated.class_type_id {
            updated.class_type_id = class_type_id.clone();
            changed.class_type = true;
        }
    }
    if let Some(booth_id) = &patch.booth_id {
        if *booth_id != updated.booth_id {
            updated.booth_id = booth_id.clone();
            changed.booth = true;
        }
    }
    if let Some(name) = &patch.name {
        if *name != updated.name {
            updated.name = name.clone();
            changed.name = true;
        }
    }
    if let Some(start_date) = patch.start_date {
        if start_date != updated.start_date {
            updated.start_date = start_date;
            changed.start_date = true;
        }
    }
    if let Some(end_date) = patch.end_date {
        if end_date != updated.end_date {
            updated.end_date = end_date;
            changed.end_date = true;
        }
    }
    if let Some(days_of_week) = &patch.days_of_week {
        if *days_of_week != updated.days_of_week {
            updated.days_of_week = days_of_week.clone();
            changed.days_of_week = true;
        }
    }
    if let Some(notes) = &patch.notes {
        if *notes != updated.notes {
            updated.notes = notes.clone();
            changed.notes = true;
        }
    }

    if let Some(status) = patch.status {
        if status != updated.status {
            if !updated.status.can_transition_to(status) {
                return Err(CoreError::DomainViolation(
                    DomainError::InvalidStatusTransition {
                        from: updated.status,
                        to: status,
                    },
                ));
            }
            updated.status = status;
            changed.status = true;
        }
    }

    let new_start: u16 = patch
        .start_minute
        .unwrap_or_else(|| updated.time_range.start_minute());
    let new_end: u16 = patch
        .end_minute
        .unwrap_or_else(|| updated.time_range.end_minute());
    if new_start != updated.time_range.start_minute()
        || new_end != updated.time_range.end_minute()
    {
        changed.start_time = new_start != updated.time_range.start_minute();
        changed.end_time = new_end != updated.time_range.end_minute();
        updated.time_range = TimeRange::new(new_start, new_end)?;
    }

    let mut duration_recomputed: bool = false;
    if let Some(duration_minutes) = patch.duration_minutes {
        if duration_minutes != updated.duration_minutes {
            updated.duration_minutes = duration_minutes;
            changed.duration = true;
        }
    } else if changed.start_time || changed.end_time {
        if new_end > new_start {
            let minutes: u16 = new_end - new_start;
            duration_recomputed = true;
            if minutes != updated.duration_minutes {
                updated.duration_minutes = minutes;
                changed.duration = true;
            }
        } else {
            tracing::debug!(
                start_minute = new_start,
                end_minute = new_end,
                "skipping duration recompute for non-positive boundary difference"
            );
        }
    }

    let mut watermark_clamped: bool = false;
    if changed.end_date {
        if let (Some(end_date), Some(watermark)) = (updated.end_date, updated.last_generated_through)
        {
            if watermark > end_date {
                tracing::debug!(
                    %watermark,
                    new_end_date = %end_date,
                    "clamping generation watermark to shortened end date"
                );
                updated.last_generated_through = Some(end_date);
                watermark_clamped = true;
            }
        }
    }

    Ok(PatchOutcome {
        updated,
        changed,
        watermark_clamped,
        duration_recomputed,
    })
}
