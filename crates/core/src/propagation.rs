// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Propagation of blueprint edits to already-generated sessions.
//!
//! A fixed allow-list of fields is eligible to propagate: teacher,
//! student, subject, class type, booth, time boundaries, duration, and
//! notes. Structural fields (dates, recurrence weekdays, status, name)
//! never propagate; they only affect future generation.
//!
//! Propagation is a best-effort side call made by the caller after the
//! blueprint write has committed. Its failure is captured in a
//! [`PropagationReport`] and surfaced, never escalated, and never rolls
//! back the blueprint mutation.

use crate::patch::PatchOutcome;
use juku_sched_domain::{BoothId, ClassTypeId, SeriesId, StudentId, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};
use time::Date;

/// Caller choices for the propagation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationOptions {
    /// Whether to propagate at all; the caller may opt out.
    pub propagate: bool,
    /// When set, only sessions on or after this date receive the change
    /// ("from a specific session forward"); otherwise the whole future.
    pub from_date: Option<Date>,
}

impl Default for PropagationOptions {
    fn default() -> Self {
        Self {
            propagate: true,
            from_date: None,
        }
    }
}

/// Sparse payload of changed, propagatable fields for a series' sessions.
///
/// Only fields that actually changed are present; unchanged fields are
/// excluded so the session update never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPropagation {
    /// The series whose sessions receive the change.
    pub series_id: Option<SeriesId>,
    /// Scope boundary: sessions on or after this date only.
    pub from_date: Option<Date>,
    /// New teacher, if changed.
    pub teacher_id: Option<TeacherId>,
    /// New student, if changed.
    pub student_id: Option<StudentId>,
    /// New subject, if changed.
    pub subject_id: Option<SubjectId>,
    /// New class type, if changed.
    pub class_type_id: Option<ClassTypeId>,
    /// New booth, if changed.
    pub booth_id: Option<BoothId>,
    /// New start minute, if changed.
    pub start_minute: Option<u16>,
    /// New end minute, if changed.
    pub end_minute: Option<u16>,
    /// New duration, if changed.
    pub duration_minutes: Option<u16>,
    /// New notes, if changed; `Some(None)` clears them.
    pub notes: Option<Option<String>>,
}

/// Soft outcome of the propagation side call.
///
/// A failure here never invalidates the committed blueprint write; the
/// caller surfaces it alongside the successful primary result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationReport {
    /// Whether a propagation call was attempted.
    pub attempted: bool,
    /// Whether the attempted call succeeded.
    pub succeeded: bool,
    /// Failure detail, when the call failed.
    pub detail: Option<String>,
}

impl PropagationReport {
    /// No propagation was planned or attempted.
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            attempted: false,
            succeeded: false,
            detail: None,
        }
    }

    /// The side call succeeded.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            attempted: true,
            succeeded: true,
            detail: None,
        }
    }

    /// The side call failed; the primary write stands.
    #[must_use]
    pub const fn failed(detail: String) -> Self {
        Self {
            attempted: true,
            succeeded: false,
            detail: Some(detail),
        }
    }
}

/// Decides whether and what to propagate after a patch.
///
/// # Arguments
///
/// * `outcome` - The applied patch outcome
/// * `options` - The caller's propagation choices
///
/// # Returns
///
/// * `Some(SessionPropagation)` carrying only the changed allow-listed
///   fields
/// * `None` when the caller opted out or no propagatable field changed
#[must_use]
pub fn plan_propagation(
    outcome: &PatchOutcome,
    options: &PropagationOptions,
) -> Option<SessionPropagation> {
    if !options.propagate {
        return None;
    }

    let changed = outcome.changed;
    let updated = &outcome.updated;

    let payload: SessionPropagation = SessionPropagation {
        series_id: updated.series_id.clone(),
        from_date: options.from_date,
        teacher_id: changed.teacher.then(|| updated.teacher_id.clone()),
        student_id: changed.student.then(|| updated.student_id.clone()),
        subject_id: changed.subject.then(|| updated.subject_id.clone()),
        class_type_id: changed.class_type.then(|| updated.class_type_id.clone()),
        booth_id: changed.booth.then(|| updated.booth_id.clone()),
        start_minute: changed.start_time.then(|| updated.time_range.start_minute()),
        end_minute: changed.end_time.then(|| updated.time_range.end_minute()),
        duration_minutes: changed.duration.then_some(updated.duration_minutes),
        notes: changed.notes.then(|| updated.notes.clone()),
    };

    let has_changes: bool = payload.teacher_id.is_some()
        || payload.student_id.is_some()
        || payload.subject_id.is_some()
        || payload.class_type_id.is_some()
        || payload.booth_id.is_some()
        || payload.start_minute.is_some()
        || payload.end_minute.is_some()
        || payload.duration_minutes.is_some()
        || payload.notes.is_some();

    if has_changes {
        tracing::debug!(from_date = ?options.from_date, "planned session propagation");
        Some(payload)
    } else {
        None
    }
}
