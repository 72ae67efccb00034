// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_series, date};
use crate::{CoreError, PatchOutcome, SeriesPatch, apply_patch};
use juku_sched_domain::{ClassSeries, DomainError, SeriesStatus, TeacherId};
use time::Month;

#[test]
fn test_empty_patch_changes_nothing() {
    let series: ClassSeries = create_test_series();
    let outcome: PatchOutcome = apply_patch(&series, &SeriesPatch::default()).unwrap();
    assert_eq!(outcome.updated, series);
    assert!(!outcome.changed.any());
    assert!(!outcome.watermark_clamped);
    assert!(!outcome.duration_recomputed);
}

#[test]
fn test_same_value_is_not_a_change() {
    let series: ClassSeries = create_test_series();
    let patch: SeriesPatch = SeriesPatch {
        teacher_id: Some(TeacherId::new("teacher-1")),
        start_minute: Some(540),
        ..SeriesPatch::default()
    };
    let outcome: PatchOutcome = apply_patch(&series, &patch).unwrap();
    assert!(!outcome.changed.any());
}

#[test]
fn test_field_diff_touches_only_supplied_fields() {
    let series: ClassSeries = create_test_series();
    let patch: SeriesPatch = SeriesPatch {
        teacher_id: Some(TeacherId::new("teacher-2")),
        ..SeriesPatch::default()
    };
    let outcome: PatchOutcome = apply_patch(&series, &patch).unwrap();
    assert!(outcome.changed.teacher);
    assert!(!outcome.changed.booth);
    assert_eq!(outcome.updated.teacher_id, TeacherId::new("teacher-2"));
    assert_eq!(outcome.updated.booth_id, series.booth_id);
    assert_eq!(outcome.updated.time_range, series.time_range);
}

#[test]
fn test_time_shift_recomputes_duration() {
    // 09:00-10:00 patched to 09:30-10:30 with duration omitted
    let series: ClassSeries = create_test_series();
    let patch: SeriesPatch = SeriesPatch {
        start_minute: Some(570),
        end_minute: Some(630),
        ..SeriesPatch::default()
    };
    let outcome: PatchOutcome = apply_patch(&series, &patch).unwrap();
    assert!(outcome.changed.start_time);
    assert!(outcome.changed.end_time);
    assert_eq!(outcome.updated.duration_minutes, 60);
    assert!(outcome.duration_recomputed);
    // Same length as before, so duration value is unchanged but the
    // boundaries moved
    assert!(!outcome.changed.duration);
}

#[test]
fn test_explicit_duration_suppresses_recompute() {
    let series: ClassSeries = create_test_series();
    let patch: SeriesPatch = SeriesPatch {
        start_minute: Some(570),
        end_minute: Some(690),
        duration_minutes: Some(90),
        ..SeriesPatch::default()
    };
    let outcome: PatchOutcome = apply_patch(&series, &patch).unwrap();
    assert_eq!(outcome.updated.duration_minutes, 90);
    assert!(!outcome.duration_recomputed);
}

#[test]
fn test_non_positive_boundary_difference_skips_recompute() {
    // End moved before start: the range now crosses midnight and the
    // plain difference is non-positive, so the stored duration stands
    let series: ClassSeries = create_test_series();
    let patch: SeriesPatch = SeriesPatch {
        start_minute: Some(1320),
        end_minute: Some(120),
        ..SeriesPatch::default()
    };
    let outcome: PatchOutcome = apply_patch(&series, &patch).unwrap();
    assert_eq!(outcome.updated.duration_minutes, 60);
    assert!(!outcome.duration_recomputed);
}

#[test]
fn test_out_of_range_minutes_rejected() {
    let series: ClassSeries = create_test_series();
    let patch: SeriesPatch = SeriesPatch {
        end_minute: Some(1440),
        ..SeriesPatch::default()
    };
    let result: Result<PatchOutcome, CoreError> = apply_patch(&series, &patch);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidTimeRange { .. }
        ))
    ));
}

#[test]
fn test_shortened_end_date_clamps_watermark() {
    // Watermark sits at June 29; shorten the window to June 28
    let series: ClassSeries = create_test_series();
    let patch: SeriesPatch = SeriesPatch {
        end_date: Some(Some(date(2026, Month::June, 28))),
        ..SeriesPatch::default()
    };
    let outcome: PatchOutcome = apply_patch(&series, &patch).unwrap();
    assert!(outcome.watermark_clamped);
    assert_eq!(
        outcome.updated.last_generated_through,
        Some(date(2026, Month::June, 28))
    );
}

#[test]
fn test_end_date_equal_to_watermark_does_not_clamp() {
    let series: ClassSeries = create_test_series();
    let patch: SeriesPatch = SeriesPatch {
        end_date: Some(Some(date(2026, Month::June, 29))),
        ..SeriesPatch::default()
    };
    let outcome: PatchOutcome = apply_patch(&series, &patch).unwrap();
    assert!(!outcome.watermark_clamped);
    assert_eq!(
        outcome.updated.last_generated_through,
        Some(date(2026, Month::June, 29))
    );
}

#[test]
fn test_cleared_end_date_leaves_watermark_alone() {
    let series: ClassSeries = create_test_series();
    let patch: SeriesPatch = SeriesPatch {
        end_date: Some(None),
        ..SeriesPatch::default()
    };
    let outcome: PatchOutcome = apply_patch(&series, &patch).unwrap();
    assert!(outcome.changed.end_date);
    assert_eq!(outcome.updated.end_date, None);
    assert!(!outcome.watermark_clamped);
    assert_eq!(
        outcome.updated.last_generated_through,
        series.last_generated_through
    );
}

#[test]
fn test_status_transition_table_enforced() {
    let series: ClassSeries = create_test_series();
    let pause: SeriesPatch = SeriesPatch {
        status: Some(SeriesStatus::Paused),
        ..SeriesPatch::default()
    };
    let paused: PatchOutcome = apply_patch(&series, &pause).unwrap();
    assert_eq!(paused.updated.status, SeriesStatus::Paused);

    let end: SeriesPatch = SeriesPatch {
        status: Some(SeriesStatus::Ended),
        ..SeriesPatch::default()
    };
    let ended: PatchOutcome = apply_patch(&paused.updated, &end).unwrap();
    assert_eq!(ended.updated.status, SeriesStatus::Ended);

    // Ended is terminal
    let revive: SeriesPatch = SeriesPatch {
        status: Some(SeriesStatus::Active),
        ..SeriesPatch::default()
    };
    let result: Result<PatchOutcome, CoreError> = apply_patch(&ended.updated, &revive);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[test]
fn test_notes_clear_and_set() {
    let mut series: ClassSeries = create_test_series();
    series.notes = Some(String::from("bring workbook"));

    let clear: SeriesPatch = SeriesPatch {
        notes: Some(None),
        ..SeriesPatch::default()
    };
    let cleared: PatchOutcome = apply_patch(&series, &clear).unwrap();
    assert!(cleared.changed.notes);
    assert_eq!(cleared.updated.notes, None);

    let set: SeriesPatch = SeriesPatch {
        notes: Some(Some(String::from("new booth next term"))),
        ..SeriesPatch::default()
    };
    let updated: PatchOutcome = apply_patch(&cleared.updated, &set).unwrap();
    assert_eq!(
        updated.updated.notes,
        Some(String::from("new booth next term"))
    );
}
