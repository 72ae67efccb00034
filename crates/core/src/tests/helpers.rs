// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use juku_sched_domain::{
    BoothId, BranchId, ClassSeries, ClassTypeId, SeriesId, SeriesStatus, StudentId, SubjectId,
    TeacherId, TimeRange,
};
use time::{Date, Month, Weekday};

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

pub fn range(start: u16, end: u16) -> TimeRange {
    TimeRange::new(start, end).unwrap()
}

/// A Monday 09:00-10:00 math series running April through September 2026,
/// generated through the end of June.
pub fn create_test_series() -> ClassSeries {
    ClassSeries {
        series_id: Some(SeriesId::new("series-1")),
        branch_id: BranchId::new("branch-a"),
        teacher_id: TeacherId::new("teacher-1"),
        student_id: StudentId::new("student-1"),
        subject_id: SubjectId::new("math"),
        class_type_id: ClassTypeId::new("regular"),
        booth_id: BoothId::new("booth-1"),
        name: String::from("Math Monday"),
        start_date: date(2026, Month::April, 6),
        end_date: Some(date(2026, Month::September, 28)),
        time_range: range(540, 600),
        duration_minutes: 60,
        days_of_week: vec![Weekday::Monday],
        is_recurring: true,
        status: SeriesStatus::Active,
        last_generated_through: Some(date(2026, Month::June, 29)),
        notes: None,
    }
}
