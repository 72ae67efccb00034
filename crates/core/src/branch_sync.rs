// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multi-branch series reconciliation.
//!
//! A logical series synced across branches exists as parallel rows, one
//! per branch, linked only by an equality key over the pre-edit values of
//! `{name, start_date, end_date, is_recurring}` rather than a foreign key.
//!
//! Reconciliation produces a [`BranchSyncPlan`]: update the matching row
//! in each selected branch, create one where missing, and delete stale
//! rows in branches no longer selected. The caller MUST execute the plan
//! as one atomic storage transaction; a storage failure aborts the whole
//! reconciliation and surfaces as [`CoreError::BranchSyncFailed`].
//!
//! After the transaction commits, [`revalidate_after_sync`] re-runs
//! placement checks against the new field values across every affected
//! branch. Its verdict is advisory: the write has already happened, and
//! the caller decides whether to cancel the flagged sessions.

use crate::error::CoreError;
use juku_sched_domain::{
    BranchId, ClassBooking, ClassSeries, HolidayWindow, PlacementDecision, ProposedPlacement,
    SeriesId, check_placement,
};
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// The equality key linking parallel series rows across branches.
///
/// Built from the PRE-edit values, since existing rows in other branches
/// still carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMatchKey {
    /// Display name.
    pub name: String,
    /// Window start date.
    pub start_date: Date,
    /// Window end date.
    pub end_date: Option<Date>,
    /// Recurrence flag.
    pub is_recurring: bool,
}

impl SeriesMatchKey {
    /// Builds the match key from a series row.
    #[must_use]
    pub fn of(series: &ClassSeries) -> Self {
        Self {
            name: series.name.clone(),
            start_date: series.start_date,
            end_date: series.end_date,
            is_recurring: series.is_recurring,
        }
    }

    /// Returns whether a row matches this key.
    #[must_use]
    pub fn matches(&self, series: &ClassSeries) -> bool {
        series.name == self.name
            && series.start_date == self.start_date
            && series.end_date == self.end_date
            && series.is_recurring == self.is_recurring
    }
}

/// An update of an existing row in a selected branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchUpdate {
    /// The branch holding the row.
    pub branch_id: BranchId,
    /// The new row value; `series_id` identifies the target row and the
    /// row's own generation watermark is preserved (clamped to the new
    /// end date where needed).
    pub series: ClassSeries,
}

/// A deletion of a stale row in a deselected branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDelete {
    /// The branch holding the stale row.
    pub branch_id: BranchId,
    /// The stale row's identifier.
    pub series_id: Option<SeriesId>,
}

/// The reconciliation write set.
///
/// All rows visible or none: the caller executes the plan in a single
/// storage transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSyncPlan {
    /// New rows for selected branches with no matching row. Identifiers
    /// are unset; the persistence layer assigns them.
    pub creates: Vec<ClassSeries>,
    /// Updates to matching rows in selected branches.
    pub updates: Vec<BranchUpdate>,
    /// Stale rows to delete in deselected branches.
    pub deletes: Vec<BranchDelete>,
}

impl BranchSyncPlan {
    /// Returns whether the plan contains no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }
}

/// Plans the reconciliation of a series across branches.
///
/// # Arguments
///
/// * `pre_edit` - The blueprint as it was before the patch; its values
///   form the match key
/// * `updated` - The blueprint with the patch applied
/// * `target_branches` - The branches the series should exist in after
///   reconciliation
/// * `rows_by_branch` - Existing series rows per branch, as loaded by the
///   caller (including branches that are no longer selected)
///
/// # Returns
///
/// A [`BranchSyncPlan`]: per selected branch, update the key-matching row
/// if found, else create one; delete key-matching rows in branches no
/// longer selected.
#[must_use]
pub fn plan_branch_sync(
    pre_edit: &ClassSeries,
    updated: &ClassSeries,
    target_branches: &[BranchId],
    rows_by_branch: &[(BranchId, Vec<ClassSeries>)],
) -> BranchSyncPlan {
    let key: SeriesMatchKey = SeriesMatchKey::of(pre_edit);

    let mut creates: Vec<ClassSeries> = Vec::new();
    let mut updates: Vec<BranchUpdate> = Vec::new();
    let mut deletes: Vec<BranchDelete> = Vec::new();

    for branch_id in target_branches {
        let existing: Option<&ClassSeries> = rows_by_branch
            .iter()
            .find(|(candidate, _)| candidate == branch_id)
            .and_then(|(_, rows)| rows.iter().find(|row| key.matches(row)));

        if let Some(row) = existing {
            let mut series: ClassSeries = updated.clone();
            series.branch_id = branch_id.clone();
            series.series_id = row.series_id.clone();
            // Each branch row generates sessions independently; keep its
            // own watermark, clamped to the new end date
            series.last_generated_through = match (row.last_generated_through, series.end_date) {
                (Some(watermark), Some(end_date)) if watermark > end_date => Some(end_date),
                (watermark, _) => watermark,
            };
            updates.push(BranchUpdate {
                branch_id: branch_id.clone(),
                series,
            });
        } else {
            let mut series: ClassSeries = updated.clone();
            series.branch_id = branch_id.clone();
            series.series_id = None;
            series.last_generated_through = None;
            creates.push(series);
        }
    }

    for (branch_id, rows) in rows_by_branch {
        if target_branches.contains(branch_id) {
            continue;
        }
        for row in rows.iter().filter(|row| key.matches(row)) {
            deletes.push(BranchDelete {
                branch_id: branch_id.clone(),
                series_id: row.series_id.clone(),
            });
        }
    }

    tracing::debug!(
        creates = creates.len(),
        updates = updates.len(),
        deletes = deletes.len(),
        "planned branch sync"
    );

    BranchSyncPlan {
        creates,
        updates,
        deletes,
    }
}

/// Maps a storage-layer failure report onto the coordinator error.
///
/// The transaction executing a [`BranchSyncPlan`] is all-or-nothing; this
/// is the single terminal error for the reconciliation step.
pub fn branch_sync_failure(reason: impl Into<String>) -> CoreError {
    CoreError::BranchSyncFailed {
        reason: reason.into(),
    }
}

/// The schedule context of one affected branch, loaded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchScheduleContext {
    /// The branch.
    pub branch_id: BranchId,
    /// Generated sessions on the series' weekdays in this branch.
    pub sessions: Vec<ClassBooking>,
    /// Holiday windows for this branch.
    pub holidays: Vec<HolidayWindow>,
}

/// Conflicts found in one branch during post-sync revalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchConflicts {
    /// The branch the conflicts were found in.
    pub branch_id: BranchId,
    /// The weekday the conflicting placement falls on.
    pub day_of_week: Weekday,
    /// The placement decision for that weekday.
    pub decision: PlacementDecision,
}

/// The advisory outcome of post-sync revalidation.
///
/// `has_conflicts == true` is the 409-equivalent signal: the write
/// already happened, and the caller decides whether to cancel the flagged
/// sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncValidation {
    /// Whether any branch reported a conflict.
    pub has_conflicts: bool,
    /// Per-branch, per-weekday conflict decisions. Only conflicting
    /// entries are included.
    pub conflicts: Vec<BranchConflicts>,
}

/// Re-runs placement checks against the new field values per branch.
///
/// Sessions already generated by the series itself are not excluded:
/// stale own sessions at the old time that now collide with the new
/// window are exactly what the caller needs flagged.
///
/// # Arguments
///
/// * `updated` - The blueprint with the patch applied
/// * `branches` - Schedule context per affected branch
/// * `today` - Anchor date for the coarse holiday check
#[must_use]
pub fn revalidate_after_sync(
    updated: &ClassSeries,
    branches: &[BranchScheduleContext],
    today: Date,
) -> SyncValidation {
    let mut conflicts: Vec<BranchConflicts> = Vec::new();

    for context in branches {
        for &day_of_week in &updated.days_of_week {
            let proposed: ProposedPlacement = ProposedPlacement {
                day_of_week,
                date: None,
                time_range: updated.time_range,
                teacher_id: updated.teacher_id.clone(),
                booth_id: updated.booth_id.clone(),
                student_ids: vec![updated.student_id.clone()],
            };
            let decision: PlacementDecision = check_placement(
                &proposed,
                &context.sessions,
                &context.holidays,
                today,
                None,
            );
            if decision.has_conflicts {
                conflicts.push(BranchConflicts {
                    branch_id: context.branch_id.clone(),
                    day_of_week,
                    decision,
                });
            }
        }
    }

    if !conflicts.is_empty() {
        tracing::debug!(
            branches = conflicts.len(),
            "post-sync revalidation found conflicts"
        );
    }

    SyncValidation {
        has_conflicts: !conflicts.is_empty(),
        conflicts,
    }
}
