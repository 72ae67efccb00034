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

mod branch_sync;
mod error;
mod patch;
mod propagation;

#[cfg(test)]
mod tests;

pub use branch_sync::{
    BranchConflicts, BranchDelete, BranchScheduleContext, BranchSyncPlan, BranchUpdate,
    SeriesMatchKey, SyncValidation, branch_sync_failure, plan_branch_sync, revalidate_after_sync,
};
pub use error::CoreError;
pub use patch::{ChangedFields, PatchOutcome, SeriesPatch, apply_patch};
pub use propagation::{
    PropagationOptions, PropagationReport, SessionPropagation, plan_propagation,
};
