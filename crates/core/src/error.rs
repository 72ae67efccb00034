// Copyright (C) 2026 the jukusched developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use juku_sched_domain::DomainError;

/// Errors that can occur while coordinating a series mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The storage transaction executing a branch-sync plan failed.
    ///
    /// The transaction aborts as a whole: no partial branch state is
    /// left behind. Distinct from a propagation failure, which is soft
    /// and reported in a [`crate::PropagationReport`] instead.
    BranchSyncFailed {
        /// Description of the storage failure.
        reason: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::BranchSyncFailed { reason } => {
                write!(f, "Branch sync transaction failed: {reason}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
