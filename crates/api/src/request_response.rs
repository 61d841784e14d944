// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Response types for the caller-facing operations.

use serde::{Deserialize, Serialize};

/// The outcome of a generation pass for a single freelancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// The freelancer this outcome concerns.
    pub freelancer_id: i64,
    /// What happened for this freelancer.
    pub status: GenerationStatus,
}

/// Per-freelancer generation status.
///
/// A generation pass is idempotent: re-running it over the same period
/// reports `SkippedDuplicate` for every freelancer already covered
/// instead of failing or double-writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// A commission was created.
    Created {
        /// The ledger-assigned commission identifier.
        commission_id: i64,
    },
    /// A commission for this freelancer and period already existed.
    SkippedDuplicate {
        /// The identifier of the existing commission.
        commission_id: i64,
    },
    /// Generation failed for this freelancer; the pass continued with
    /// the others.
    Failed {
        /// A human-readable description of the failure.
        message: String,
    },
}

/// The outcome of a load-balanced contact assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// The contact that was assigned.
    pub contact_id: i64,
    /// The staff member the contact was assigned to.
    pub staff_id: i64,
}
