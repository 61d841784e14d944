// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Staff role classifications.
///
/// Roles gate which caller-facing operations a staff member may invoke;
/// the engines themselves never inspect roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Freelance sales commercial. Earns commissions, may request payment
    /// of their own commissions.
    Commercial,
    /// Account manager. Receives load-balanced contact assignments.
    AccountManager,
    /// Agency administrator. Runs generation passes and approves payments.
    Admin,
}

impl StaffRole {
    /// Returns the string representation of the role.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::AccountManager => "account_manager",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for StaffRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commercial" => Ok(Self::Commercial),
            "account_manager" => Ok(Self::AccountManager),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidStaffRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member eligible for a new assignment, with their current load.
///
/// Candidates are transient: recomputed from the ledger on every
/// assignment request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentCandidate {
    /// The candidate staff member.
    pub staff_id: i64,
    /// Count of currently active (non-archived) assignments they own.
    pub current_load: u32,
}

impl AssignmentCandidate {
    /// Creates a new assignment candidate.
    #[must_use]
    pub const fn new(staff_id: i64, current_load: u32) -> Self {
        Self {
            staff_id,
            current_load,
        }
    }
}
