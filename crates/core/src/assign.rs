// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Load-balanced assignment selection.
//!
//! New contacts go to the account manager currently holding the fewest
//! active assignments. Selection only reads a snapshot; the caller performs
//! the write-back. Two concurrent requests may therefore pick the same
//! candidate and drift the balance by one — accepted as soft fairness,
//! since volume is low and the imbalance self-corrects on later picks.

use crate::error::CoreError;
use agio_domain::AssignmentCandidate;
use rust_decimal::Decimal;

/// Per-staff share of the active assignment load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionStat {
    /// The staff member.
    pub staff_id: i64,
    /// Their active assignment count.
    pub count: u32,
    /// Their share of the total, in percent. Unrounded so the shares sum
    /// to 100 within tolerance for any split; round at display time.
    /// Zero for everyone when the total is zero.
    pub percent_of_total: Decimal,
}

/// Selects the least-loaded candidate.
///
/// Stable sort by `current_load` ascending; ties keep input order, so the
/// first-seen candidate among equals wins. Deterministic for a given input
/// order.
///
/// # Errors
///
/// Returns `CoreError::NoCandidatesAvailable` if `candidates` is empty.
pub fn select_least_loaded(candidates: &[AssignmentCandidate]) -> Result<i64, CoreError> {
    let mut ordered: Vec<AssignmentCandidate> = candidates.to_vec();
    ordered.sort_by_key(|candidate| candidate.current_load);

    ordered
        .first()
        .map(|candidate| candidate.staff_id)
        .ok_or(CoreError::NoCandidatesAvailable)
}

/// Computes the active-load distribution across candidates.
///
/// Percentages are `count / total x 100`, carried at full precision so
/// they sum to 100 within 0.01 for any non-empty split; rounding a
/// seven-way split per entry would drift the sum to 100.03. When the
/// total is zero every percentage is zero (no division error). Sorted by
/// count descending, ties by `staff_id` ascending for determinism.
#[must_use]
pub fn compute_distribution_stats(candidates: &[AssignmentCandidate]) -> Vec<DistributionStat> {
    let total: u32 = candidates
        .iter()
        .map(|candidate| candidate.current_load)
        .sum();

    let mut stats: Vec<DistributionStat> = candidates
        .iter()
        .map(|candidate| {
            let percent: Decimal = if total == 0 {
                Decimal::ZERO
            } else {
                Decimal::from(candidate.current_load) / Decimal::from(total)
                    * Decimal::ONE_HUNDRED
            };
            DistributionStat {
                staff_id: candidate.staff_id,
                count: candidate.current_load,
                percent_of_total: percent,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count).then(a.staff_id.cmp(&b.staff_id)));
    stats
}
