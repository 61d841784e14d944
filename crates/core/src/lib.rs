// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Agio commission core: two small rule engines.
//!
//! - [`TierEngine`] resolves commission tiers from monthly validated-contract
//!   counts, computes amounts, and describes payment state-machine
//!   transitions.
//! - [`select_least_loaded`] and [`compute_distribution_stats`] implement
//!   round-robin-by-load account-manager assignment.
//!
//! Both engines are pure computations over caller-supplied snapshots: they
//! hold no mutable state, perform no I/O, and need no locking. All
//! persistence and concurrency coordination lives behind the ledger.

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

mod assign;
mod commission;
mod error;
mod tier;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

// Re-export public types and functions
pub use assign::{DistributionStat, compute_distribution_stats, select_least_loaded};
pub use commission::{ExpectedPriorState, PaymentTransition, approve_payment, request_payment};
pub use error::CoreError;
pub use tier::{
    DefaultRuleProvider, GenerationResult, StandardRuleProvider, TierEngine,
    compute_commission_amount, validate_rule_set,
};
