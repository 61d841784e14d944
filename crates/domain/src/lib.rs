// Copyright (C) 2026 Agio Contributors
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

mod commission;
mod error;
mod money;
mod period;
mod staff;
mod tier;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

// Re-export public types
pub use commission::{Commission, CommissionStatus};
pub use error::DomainError;
pub use money::{MINOR_UNIT_DIGITS, parse_amount, round_to_minor_units};
pub use period::{Period, format_date, format_datetime, parse_date, parse_datetime};
pub use staff::{AssignmentCandidate, StaffRole};
pub use tier::{CommissionTier, CommissionTierRule, RuleSet};
