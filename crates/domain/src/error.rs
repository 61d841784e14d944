// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Period bounds are inverted or empty.
    InvalidPeriod {
        /// The period start date.
        start: time::Date,
        /// The period end date.
        end: time::Date,
    },
    /// The rule set contains no rules.
    EmptyRuleSet,
    /// Rules are not ordered by ascending lower bound.
    UnorderedRules {
        /// Zero-based position of the out-of-order rule.
        position: usize,
    },
    /// The first rule does not start at zero contracts.
    PartitionDoesNotStartAtZero {
        /// The lower bound of the first rule.
        found_min: u32,
    },
    /// Adjacent rules leave a gap or overlap in the contract-count range.
    PartitionGapOrOverlap {
        /// The lower bound the next rule was expected to have.
        expected_min: u32,
        /// The lower bound the next rule actually has.
        found_min: u32,
    },
    /// A rule other than the last one has no upper bound.
    UnboundedRuleNotLast {
        /// Zero-based position of the offending rule.
        position: usize,
    },
    /// The last rule has an upper bound, leaving large counts uncovered.
    MissingUnboundedRule,
    /// A rule's upper bound is below its lower bound.
    InvalidRuleBounds {
        /// The rule's lower bound.
        min_contracts: u32,
        /// The rule's upper bound.
        max_contracts: u32,
    },
    /// A rule carries a negative per-contract amount.
    NegativeUnitAmount {
        /// The tier the rule is attached to.
        tier: String,
    },
    /// No rule in the set covers the given contract count.
    UncoveredContractCount {
        /// The contract count that fell through every rule.
        count: u32,
    },
    /// Commission tier string is not a valid tier.
    InvalidTier(String),
    /// Commission status string is not a valid status.
    InvalidCommissionStatus(String),
    /// Staff role string is not a valid role.
    InvalidStaffRole(String),
    /// A payment state-machine precondition was violated.
    InvalidPaymentTransition {
        /// The transition that was attempted ("RequestPayment" or "ApprovePayment").
        action: String,
        /// The commission status at the time of the attempt.
        status: String,
        /// Whether payment had already been requested.
        payment_requested: bool,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// Failed to parse a date from its stored string form.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a monetary amount from its stored string form.
    AmountParseError {
        /// The invalid amount string.
        amount_string: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPeriod { start, end } => {
                write!(f, "Invalid period: start {start} must be before end {end}")
            }
            Self::EmptyRuleSet => write!(f, "Commission rule set is empty"),
            Self::UnorderedRules { position } => {
                write!(f, "Rule at position {position} is out of ascending order")
            }
            Self::PartitionDoesNotStartAtZero { found_min } => {
                write!(
                    f,
                    "First rule must cover 0 contracts, but starts at {found_min}"
                )
            }
            Self::PartitionGapOrOverlap {
                expected_min,
                found_min,
            } => {
                write!(
                    f,
                    "Rules must partition contract counts: expected next lower bound {expected_min}, found {found_min}"
                )
            }
            Self::UnboundedRuleNotLast { position } => {
                write!(
                    f,
                    "Rule at position {position} is unbounded but is not the last rule"
                )
            }
            Self::MissingUnboundedRule => {
                write!(f, "Last rule must be unbounded to cover all contract counts")
            }
            Self::InvalidRuleBounds {
                min_contracts,
                max_contracts,
            } => {
                write!(
                    f,
                    "Rule upper bound {max_contracts} is below lower bound {min_contracts}"
                )
            }
            Self::NegativeUnitAmount { tier } => {
                write!(f, "Rule for {tier} has a negative per-contract amount")
            }
            Self::UncoveredContractCount { count } => {
                write!(f, "No rule covers a contract count of {count}")
            }
            Self::InvalidTier(value) => write!(f, "Invalid commission tier: {value}"),
            Self::InvalidCommissionStatus(value) => {
                write!(f, "Invalid commission status: {value}")
            }
            Self::InvalidStaffRole(value) => write!(f, "Invalid staff role: {value}"),
            Self::InvalidPaymentTransition {
                action,
                status,
                payment_requested,
                reason,
            } => {
                write!(
                    f,
                    "{action} not permitted (status={status}, payment_requested={payment_requested}): {reason}"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::AmountParseError { amount_string } => {
                write!(f, "Failed to parse amount '{amount_string}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
