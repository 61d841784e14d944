// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commission tiers and tier rule sets.
//!
//! A tier rule maps a bracket of monthly validated-contract counts to a
//! fixed per-contract amount. A rule set must partition the non-negative
//! integers: every possible count matches exactly one rule.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Commission brackets, ordered by ascending monthly contract volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionTier {
    /// Lowest bracket.
    Tier1,
    /// Second bracket.
    Tier2,
    /// Third bracket.
    Tier3,
    /// Top, unbounded bracket.
    Tier4,
}

impl CommissionTier {
    /// Returns the string representation of the tier.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tier1 => "tier1",
            Self::Tier2 => "tier2",
            Self::Tier3 => "tier3",
            Self::Tier4 => "tier4",
        }
    }
}

impl FromStr for CommissionTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tier1" => Ok(Self::Tier1),
            "tier2" => Ok(Self::Tier2),
            "tier3" => Ok(Self::Tier3),
            "tier4" => Ok(Self::Tier4),
            _ => Err(DomainError::InvalidTier(s.to_string())),
        }
    }
}

impl std::fmt::Display for CommissionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single commission bracket rule.
///
/// Bounds are inclusive. `max_contracts = None` marks the unbounded top
/// bracket and is only valid on the last rule of a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionTierRule {
    /// The tier this rule awards.
    pub tier: CommissionTier,
    /// Inclusive lower bound on the monthly contract count.
    pub min_contracts: u32,
    /// Inclusive upper bound, or `None` for the unbounded top bracket.
    pub max_contracts: Option<u32>,
    /// Fixed amount awarded per validated contract while in this bracket.
    pub unit_amount: Decimal,
}

impl CommissionTierRule {
    /// Creates a new rule.
    #[must_use]
    pub const fn new(
        tier: CommissionTier,
        min_contracts: u32,
        max_contracts: Option<u32>,
        unit_amount: Decimal,
    ) -> Self {
        Self {
            tier,
            min_contracts,
            max_contracts,
            unit_amount,
        }
    }

    /// Checks whether a contract count falls inside this rule's bracket.
    #[must_use]
    pub fn matches(&self, contracts_count: u32) -> bool {
        contracts_count >= self.min_contracts
            && self
                .max_contracts
                .is_none_or(|max| contracts_count <= max)
    }
}

/// An ordered set of commission tier rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<CommissionTierRule>,
}

impl RuleSet {
    /// Creates a rule set from an ordered list of rules.
    ///
    /// The rules are taken as-is; call [`RuleSet::validate_partition`] to
    /// check the partition invariant before trusting the set.
    #[must_use]
    pub const fn new(rules: Vec<CommissionTierRule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in ascending `min_contracts` order.
    #[must_use]
    pub fn rules(&self) -> &[CommissionTierRule] {
        &self.rules
    }

    /// Validates that the rules partition the non-negative integers.
    ///
    /// Requirements:
    /// - at least one rule
    /// - ordered by ascending `min_contracts`, starting at 0
    /// - each rule's upper bound is exactly one below the next lower bound
    /// - only the last rule is unbounded, and the last rule must be unbounded
    /// - all per-contract amounts are non-negative
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate_partition(&self) -> Result<(), DomainError> {
        let first: &CommissionTierRule = self.rules.first().ok_or(DomainError::EmptyRuleSet)?;

        if first.min_contracts != 0 {
            return Err(DomainError::PartitionDoesNotStartAtZero {
                found_min: first.min_contracts,
            });
        }

        let mut expected_min: Option<u32> = Some(0);
        for (position, rule) in self.rules.iter().enumerate() {
            let Some(expected) = expected_min else {
                // A previous rule was unbounded but rules remain.
                return Err(DomainError::UnboundedRuleNotLast { position: position - 1 });
            };

            if rule.min_contracts < expected {
                return Err(DomainError::UnorderedRules { position });
            }
            if rule.min_contracts != expected {
                return Err(DomainError::PartitionGapOrOverlap {
                    expected_min: expected,
                    found_min: rule.min_contracts,
                });
            }
            if rule.unit_amount.is_sign_negative() && !rule.unit_amount.is_zero() {
                return Err(DomainError::NegativeUnitAmount {
                    tier: rule.tier.as_str().to_string(),
                });
            }

            expected_min = match rule.max_contracts {
                Some(max) if max < rule.min_contracts => {
                    return Err(DomainError::InvalidRuleBounds {
                        min_contracts: rule.min_contracts,
                        max_contracts: max,
                    });
                }
                Some(max) => Some(max + 1),
                None => None,
            };
        }

        if expected_min.is_some() {
            return Err(DomainError::MissingUnboundedRule);
        }
        Ok(())
    }

    /// Finds the rule covering a contract count.
    ///
    /// Rules are scanned in ascending `min_contracts` order and the first
    /// match wins.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UncoveredContractCount` if no rule matches.
    pub fn matching_rule(&self, contracts_count: u32) -> Result<&CommissionTierRule, DomainError> {
        self.rules
            .iter()
            .find(|rule| rule.matches(contracts_count))
            .ok_or(DomainError::UncoveredContractCount {
                count: contracts_count,
            })
    }

    /// The built-in four-bracket rule set used when the configured rule
    /// store is empty or invalid.
    ///
    /// Brackets: 0-10, 11-20, 21-30, 31+. The first bracket starts at 0 so
    /// the partition covers every possible count; a count of 0 yields an
    /// amount of 0 in any case.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            CommissionTierRule::new(CommissionTier::Tier1, 0, Some(10), Decimal::new(5000, 2)),
            CommissionTierRule::new(CommissionTier::Tier2, 11, Some(20), Decimal::new(7500, 2)),
            CommissionTierRule::new(CommissionTier::Tier3, 21, Some(30), Decimal::new(10000, 2)),
            CommissionTierRule::new(CommissionTier::Tier4, 31, None, Decimal::new(12500, 2)),
        ])
    }
}
