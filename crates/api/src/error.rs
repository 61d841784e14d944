// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use agio::CoreError;
use agio_domain::DomainError;
use agio_ledger::LedgerError;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core/ledger errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The stored record changed between read and write; the operation
    /// was not applied.
    ConcurrentModification {
        /// The resource that was modified concurrently.
        resource_type: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A ledger operation failed.
    ///
    /// Carried through untranslated so callers can distinguish, say, a
    /// connection failure worth retrying from corrupt stored data that
    /// is not.
    Ledger(LedgerError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ConcurrentModification {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} was modified concurrently: {message}")
            }
            Self::Ledger(err) => {
                write!(f, "Ledger error: {err}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// Rule-set violations surface as domain rule violations with a stable
/// rule name; parse failures on caller input surface as invalid input.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidPeriod { start, end } => ApiError::InvalidInput {
            field: String::from("period"),
            message: format!("Period start {start} must be strictly before end {end}"),
        },
        DomainError::EmptyRuleSet => ApiError::DomainRuleViolation {
            rule: String::from("rule_set_partition"),
            message: String::from("A rule set must contain at least one rule"),
        },
        DomainError::UnorderedRules { position } => ApiError::DomainRuleViolation {
            rule: String::from("rule_set_partition"),
            message: format!("Rules must be ordered by ascending lower bound (position {position})"),
        },
        DomainError::PartitionDoesNotStartAtZero { found_min } => ApiError::DomainRuleViolation {
            rule: String::from("rule_set_partition"),
            message: format!("The first rule must start at 0, found {found_min}"),
        },
        DomainError::PartitionGapOrOverlap {
            expected_min,
            found_min,
        } => ApiError::DomainRuleViolation {
            rule: String::from("rule_set_partition"),
            message: format!(
                "Brackets must be contiguous: expected lower bound {expected_min}, found {found_min}"
            ),
        },
        DomainError::UnboundedRuleNotLast { position } => ApiError::DomainRuleViolation {
            rule: String::from("rule_set_partition"),
            message: format!("Only the last rule may be unbounded (position {position})"),
        },
        DomainError::MissingUnboundedRule => ApiError::DomainRuleViolation {
            rule: String::from("rule_set_partition"),
            message: String::from("The last rule must be unbounded"),
        },
        DomainError::InvalidRuleBounds {
            min_contracts,
            max_contracts,
        } => ApiError::DomainRuleViolation {
            rule: String::from("rule_set_partition"),
            message: format!("Rule bounds are inverted: {min_contracts} > {max_contracts}"),
        },
        DomainError::NegativeUnitAmount { tier } => ApiError::DomainRuleViolation {
            rule: String::from("rule_set_partition"),
            message: format!("Tier '{tier}' has a negative per-contract amount"),
        },
        DomainError::UncoveredContractCount { count } => ApiError::DomainRuleViolation {
            rule: String::from("rule_set_partition"),
            message: format!("No rule covers a contract count of {count}"),
        },
        DomainError::InvalidTier(msg) => ApiError::InvalidInput {
            field: String::from("tier"),
            message: msg,
        },
        DomainError::InvalidCommissionStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: msg,
        },
        DomainError::InvalidStaffRole(msg) => ApiError::InvalidInput {
            field: String::from("role"),
            message: msg,
        },
        DomainError::InvalidPaymentTransition {
            action,
            status,
            payment_requested,
            reason,
        } => ApiError::DomainRuleViolation {
            rule: String::from("payment_state_machine"),
            message: format!(
                "{action} is not allowed from status={status}, payment_requested={payment_requested}: {reason}"
            ),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("'{date_string}' is not a valid ISO 8601 date: {error}"),
        },
        DomainError::AmountParseError { amount_string } => ApiError::InvalidInput {
            field: String::from("amount"),
            message: format!("'{amount_string}' is not a valid decimal amount"),
        },
    }
}

/// Translates a core engine error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoCandidatesAvailable => ApiError::DomainRuleViolation {
            rule: String::from("assignment_candidates"),
            message: String::from("No active account managers are available for assignment"),
        },
    }
}

/// Translates a ledger error into an API error.
///
/// Callers that can name the missing resource should map absence
/// themselves before reaching for this; everything left passes through
/// as a typed ledger error.
#[must_use]
pub fn translate_ledger_error(err: LedgerError) -> ApiError {
    match err {
        LedgerError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Ledger(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_absence_maps_to_not_found() {
        let err: ApiError =
            translate_ledger_error(LedgerError::NotFound(String::from("Commission 7")));
        assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_other_ledger_errors_pass_through_typed() {
        let original: LedgerError =
            LedgerError::DatabaseConnectionFailed(String::from("refused"));
        let err: ApiError = translate_ledger_error(original.clone());
        assert_eq!(err, ApiError::Ledger(original));
    }

    #[test]
    fn test_rule_set_violations_name_a_stable_rule() {
        let err: ApiError = translate_domain_error(DomainError::EmptyRuleSet);
        let ApiError::DomainRuleViolation { rule, .. } = err else {
            panic!("expected a domain rule violation");
        };
        assert_eq!(rule, "rule_set_partition");
    }
}
