// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tier resolution and commission generation.
//!
//! The engine works on caller-supplied rule snapshots and never touches
//! storage. The configured rule set may be temporarily empty or malformed
//! (the rule store is operator-editable), so resolution always falls back
//! to an injected default rule set rather than failing.

use crate::error::CoreError;
use agio_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use agio_domain::{
    Commission, CommissionStatus, CommissionTierRule, DomainError, Period, RuleSet,
    round_to_minor_units,
};
use rust_decimal::Decimal;

/// Supplies the fallback rule set used when the configured rules are
/// missing or invalid.
///
/// Injected at engine construction so tests can substitute deterministic
/// fixtures; defaults are never baked into the engine itself.
pub trait DefaultRuleProvider {
    /// Returns the fallback rule set.
    ///
    /// The returned set must satisfy the partition invariant; the engine
    /// validates it once at construction and rejects providers that do not.
    fn default_rules(&self) -> RuleSet;
}

/// The built-in provider: four fixed brackets (0-10, 11-20, 21-30, 31+).
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRuleProvider;

impl DefaultRuleProvider for StandardRuleProvider {
    fn default_rules(&self) -> RuleSet {
        RuleSet::standard()
    }
}

/// The result of generating a commission: the new record plus the audit
/// event describing it.
///
/// The record carries no ledger id yet; the caller persists it through the
/// ledger's atomic insert-if-absent, which is what makes the monthly
/// generation pass idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// The freshly generated commission, not yet persisted.
    pub commission: Commission,
    /// The audit event recording the generation.
    pub audit_event: AuditEvent,
}

/// Tier resolution and commission generation engine.
///
/// Holds only the validated fallback rule set; all other inputs are
/// supplied per call. Stateless and side-effect free.
#[derive(Debug, Clone)]
pub struct TierEngine {
    defaults: RuleSet,
}

impl TierEngine {
    /// Creates an engine with the given fallback provider.
    ///
    /// # Errors
    ///
    /// Returns a `DomainViolation` if the provider's rule set does not
    /// satisfy the partition invariant. Validating here is what lets
    /// [`TierEngine::resolve_tier`] be total.
    pub fn new(provider: &dyn DefaultRuleProvider) -> Result<Self, CoreError> {
        let defaults: RuleSet = provider.default_rules();
        defaults.validate_partition()?;
        Ok(Self { defaults })
    }

    /// Returns the validated fallback rule set.
    #[must_use]
    pub const fn defaults(&self) -> &RuleSet {
        &self.defaults
    }

    /// Resolves the tier rule applicable to a contract count.
    ///
    /// Rules are scanned in ascending lower-bound order; the first match
    /// wins. If the supplied set fails partition validation, or the count
    /// falls through every bound, resolution retries against the fallback
    /// set. Always returns a rule: the fallback partition was validated at
    /// construction, and a valid partition covers every count.
    #[must_use]
    pub fn resolve_tier(&self, contracts_count: u32, rules: &RuleSet) -> CommissionTierRule {
        if rules.validate_partition().is_ok()
            && let Ok(rule) = rules.matching_rule(contracts_count)
        {
            return rule.clone();
        }

        match self.defaults.matching_rule(contracts_count) {
            Ok(rule) => rule.clone(),
            // Unreachable: the fallback partition covers all counts.
            Err(_) => unreachable!("validated fallback rule set left a count uncovered"),
        }
    }

    /// Generates a commission for one freelancer and period.
    ///
    /// Resolves the tier, computes the amount, and constructs a pending
    /// commission with no payment requested. Pure: persistence and
    /// duplicate detection are the ledger's job.
    #[must_use]
    pub fn generate_commission(
        &self,
        freelancer_id: i64,
        period: Period,
        contracts_count: u32,
        rules: &RuleSet,
        actor: Actor,
        cause: Cause,
    ) -> GenerationResult {
        let rule: CommissionTierRule = self.resolve_tier(contracts_count, rules);
        let amount: Decimal = compute_commission_amount(contracts_count, &rule);

        let commission: Commission = Commission {
            commission_id: None,
            freelancer_id,
            period,
            contracts_count,
            tier: rule.tier,
            amount,
            status: CommissionStatus::Pending,
            payment_requested: false,
            paid_date: None,
        };

        let before: StateSnapshot = StateSnapshot::new(String::from("absent"));
        let after: StateSnapshot = StateSnapshot::new(format!(
            "freelancer_id={freelancer_id},period={period},tier={},amount={amount},status=pending",
            rule.tier
        ));
        let action: Action = Action::new(
            String::from("GenerateCommission"),
            Some(format!(
                "Generated {} commission for freelancer {freelancer_id} over {period} \
                 ({contracts_count} contracts)",
                rule.tier
            )),
        );

        GenerationResult {
            commission,
            audit_event: AuditEvent::new(actor, cause, action, before, after),
        }
    }
}

/// Computes the commission amount for a contract count under a rule.
///
/// `amount = contracts_count x unit_amount`, rounded to the currency's
/// minor-unit precision with round-half-to-even. Side-effect free and
/// non-decreasing in `contracts_count` for a fixed rule.
#[must_use]
pub fn compute_commission_amount(contracts_count: u32, rule: &CommissionTierRule) -> Decimal {
    round_to_minor_units(Decimal::from(contracts_count) * rule.unit_amount)
}

/// Validates that a rule set is usable as a configured rule source.
///
/// This is a read-only check for settings screens; resolution itself
/// tolerates invalid sets by falling back.
///
/// # Errors
///
/// Returns the first partition violation found.
pub fn validate_rule_set(rules: &RuleSet) -> Result<(), DomainError> {
    rules.validate_partition()
}
