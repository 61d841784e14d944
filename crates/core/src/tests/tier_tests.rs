// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_actor, create_test_cause, example_rules, january_2024};
use crate::{
    CoreError, DefaultRuleProvider, GenerationResult, StandardRuleProvider, TierEngine,
    compute_commission_amount,
};
use agio_domain::{
    CommissionStatus, CommissionTier, CommissionTierRule, RuleSet,
};
use rust_decimal::Decimal;

fn engine() -> TierEngine {
    TierEngine::new(&StandardRuleProvider).unwrap()
}

#[test]
fn test_engine_rejects_invalid_default_provider() {
    struct BrokenProvider;
    impl DefaultRuleProvider for BrokenProvider {
        fn default_rules(&self) -> RuleSet {
            RuleSet::new(Vec::new())
        }
    }

    let result: Result<TierEngine, CoreError> = TierEngine::new(&BrokenProvider);
    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}

#[test]
fn test_resolve_tier_matches_first_covering_rule() {
    let engine: TierEngine = engine();
    let rules: RuleSet = example_rules();

    assert_eq!(engine.resolve_tier(0, &rules).tier, CommissionTier::Tier1);
    assert_eq!(engine.resolve_tier(15, &rules).tier, CommissionTier::Tier2);
    assert_eq!(engine.resolve_tier(30, &rules).tier, CommissionTier::Tier3);
    assert_eq!(engine.resolve_tier(31, &rules).tier, CommissionTier::Tier4);
}

#[test]
fn test_resolve_tier_falls_back_on_empty_rule_set() {
    let engine: TierEngine = engine();
    let empty: RuleSet = RuleSet::new(Vec::new());

    // Fallback is the standard four-bracket set.
    let rule: CommissionTierRule = engine.resolve_tier(15, &empty);
    assert_eq!(rule.tier, CommissionTier::Tier2);
}

#[test]
fn test_resolve_tier_falls_back_on_malformed_rule_set() {
    let engine: TierEngine = engine();
    // Gap between 10 and 12: fails partition validation.
    let malformed: RuleSet = RuleSet::new(vec![
        CommissionTierRule::new(CommissionTier::Tier1, 0, Some(10), Decimal::new(50_000, 2)),
        CommissionTierRule::new(CommissionTier::Tier2, 12, None, Decimal::new(100_000, 2)),
    ]);

    let rule: CommissionTierRule = engine.resolve_tier(11, &malformed);
    assert_eq!(rule.tier, CommissionTier::Tier2);
    assert_eq!(rule.unit_amount, Decimal::new(7500, 2));
}

#[test]
fn test_compute_amount_is_count_times_unit() {
    let rule: CommissionTierRule =
        CommissionTierRule::new(CommissionTier::Tier2, 11, Some(20), Decimal::new(100_000, 2));

    assert_eq!(
        compute_commission_amount(15, &rule),
        Decimal::new(1_500_000, 2)
    );
}

#[test]
fn test_compute_amount_zero_contracts_is_zero() {
    let rule: CommissionTierRule =
        CommissionTierRule::new(CommissionTier::Tier1, 0, Some(10), Decimal::new(50_000, 2));

    assert_eq!(compute_commission_amount(0, &rule), Decimal::new(0, 2));
}

#[test]
fn test_compute_amount_monotonic_in_count() {
    let rule: CommissionTierRule =
        CommissionTierRule::new(CommissionTier::Tier4, 31, None, Decimal::new(12_345, 2));

    let mut previous: Decimal = Decimal::ZERO;
    for count in 0..=200_u32 {
        let amount: Decimal = compute_commission_amount(count, &rule);
        assert!(amount >= previous, "amount decreased at count {count}");
        previous = amount;
    }
}

#[test]
fn test_compute_amount_rounds_half_to_even() {
    // 3 x 33.335 = 100.005, which rounds to 100.00 under half-to-even.
    let rule: CommissionTierRule =
        CommissionTierRule::new(CommissionTier::Tier1, 0, None, Decimal::new(33_335, 3));

    assert_eq!(compute_commission_amount(3, &rule), Decimal::new(10_000, 2));
}

#[test]
fn test_generate_commission_worked_example() {
    // 15 contracts under the example rules: Tier2 at 1000.00 -> 15000.00.
    let engine: TierEngine = engine();

    let result: GenerationResult = engine.generate_commission(
        1,
        january_2024(),
        15,
        &example_rules(),
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(result.commission.commission_id, None);
    assert_eq!(result.commission.freelancer_id, 1);
    assert_eq!(result.commission.tier, CommissionTier::Tier2);
    assert_eq!(result.commission.amount, Decimal::new(1_500_000, 2));
    assert_eq!(result.commission.status, CommissionStatus::Pending);
    assert!(!result.commission.payment_requested);
    assert!(result.commission.paid_date.is_none());
}

#[test]
fn test_generate_commission_emits_audit_event() {
    let engine: TierEngine = engine();

    let result: GenerationResult = engine.generate_commission(
        1,
        january_2024(),
        15,
        &example_rules(),
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(result.audit_event.action.name, "GenerateCommission");
    assert_eq!(result.audit_event.actor.id, "admin-123");
    assert_eq!(result.audit_event.before.data, "absent");
    assert!(result.audit_event.after.data.contains("status=pending"));
}
