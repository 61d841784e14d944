// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agio_audit::{Actor, Cause};
use agio_domain::{CommissionTier, CommissionTierRule, Period, RuleSet};
use rust_decimal::Decimal;
use time::macros::date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Operator request"))
}

pub fn january_2024() -> Period {
    Period::new(date!(2024 - 01 - 01), date!(2024 - 01 - 31)).unwrap()
}

/// The rule set from the worked example: four brackets with a flat
/// 1000.00 per contract in the second bracket.
pub fn example_rules() -> RuleSet {
    RuleSet::new(vec![
        CommissionTierRule::new(CommissionTier::Tier1, 0, Some(10), Decimal::new(50_000, 2)),
        CommissionTierRule::new(CommissionTier::Tier2, 11, Some(20), Decimal::new(100_000, 2)),
        CommissionTierRule::new(CommissionTier::Tier3, 21, Some(30), Decimal::new(150_000, 2)),
        CommissionTierRule::new(CommissionTier::Tier4, 31, None, Decimal::new(200_000, 2)),
    ])
}
