// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use agio_audit::{Actor, Cause};
use agio_domain::{Commission, CommissionStatus, CommissionTier, Period, StaffRole};
use rust_decimal::Decimal;
use time::macros::date;

pub fn open_ledger() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn january_2024() -> Period {
    Period::new(date!(2024 - 01 - 01), date!(2024 - 01 - 31)).unwrap()
}

pub fn register_commercial(ledger: &mut Persistence, name: &str) -> i64 {
    ledger.register_staff(name, StaffRole::Commercial).unwrap()
}

pub fn register_manager(ledger: &mut Persistence, name: &str) -> i64 {
    ledger
        .register_staff(name, StaffRole::AccountManager)
        .unwrap()
}

/// A freshly generated, not-yet-persisted pending commission.
pub fn pending_commission(freelancer_id: i64) -> Commission {
    Commission {
        commission_id: None,
        freelancer_id,
        period: january_2024(),
        contracts_count: 15,
        tier: CommissionTier::Tier2,
        amount: Decimal::new(1_500_000, 2),
        status: CommissionStatus::Pending,
        payment_requested: false,
        paid_date: None,
    }
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Operator request"))
}
