// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    admin, commercial, create_test_cause, create_test_service, january_2024, seed_commercial,
    TestService,
};
use crate::{ApiError, GenerationStatus};
use agio_audit::AuditEvent;
use agio_domain::{Commission, CommissionStatus};
use time::macros::datetime;

/// Runs a generation pass for one commercial and returns the created
/// commission's ID together with the commercial's staff ID.
fn generate_for_one(service: &mut TestService, contracts: u32) -> (i64, i64) {
    let staff_id: i64 = seed_commercial(service, "Ana", contracts);
    let outcomes = service
        .generate_monthly_commissions(&admin(), january_2024(), &create_test_cause())
        .unwrap();
    let GenerationStatus::Created { commission_id } = outcomes[0].status else {
        panic!("generation did not create a commission");
    };
    (staff_id, commission_id)
}

#[test]
fn test_full_payment_lifecycle() {
    let mut service: TestService = create_test_service();
    let (ana, commission_id) = generate_for_one(&mut service, 15);
    let approved_at = datetime!(2024-02-01 09:00 UTC);

    let requested: Commission = service
        .request_payment(&commercial(ana), commission_id, &create_test_cause())
        .unwrap();
    assert!(requested.payment_requested);
    assert_eq!(requested.status, CommissionStatus::Pending);

    let approved: Commission = service
        .approve_payment(&admin(), commission_id, approved_at, &create_test_cause())
        .unwrap();
    assert_eq!(approved.status, CommissionStatus::Paid);
    assert_eq!(approved.paid_date, Some(approved_at));

    // The stored row reflects the full lifecycle.
    use agio_ledger::Ledger;
    let stored: Commission = service
        .ledger_mut()
        .get_commission(commission_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, CommissionStatus::Paid);
    assert_eq!(stored.paid_date, Some(approved_at));
    assert_eq!(stored.amount, approved.amount);
}

#[test]
fn test_lifecycle_records_one_audit_event_per_transition() {
    let mut service: TestService = create_test_service();
    let (ana, commission_id) = generate_for_one(&mut service, 15);

    service
        .request_payment(&commercial(ana), commission_id, &create_test_cause())
        .unwrap();
    service
        .approve_payment(
            &admin(),
            commission_id,
            datetime!(2024-02-01 09:00 UTC),
            &create_test_cause(),
        )
        .unwrap();

    let events: Vec<AuditEvent> = service.ledger_mut().list_audit_events().unwrap();
    let names: Vec<&str> = events.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["GenerateCommission", "RequestPayment", "ApprovePayment"]
    );
}

#[test]
fn test_only_owner_or_admin_may_request_payment() {
    let mut service: TestService = create_test_service();
    let (ana, commission_id) = generate_for_one(&mut service, 15);

    let intruder = commercial(ana + 1);
    let result = service.request_payment(&intruder, commission_id, &create_test_cause());
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));

    // Admin may request on the owner's behalf.
    let requested: Commission = service
        .request_payment(&admin(), commission_id, &create_test_cause())
        .unwrap();
    assert!(requested.payment_requested);
}

#[test]
fn test_approval_requires_admin() {
    let mut service: TestService = create_test_service();
    let (ana, commission_id) = generate_for_one(&mut service, 15);

    service
        .request_payment(&commercial(ana), commission_id, &create_test_cause())
        .unwrap();

    let result = service.approve_payment(
        &commercial(ana),
        commission_id,
        datetime!(2024-02-01 09:00 UTC),
        &create_test_cause(),
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_approval_before_request_is_rejected() {
    let mut service: TestService = create_test_service();
    let (_, commission_id) = generate_for_one(&mut service, 15);

    let result = service.approve_payment(
        &admin(),
        commission_id,
        datetime!(2024-02-01 09:00 UTC),
        &create_test_cause(),
    );
    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_repeated_request_is_a_signaled_failure() {
    let mut service: TestService = create_test_service();
    let (ana, commission_id) = generate_for_one(&mut service, 15);

    service
        .request_payment(&commercial(ana), commission_id, &create_test_cause())
        .unwrap();
    let second = service.request_payment(&commercial(ana), commission_id, &create_test_cause());
    assert!(matches!(second, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_repeated_approval_is_rejected() {
    let mut service: TestService = create_test_service();
    let (ana, commission_id) = generate_for_one(&mut service, 15);
    let approved_at = datetime!(2024-02-01 09:00 UTC);

    service
        .request_payment(&commercial(ana), commission_id, &create_test_cause())
        .unwrap();
    service
        .approve_payment(&admin(), commission_id, approved_at, &create_test_cause())
        .unwrap();

    let again = service.approve_payment(&admin(), commission_id, approved_at, &create_test_cause());
    assert!(matches!(again, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_unknown_commission_is_not_found() {
    let mut service: TestService = create_test_service();

    let result = service.request_payment(&admin(), 999, &create_test_cause());
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_amount_is_never_recalculated_by_transitions() {
    let mut service: TestService = create_test_service();
    let (ana, commission_id) = generate_for_one(&mut service, 15);

    use agio_ledger::Ledger;
    let generated: Commission = service
        .ledger_mut()
        .get_commission(commission_id)
        .unwrap()
        .unwrap();

    let requested: Commission = service
        .request_payment(&commercial(ana), commission_id, &create_test_cause())
        .unwrap();
    let approved: Commission = service
        .approve_payment(
            &admin(),
            commission_id,
            datetime!(2024-02-01 09:00 UTC),
            &create_test_cause(),
        )
        .unwrap();

    assert_eq!(requested.amount, generated.amount);
    assert_eq!(approved.amount, generated.amount);
    assert_eq!(approved.contracts_count, generated.contracts_count);
    assert_eq!(approved.tier, generated.tier);
}
