// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_actor, create_test_cause, january_2024};
use crate::{CoreError, PaymentTransition, approve_payment, request_payment};
use agio_domain::{Commission, CommissionStatus, CommissionTier, DomainError};
use rust_decimal::Decimal;
use time::macros::datetime;

fn pending_commission() -> Commission {
    Commission {
        commission_id: Some(12),
        freelancer_id: 1,
        period: january_2024(),
        contracts_count: 15,
        tier: CommissionTier::Tier2,
        amount: Decimal::new(1_500_000, 2),
        status: CommissionStatus::Pending,
        payment_requested: false,
        paid_date: None,
    }
}

#[test]
fn test_request_payment_sets_flag_and_expected_state() {
    let commission: Commission = pending_commission();

    let transition: PaymentTransition =
        request_payment(&commission, create_test_actor(), create_test_cause()).unwrap();

    assert!(transition.commission.payment_requested);
    assert_eq!(transition.commission.status, CommissionStatus::Pending);
    assert_eq!(transition.expected.status, CommissionStatus::Pending);
    assert!(!transition.expected.payment_requested);
    assert_eq!(transition.audit_event.action.name, "RequestPayment");
}

#[test]
fn test_request_payment_twice_fails_on_second_call() {
    let commission: Commission = pending_commission();
    let first: PaymentTransition =
        request_payment(&commission, create_test_actor(), create_test_cause()).unwrap();

    let second = request_payment(&first.commission, create_test_actor(), create_test_cause());
    assert!(matches!(
        second,
        Err(CoreError::DomainViolation(
            DomainError::InvalidPaymentTransition { .. }
        ))
    ));
}

#[test]
fn test_approve_before_request_fails() {
    let commission: Commission = pending_commission();

    let result = approve_payment(
        &commission,
        datetime!(2024-02-01 09:00 UTC),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidPaymentTransition { .. }
        ))
    ));
}

#[test]
fn test_request_then_approve_reaches_paid() {
    let commission: Commission = pending_commission();
    let approved_at = datetime!(2024-02-01 09:00 UTC);

    let requested: PaymentTransition =
        request_payment(&commission, create_test_actor(), create_test_cause()).unwrap();
    let approved: PaymentTransition = approve_payment(
        &requested.commission,
        approved_at,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(approved.commission.status, CommissionStatus::Paid);
    assert!(approved.commission.payment_requested);
    assert_eq!(approved.commission.paid_date, Some(approved_at));
    assert_eq!(approved.expected.status, CommissionStatus::Pending);
    assert!(approved.expected.payment_requested);
}

#[test]
fn test_approve_twice_fails_on_second_call() {
    let commission: Commission = pending_commission();
    let approved_at = datetime!(2024-02-01 09:00 UTC);

    let requested: PaymentTransition =
        request_payment(&commission, create_test_actor(), create_test_cause()).unwrap();
    let approved: PaymentTransition = approve_payment(
        &requested.commission,
        approved_at,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let again = approve_payment(
        &approved.commission,
        approved_at,
        create_test_actor(),
        create_test_cause(),
    );
    assert!(again.is_err());
}

#[test]
fn test_transition_audit_events_capture_before_and_after() {
    let commission: Commission = pending_commission();

    let transition: PaymentTransition =
        request_payment(&commission, create_test_actor(), create_test_cause()).unwrap();

    assert!(
        transition
            .audit_event
            .before
            .data
            .contains("payment_requested=false")
    );
    assert!(
        transition
            .audit_event
            .after
            .data
            .contains("payment_requested=true")
    );
}

#[test]
fn test_amount_is_not_recalculated_by_transitions() {
    let commission: Commission = pending_commission();

    let requested: PaymentTransition =
        request_payment(&commission, create_test_actor(), create_test_cause()).unwrap();

    assert_eq!(requested.commission.amount, commission.amount);
    assert_eq!(requested.commission.tier, commission.tier);
    assert_eq!(requested.commission.contracts_count, commission.contracts_count);
}
