// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment state machine transitions.
//!
//! States: `pending(payment_requested=false)` -> `pending(payment_requested=true)`
//! -> `paid`. Transitions are operator-initiated only.
//!
//! The engine validates preconditions and describes the write; it never
//! performs it. Each transition carries the expected prior state so the
//! ledger can apply it as a single conditional update, which is what keeps
//! two concurrent approvals from double-setting the paid date.

use crate::error::CoreError;
use agio_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use agio_domain::{Commission, CommissionStatus};
use time::OffsetDateTime;

/// The state a commission must still be in for a transition's write to
/// apply.
///
/// The ledger compares this against the stored row inside the update
/// statement itself; zero rows affected means a concurrent transition won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedPriorState {
    /// The status the row must still have.
    pub status: CommissionStatus,
    /// The payment-requested flag the row must still have.
    pub payment_requested: bool,
}

/// A validated payment transition, ready to be applied by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTransition {
    /// The commission with the transition applied.
    pub commission: Commission,
    /// The state the stored row must match for the write to apply.
    pub expected: ExpectedPriorState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// Validates and describes a payment request.
///
/// Allowed only from `pending` with no prior request. A repeated request
/// fails rather than silently succeeding, so callers can tell
/// "already requested" apart from "success".
///
/// # Errors
///
/// Returns a `DomainViolation` wrapping `InvalidPaymentTransition` if the
/// commission is not in the required state.
pub fn request_payment(
    commission: &Commission,
    actor: Actor,
    cause: Cause,
) -> Result<PaymentTransition, CoreError> {
    commission.validate_request_payment()?;

    let expected: ExpectedPriorState = ExpectedPriorState {
        status: commission.status,
        payment_requested: false,
    };

    let mut updated: Commission = commission.clone();
    updated.payment_requested = true;

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("RequestPayment"),
            Some(format!(
                "Payment requested for commission of freelancer {} over {}",
                commission.freelancer_id, commission.period
            )),
        ),
        snapshot(commission),
        snapshot(&updated),
    );

    Ok(PaymentTransition {
        commission: updated,
        expected,
        audit_event,
    })
}

/// Validates and describes a payment approval.
///
/// Allowed only from `pending` with a payment request on record. Sets the
/// status to `paid` and stamps the paid date with the caller-supplied
/// timestamp, keeping the engine deterministic.
///
/// # Errors
///
/// Returns a `DomainViolation` wrapping `InvalidPaymentTransition` if the
/// commission is not in the required state.
pub fn approve_payment(
    commission: &Commission,
    approved_at: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<PaymentTransition, CoreError> {
    commission.validate_approve_payment()?;

    let expected: ExpectedPriorState = ExpectedPriorState {
        status: commission.status,
        payment_requested: true,
    };

    let mut updated: Commission = commission.clone();
    updated.status = CommissionStatus::Paid;
    updated.paid_date = Some(approved_at);

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("ApprovePayment"),
            Some(format!(
                "Payment of {} approved for freelancer {} over {}",
                commission.amount, commission.freelancer_id, commission.period
            )),
        ),
        snapshot(commission),
        snapshot(&updated),
    );

    Ok(PaymentTransition {
        commission: updated,
        expected,
        audit_event,
    })
}

fn snapshot(commission: &Commission) -> StateSnapshot {
    StateSnapshot::new(format!(
        "status={},payment_requested={},amount={}",
        commission.status, commission.payment_requested, commission.amount
    ))
}
