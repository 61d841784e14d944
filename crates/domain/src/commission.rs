// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commission records and the payment state machine.
//!
//! A commission is generated once per freelancer per accounting period and
//! then only moves through two operator-initiated transitions:
//! payment request and payment approval. Amounts are fixed at generation
//! time and never recalculated retroactively.

use crate::error::DomainError;
use crate::period::Period;
use crate::tier::CommissionTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Commission payment status.
///
/// Only `Pending` and `Paid` are driven by this core. `Processing` and
/// `Rejected` are reserved for external administrative overrides: they are
/// representable and persistable but no transition here produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionStatus {
    /// Generated, awaiting payment request and approval.
    Pending,
    /// Reserved for external payment-processor integration.
    Processing,
    /// Payment approved and dated.
    Paid,
    /// Reserved for external administrative rejection.
    Rejected,
}

impl CommissionStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for CommissionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "paid" => Ok(Self::Paid),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidCommissionStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A commission awarded to a freelancer for one accounting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    /// Ledger-assigned identifier. `None` until persisted.
    pub commission_id: Option<i64>,
    /// The owning freelancer. Immutable after creation.
    pub freelancer_id: i64,
    /// The accounting period. Part of the logical key, immutable.
    pub period: Period,
    /// The validated-contract count the amount was derived from.
    pub contracts_count: u32,
    /// The tier matched at generation time.
    pub tier: CommissionTier,
    /// The computed amount, fixed at generation time.
    pub amount: Decimal,
    /// Current payment status.
    pub status: CommissionStatus,
    /// Whether the freelancer has requested payment.
    pub payment_requested: bool,
    /// Set exactly once, when the status transitions to `Paid`.
    pub paid_date: Option<OffsetDateTime>,
}

impl Commission {
    /// Validates the payment-request precondition.
    ///
    /// A request is only permitted while the commission is `Pending` and
    /// payment has not already been requested. A repeated request is a
    /// signaled failure, not a silent no-op: callers distinguish
    /// "already requested" from "success".
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPaymentTransition` if the precondition
    /// does not hold.
    pub fn validate_request_payment(&self) -> Result<(), DomainError> {
        if self.status != CommissionStatus::Pending {
            return Err(self.transition_error(
                "RequestPayment",
                "payment can only be requested while the commission is pending",
            ));
        }
        if self.payment_requested {
            return Err(self.transition_error(
                "RequestPayment",
                "payment has already been requested",
            ));
        }
        Ok(())
    }

    /// Validates the payment-approval precondition.
    ///
    /// Approval is only permitted while the commission is `Pending` and a
    /// payment request is on record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPaymentTransition` if the precondition
    /// does not hold.
    pub fn validate_approve_payment(&self) -> Result<(), DomainError> {
        if self.status == CommissionStatus::Paid {
            return Err(
                self.transition_error("ApprovePayment", "the commission is already paid")
            );
        }
        if self.status != CommissionStatus::Pending {
            return Err(self.transition_error(
                "ApprovePayment",
                "payment can only be approved while the commission is pending",
            ));
        }
        if !self.payment_requested {
            return Err(self.transition_error(
                "ApprovePayment",
                "payment has not been requested",
            ));
        }
        Ok(())
    }

    fn transition_error(&self, action: &str, reason: &str) -> DomainError {
        DomainError::InvalidPaymentTransition {
            action: action.to_string(),
            status: self.status.as_str().to_string(),
            payment_requested: self.payment_requested,
            reason: reason.to_string(),
        }
    }
}
