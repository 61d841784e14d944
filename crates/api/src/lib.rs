// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller-facing operations for the Agio commission core.
//!
//! [`CommissionService`] composes the tier engine, the payment state
//! machine, and the assignment engine on top of any [`Ledger`]
//! implementation. It owns the concerns the engines deliberately avoid:
//! role gates, error translation, audit recording, and operator
//! notification.
//!
//! Every successful mutation records exactly one audit event. Failed
//! operations record nothing.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod notify;
mod request_response;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_ledger_error,
};
pub use notify::{NotificationKind, Notifier, TracingNotifier};
pub use request_response::{AssignmentOutcome, GenerationOutcome, GenerationStatus};

use agio::{
    DistributionStat, GenerationResult, PaymentTransition, StandardRuleProvider, TierEngine,
    compute_distribution_stats, select_least_loaded, validate_rule_set,
};
use agio_audit::{Action, AuditEvent, Cause, StateSnapshot};
use agio_domain::{AssignmentCandidate, Commission, Period, RuleSet};
use agio_ledger::{InsertOutcome, Ledger};
use time::OffsetDateTime;

/// The caller-facing operations, generic over ledger and notifier.
pub struct CommissionService<L: Ledger, N: Notifier> {
    ledger: L,
    notifier: N,
    engine: TierEngine,
}

impl<L: Ledger, N: Notifier> CommissionService<L, N> {
    /// Creates a new service over a ledger and a notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in fallback rule set fails its own
    /// partition validation, which indicates a defect rather than bad
    /// input.
    pub fn new(ledger: L, notifier: N) -> Result<Self, ApiError> {
        let engine: TierEngine =
            TierEngine::new(&StandardRuleProvider).map_err(translate_core_error)?;
        Ok(Self {
            ledger,
            notifier,
            engine,
        })
    }

    /// Returns a mutable handle to the underlying ledger.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Runs the monthly generation pass for a period.
    ///
    /// Creates one pending commission per active commercial, computed
    /// from their validated-contract count over the period under the
    /// configured rule set. The pass is idempotent: freelancers already
    /// covered for the period are reported as skipped, and a failure for
    /// one freelancer does not abort the pass for the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the ledger cannot
    /// be read. Per-freelancer failures are reported in the outcome list,
    /// not as errors.
    pub fn generate_monthly_commissions(
        &mut self,
        actor: &AuthenticatedActor,
        period: Period,
        cause: &Cause,
    ) -> Result<Vec<GenerationOutcome>, ApiError> {
        AuthorizationService::authorize_generate_commissions(actor)?;

        let rules: RuleSet = self
            .ledger
            .commission_rules()
            .map_err(translate_ledger_error)?;
        let counts: Vec<(i64, u32)> = self
            .ledger
            .validated_contract_counts(&period)
            .map_err(translate_ledger_error)?;

        let mut outcomes: Vec<GenerationOutcome> = Vec::with_capacity(counts.len());
        for (freelancer_id, contracts_count) in counts {
            let result: GenerationResult = self.engine.generate_commission(
                freelancer_id,
                period,
                contracts_count,
                &rules,
                actor.to_audit_actor(),
                cause.clone(),
            );

            let status: GenerationStatus =
                match self.ledger.insert_commission_if_absent(&result.commission) {
                    Ok(InsertOutcome::Inserted(stored)) => {
                        match stored.commission_id {
                            Some(commission_id) => {
                                self.ledger
                                    .record_audit_event(&result.audit_event)
                                    .map_err(translate_ledger_error)?;
                                GenerationStatus::Created { commission_id }
                            }
                            None => GenerationStatus::Failed {
                                message: String::from("inserted commission has no identifier"),
                            },
                        }
                    }
                    Ok(InsertOutcome::AlreadyExists(existing)) => match existing.commission_id {
                        Some(commission_id) => GenerationStatus::SkippedDuplicate { commission_id },
                        None => GenerationStatus::Failed {
                            message: String::from("existing commission has no identifier"),
                        },
                    },
                    Err(e) => GenerationStatus::Failed {
                        message: e.to_string(),
                    },
                };

            outcomes.push(GenerationOutcome {
                freelancer_id,
                status,
            });
        }

        let created: usize = outcomes
            .iter()
            .filter(|o| matches!(o.status, GenerationStatus::Created { .. }))
            .count();
        let skipped: usize = outcomes
            .iter()
            .filter(|o| matches!(o.status, GenerationStatus::SkippedDuplicate { .. }))
            .count();
        let failed: usize = outcomes.len() - created - skipped;

        let kind: NotificationKind = if failed == 0 {
            NotificationKind::Success
        } else {
            NotificationKind::Error
        };
        self.notifier.notify(
            kind,
            &format!(
                "Generation pass over {period}: {created} created, {skipped} skipped, {failed} failed"
            ),
        );

        Ok(outcomes)
    }

    /// Requests payment of a commission.
    ///
    /// Allowed for the owning commercial or an admin, and only while the
    /// commission is pending with no prior request.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not authorized, the commission
    /// does not exist, the state machine rejects the transition, or the
    /// stored row changed concurrently.
    pub fn request_payment(
        &mut self,
        actor: &AuthenticatedActor,
        commission_id: i64,
        cause: &Cause,
    ) -> Result<Commission, ApiError> {
        let commission: Commission = self.get_existing_commission(commission_id)?;
        AuthorizationService::authorize_request_payment(actor, commission.freelancer_id)?;

        let transition: PaymentTransition =
            agio::request_payment(&commission, actor.to_audit_actor(), cause.clone())
                .map_err(translate_core_error)?;

        self.apply_transition(commission_id, &transition)?;
        self.notifier.notify(
            NotificationKind::Success,
            &format!("Payment requested for commission {commission_id}"),
        );
        Ok(transition.commission)
    }

    /// Approves payment of a commission, stamping the paid date.
    ///
    /// Admin-only. Allowed only while the commission is pending with a
    /// payment request on record.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the commission does
    /// not exist, the state machine rejects the transition, or the stored
    /// row changed concurrently.
    pub fn approve_payment(
        &mut self,
        actor: &AuthenticatedActor,
        commission_id: i64,
        approved_at: OffsetDateTime,
        cause: &Cause,
    ) -> Result<Commission, ApiError> {
        AuthorizationService::authorize_approve_payment(actor)?;
        let commission: Commission = self.get_existing_commission(commission_id)?;

        let transition: PaymentTransition = agio::approve_payment(
            &commission,
            approved_at,
            actor.to_audit_actor(),
            cause.clone(),
        )
        .map_err(translate_core_error)?;

        self.apply_transition(commission_id, &transition)?;
        self.notifier.notify(
            NotificationKind::Success,
            &format!(
                "Payment of {} approved for commission {commission_id}",
                transition.commission.amount
            ),
        );
        Ok(transition.commission)
    }

    /// Assigns a contact to the least-loaded active account manager.
    ///
    /// Load is the count of non-archived contacts each manager owns,
    /// recomputed from the ledger on every call. Ties go to the
    /// longest-standing candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a commercial, no candidates are
    /// available, or the contact does not exist or is archived.
    pub fn assign_contact(
        &mut self,
        actor: &AuthenticatedActor,
        contact_id: i64,
        cause: &Cause,
    ) -> Result<AssignmentOutcome, ApiError> {
        AuthorizationService::authorize_assign_contact(actor)?;

        let previous_owner: Option<i64> = self
            .ledger
            .get_contact_owner(contact_id)
            .map_err(|e| match e {
                agio_ledger::LedgerError::NotFound(_) => ApiError::ResourceNotFound {
                    resource_type: String::from("Contact"),
                    message: format!("Contact {contact_id}"),
                },
                other => translate_ledger_error(other),
            })?;

        let candidates: Vec<AssignmentCandidate> = self
            .ledger
            .list_assignment_candidates()
            .map_err(translate_ledger_error)?;
        let staff_id: i64 = select_least_loaded(&candidates).map_err(translate_core_error)?;

        self.ledger
            .record_assignment(contact_id, staff_id)
            .map_err(translate_ledger_error)?;

        let before: String = previous_owner
            .map_or_else(|| String::from("owner=none"), |id| format!("owner={id}"));
        let event: AuditEvent = AuditEvent::new(
            actor.to_audit_actor(),
            cause.clone(),
            Action::new(
                String::from("AssignContact"),
                Some(format!("Contact {contact_id} assigned to staff {staff_id}")),
            ),
            StateSnapshot::new(before),
            StateSnapshot::new(format!("owner={staff_id}")),
        );
        self.ledger
            .record_audit_event(&event)
            .map_err(translate_ledger_error)?;

        self.notifier.notify(
            NotificationKind::Success,
            &format!("Contact {contact_id} assigned to staff {staff_id}"),
        );
        Ok(AssignmentOutcome {
            contact_id,
            staff_id,
        })
    }

    /// Reports the assignment distribution across active account
    /// managers.
    ///
    /// Read-only and open to every role.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn distribution_stats(&mut self) -> Result<Vec<DistributionStat>, ApiError> {
        let candidates: Vec<AssignmentCandidate> = self
            .ledger
            .list_assignment_candidates()
            .map_err(translate_ledger_error)?;
        Ok(compute_distribution_stats(&candidates))
    }

    /// Replaces the configured commission rule set.
    ///
    /// Admin-only. The new set must satisfy the partition invariant
    /// before it is stored; a set that fails validation is rejected and
    /// the stored configuration is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the set fails
    /// validation, or the ledger cannot be written.
    pub fn replace_commission_rules(
        &mut self,
        actor: &AuthenticatedActor,
        rules: &RuleSet,
        cause: &Cause,
    ) -> Result<(), ApiError> {
        AuthorizationService::authorize_replace_rules(actor)?;
        validate_rule_set(rules).map_err(translate_domain_error)?;

        let previous: RuleSet = self
            .ledger
            .commission_rules()
            .map_err(translate_ledger_error)?;
        self.ledger
            .replace_commission_rules(rules)
            .map_err(translate_ledger_error)?;

        let event: AuditEvent = AuditEvent::new(
            actor.to_audit_actor(),
            cause.clone(),
            Action::new(
                String::from("ReplaceCommissionRules"),
                Some(format!("{} rules configured", rules.rules().len())),
            ),
            StateSnapshot::new(format!("rules={}", previous.rules().len())),
            StateSnapshot::new(format!("rules={}", rules.rules().len())),
        );
        self.ledger
            .record_audit_event(&event)
            .map_err(translate_ledger_error)?;

        self.notifier.notify(
            NotificationKind::Success,
            &format!("Commission rule set replaced ({} rules)", rules.rules().len()),
        );
        Ok(())
    }

    fn get_existing_commission(&mut self, commission_id: i64) -> Result<Commission, ApiError> {
        self.ledger
            .get_commission(commission_id)
            .map_err(translate_ledger_error)?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Commission"),
                message: format!("Commission {commission_id}"),
            })
    }

    fn apply_transition(
        &mut self,
        commission_id: i64,
        transition: &PaymentTransition,
    ) -> Result<(), ApiError> {
        let applied: bool = self
            .ledger
            .apply_payment_transition(transition)
            .map_err(translate_ledger_error)?;

        if !applied {
            self.notifier.notify(
                NotificationKind::Error,
                &format!("Commission {commission_id} changed state concurrently; not applied"),
            );
            return Err(ApiError::ConcurrentModification {
                resource_type: String::from("Commission"),
                message: format!(
                    "Commission {commission_id} was no longer in the expected state"
                ),
            });
        }

        self.ledger
            .record_audit_event(&transition.audit_event)
            .map_err(translate_ledger_error)?;
        Ok(())
    }
}
