// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization types and role gates.
//!
//! Roles gate the caller-facing operations only. The engines and the
//! ledger never inspect roles; a transition that passes the gate is
//! validated again by the state machine.

use agio_audit::Actor;
use agio_domain::StaffRole;

use crate::error::AuthError;

/// An authenticated staff member with an associated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The staff member's ledger identifier.
    pub staff_id: i64,
    /// The role assigned to this staff member.
    pub role: StaffRole,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `staff_id` - The staff member's ledger identifier
    /// * `role` - The role assigned to this staff member
    #[must_use]
    pub const fn new(staff_id: i64, role: StaffRole) -> Self {
        Self { staff_id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.staff_id.to_string(), self.role.as_str().to_string())
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to run a generation pass.
    ///
    /// Only admins may generate commissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_generate_commissions(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            StaffRole::Admin => Ok(()),
            StaffRole::Commercial | StaffRole::AccountManager => Err(AuthError::Unauthorized {
                action: String::from("generate_monthly_commissions"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor is authorized to replace the commission rules.
    ///
    /// Only admins may change the rule configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_replace_rules(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            StaffRole::Admin => Ok(()),
            StaffRole::Commercial | StaffRole::AccountManager => Err(AuthError::Unauthorized {
                action: String::from("replace_commission_rules"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor is authorized to request payment of a
    /// commission.
    ///
    /// Commercials may request payment of their own commissions; admins
    /// may request on anyone's behalf.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `owner_staff_id` - The freelancer who owns the commission
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither an admin nor the owning
    /// commercial.
    pub fn authorize_request_payment(
        actor: &AuthenticatedActor,
        owner_staff_id: i64,
    ) -> Result<(), AuthError> {
        match actor.role {
            StaffRole::Admin => Ok(()),
            StaffRole::Commercial if actor.staff_id == owner_staff_id => Ok(()),
            StaffRole::Commercial | StaffRole::AccountManager => Err(AuthError::Unauthorized {
                action: String::from("request_payment"),
                required_role: String::from("Admin or owning Commercial"),
            }),
        }
    }

    /// Checks if an actor is authorized to approve a payment.
    ///
    /// Only admins may approve payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_approve_payment(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            StaffRole::Admin => Ok(()),
            StaffRole::Commercial | StaffRole::AccountManager => Err(AuthError::Unauthorized {
                action: String::from("approve_payment"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor is authorized to assign a contact.
    ///
    /// Admins and account managers may trigger assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a commercial.
    pub fn authorize_assign_contact(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            StaffRole::Admin | StaffRole::AccountManager => Ok(()),
            StaffRole::Commercial => Err(AuthError::Unauthorized {
                action: String::from("assign_contact"),
                required_role: String::from("Admin or AccountManager"),
            }),
        }
    }
}
