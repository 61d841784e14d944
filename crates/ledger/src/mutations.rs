// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger mutations.
//!
//! The two concurrency-sensitive writes live here. Commission creation is
//! a single `INSERT ... ON CONFLICT DO NOTHING` against the logical key,
//! and payment transitions are conditional updates that compare the stored
//! row against the expected prior state inside the statement itself. In
//! both cases the database, not application-level locking, arbitrates
//! between concurrent writers.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{
    NewAuditEventRow, NewCommissionRow, NewContactRow, NewContractRow, NewRuleRow, NewStaffRow,
};
use crate::diesel_schema::{audit_events, commission_rules, commissions, contacts, contracts, staff};
use crate::error::LedgerError;
use crate::queries;
use agio::PaymentTransition;
use agio_audit::AuditEvent;
use agio_domain::{Commission, RuleSet, StaffRole, format_date, format_datetime};
use diesel::prelude::*;
use time::Date;

/// The result of an idempotent commission insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The commission was created; the contained record carries its
    /// ledger-assigned identifier.
    Inserted(Commission),
    /// A commission with the same logical key already existed; the
    /// contained record is the stored one, untouched by this call.
    AlreadyExists(Commission),
}

/// Inserts a commission unless one already exists for the same freelancer
/// and period.
///
/// The uniqueness check and the insert are one atomic statement, so two
/// concurrent generation passes cannot both create a row for the same
/// logical key.
///
/// # Errors
///
/// Returns an error if the insert fails for any reason other than the
/// logical key already existing, or if the stored row cannot be read back.
pub fn insert_commission_if_absent(
    conn: &mut SqliteConnection,
    commission: &Commission,
) -> Result<InsertOutcome, LedgerError> {
    let row: NewCommissionRow = NewCommissionRow::from_domain(commission)?;

    let inserted: usize = diesel::insert_into(commissions::table)
        .values(&row)
        .on_conflict((
            commissions::freelancer_id,
            commissions::period_start,
            commissions::period_end,
        ))
        .do_nothing()
        .execute(conn)?;

    let stored: Commission =
        queries::find_commission(conn, commission.freelancer_id, &commission.period)?.ok_or_else(
            || {
                LedgerError::NotFound(format!(
                    "Commission for freelancer {} over {}",
                    commission.freelancer_id, commission.period
                ))
            },
        )?;

    if inserted == 1 {
        Ok(InsertOutcome::Inserted(stored))
    } else {
        Ok(InsertOutcome::AlreadyExists(stored))
    }
}

/// Applies a validated payment transition as a conditional update.
///
/// The update only matches if the stored row is still in the transition's
/// expected prior state. Returns `false` when zero rows were affected,
/// meaning a concurrent transition got there first; the caller decides
/// whether that is an error.
///
/// # Errors
///
/// Returns `LedgerError::MissingCommissionId` if the transition's
/// commission has never been persisted, or a database error if the update
/// fails.
pub fn apply_payment_transition(
    conn: &mut SqliteConnection,
    transition: &PaymentTransition,
) -> Result<bool, LedgerError> {
    let Some(commission_id) = transition.commission.commission_id else {
        return Err(LedgerError::MissingCommissionId);
    };

    let updated: usize = diesel::update(
        commissions::table
            .filter(commissions::commission_id.eq(commission_id))
            .filter(commissions::status.eq(transition.expected.status.as_str()))
            .filter(
                commissions::payment_requested
                    .eq(i32::from(transition.expected.payment_requested)),
            ),
    )
    .set((
        commissions::status.eq(transition.commission.status.as_str()),
        commissions::payment_requested.eq(i32::from(transition.commission.payment_requested)),
        commissions::paid_date.eq(transition.commission.paid_date.map(format_datetime)),
    ))
    .execute(conn)?;

    Ok(updated == 1)
}

/// Replaces the configured commission rule set.
///
/// The delete and the inserts run in one transaction, so readers never
/// observe a partially replaced set.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn replace_commission_rules(
    conn: &mut SqliteConnection,
    rules: &RuleSet,
) -> Result<(), LedgerError> {
    conn.transaction::<_, LedgerError, _>(|conn| {
        diesel::delete(commission_rules::table).execute(conn)?;

        for (position, rule) in rules.rules().iter().enumerate() {
            let position: i32 = i32::try_from(position).map_err(|_| {
                LedgerError::InvalidStoredData(format!(
                    "rule position {position} exceeds storable range"
                ))
            })?;
            let min_contracts: i32 = i32::try_from(rule.min_contracts).map_err(|_| {
                LedgerError::InvalidStoredData(format!(
                    "min_contracts {} exceeds storable range",
                    rule.min_contracts
                ))
            })?;
            let max_contracts: Option<i32> = match rule.max_contracts {
                Some(max) => Some(i32::try_from(max).map_err(|_| {
                    LedgerError::InvalidStoredData(format!(
                        "max_contracts {max} exceeds storable range"
                    ))
                })?),
                None => None,
            };

            let row: NewRuleRow = NewRuleRow {
                position,
                tier: rule.tier.as_str().to_string(),
                min_contracts,
                max_contracts,
                unit_amount: rule.unit_amount.to_string(),
            };
            diesel::insert_into(commission_rules::table)
                .values(&row)
                .execute(conn)?;
        }

        Ok(())
    })
}

/// Assigns a contact to a staff member.
///
/// Archived contacts are not assignable.
///
/// # Errors
///
/// Returns `LedgerError::NotFound` if the contact does not exist or is
/// archived.
pub fn record_assignment(
    conn: &mut SqliteConnection,
    contact_id: i64,
    staff_id: i64,
) -> Result<(), LedgerError> {
    let updated: usize = diesel::update(
        contacts::table
            .filter(contacts::contact_id.eq(contact_id))
            .filter(contacts::is_archived.eq(0)),
    )
    .set(contacts::owner_staff_id.eq(Some(staff_id)))
    .execute(conn)?;

    if updated == 0 {
        return Err(LedgerError::NotFound(format!(
            "Assignable contact {contact_id}"
        )));
    }
    Ok(())
}

/// Records an audit event.
///
/// # Arguments
///
/// * `event` - The audit event to record
///
/// # Returns
///
/// The event ID assigned to the recorded event.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn record_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, LedgerError> {
    let row: NewAuditEventRow = NewAuditEventRow {
        actor_id: event.actor.id.clone(),
        action_name: event.action.name.clone(),
        actor_json: serde_json::to_string(&event.actor)?,
        cause_json: serde_json::to_string(&event.cause)?,
        action_json: serde_json::to_string(&event.action)?,
        before_snapshot_json: serde_json::to_string(&event.before)?,
        after_snapshot_json: serde_json::to_string(&event.after)?,
    };

    diesel::insert_into(audit_events::table)
        .values(&row)
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Registers a staff member.
///
/// # Returns
///
/// The ledger-assigned staff ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn register_staff(
    conn: &mut SqliteConnection,
    display_name: &str,
    role: StaffRole,
) -> Result<i64, LedgerError> {
    let row: NewStaffRow = NewStaffRow {
        display_name: display_name.to_string(),
        role: role.as_str().to_string(),
        is_active: 1,
    };

    diesel::insert_into(staff::table).values(&row).execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Activates or deactivates a staff member.
///
/// # Errors
///
/// Returns `LedgerError::NotFound` if the staff member does not exist.
pub fn set_staff_active(
    conn: &mut SqliteConnection,
    staff_id: i64,
    active: bool,
) -> Result<(), LedgerError> {
    let updated: usize = diesel::update(staff::table.filter(staff::staff_id.eq(staff_id)))
        .set(staff::is_active.eq(i32::from(active)))
        .execute(conn)?;

    if updated == 0 {
        return Err(LedgerError::NotFound(format!("Staff {staff_id}")));
    }
    Ok(())
}

/// Creates an unowned, unarchived contact.
///
/// # Returns
///
/// The ledger-assigned contact ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_contact(conn: &mut SqliteConnection, display_name: &str) -> Result<i64, LedgerError> {
    let row: NewContactRow = NewContactRow {
        display_name: display_name.to_string(),
        owner_staff_id: None,
        is_archived: 0,
    };

    diesel::insert_into(contacts::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Archives a contact, removing it from assignment load counts.
///
/// # Errors
///
/// Returns `LedgerError::NotFound` if the contact does not exist.
pub fn archive_contact(conn: &mut SqliteConnection, contact_id: i64) -> Result<(), LedgerError> {
    let updated: usize =
        diesel::update(contacts::table.filter(contacts::contact_id.eq(contact_id)))
            .set(contacts::is_archived.eq(1))
            .execute(conn)?;

    if updated == 0 {
        return Err(LedgerError::NotFound(format!("Contact {contact_id}")));
    }
    Ok(())
}

/// Records a validated contract for a freelancer.
///
/// # Returns
///
/// The ledger-assigned contract ID.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the freelancer
/// does not exist.
pub fn record_validated_contract(
    conn: &mut SqliteConnection,
    freelancer_id: i64,
    validated_on: Date,
) -> Result<i64, LedgerError> {
    let row: NewContractRow = NewContractRow {
        freelancer_id,
        validated_on: format_date(validated_on),
    };

    diesel::insert_into(contracts::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}
