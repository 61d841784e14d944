// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only ledger queries.
//!
//! All functions take a connection and return domain values; row structs
//! never escape this crate.

use crate::data_models::{AuditEventRow, CommissionRow, RuleRow};
use crate::diesel_schema::{audit_events, commission_rules, commissions, contacts, contracts, staff};
use crate::error::LedgerError;
use agio_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use agio_domain::{
    AssignmentCandidate, Commission, CommissionTierRule, Period, RuleSet, StaffRole, format_date,
};
use diesel::dsl::count_star;
use diesel::prelude::*;
use std::collections::HashMap;

/// Loads the configured commission rule set, ordered by position.
///
/// An empty table yields an empty rule set; deciding what to do with an
/// empty or malformed set is the tier engine's job, not the ledger's.
///
/// # Errors
///
/// Returns an error if the query fails or a stored rule cannot be parsed.
pub fn load_commission_rules(conn: &mut SqliteConnection) -> Result<RuleSet, LedgerError> {
    let rows: Vec<RuleRow> = commission_rules::table
        .order(commission_rules::position.asc())
        .load::<RuleRow>(conn)?;

    let rules: Vec<CommissionTierRule> = rows
        .into_iter()
        .map(RuleRow::into_domain)
        .collect::<Result<Vec<CommissionTierRule>, LedgerError>>()?;

    Ok(RuleSet::new(rules))
}

/// Finds a commission by its logical key: freelancer and period.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row cannot be parsed.
pub fn find_commission(
    conn: &mut SqliteConnection,
    freelancer_id: i64,
    period: &Period,
) -> Result<Option<Commission>, LedgerError> {
    let row: Option<CommissionRow> = commissions::table
        .filter(commissions::freelancer_id.eq(freelancer_id))
        .filter(commissions::period_start.eq(format_date(period.start())))
        .filter(commissions::period_end.eq(format_date(period.end())))
        .first::<CommissionRow>(conn)
        .optional()?;

    row.map(CommissionRow::into_domain).transpose()
}

/// Retrieves a commission by its ledger identifier.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row cannot be parsed.
pub fn get_commission(
    conn: &mut SqliteConnection,
    commission_id: i64,
) -> Result<Option<Commission>, LedgerError> {
    let row: Option<CommissionRow> = commissions::table
        .filter(commissions::commission_id.eq(commission_id))
        .first::<CommissionRow>(conn)
        .optional()?;

    row.map(CommissionRow::into_domain).transpose()
}

/// Lists all commissions for a freelancer, ordered by period start.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be parsed.
pub fn list_commissions_for_freelancer(
    conn: &mut SqliteConnection,
    freelancer_id: i64,
) -> Result<Vec<Commission>, LedgerError> {
    let rows: Vec<CommissionRow> = commissions::table
        .filter(commissions::freelancer_id.eq(freelancer_id))
        .order(commissions::period_start.asc())
        .load::<CommissionRow>(conn)?;

    rows.into_iter().map(CommissionRow::into_domain).collect()
}

/// Counts validated contracts per active commercial over a period.
///
/// Every active commercial appears in the result, including those with no
/// validated contracts in the period; the generation pass produces a
/// commission for each of them. Period bounds are inclusive and the ISO
/// date encoding makes the string comparison chronological.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn validated_contract_counts(
    conn: &mut SqliteConnection,
    period: &Period,
) -> Result<Vec<(i64, u32)>, LedgerError> {
    let commercial_ids: Vec<i64> = staff::table
        .filter(staff::role.eq(StaffRole::Commercial.as_str()))
        .filter(staff::is_active.eq(1))
        .order(staff::staff_id.asc())
        .select(staff::staff_id)
        .load::<i64>(conn)?;

    let counted: Vec<(i64, i64)> = contracts::table
        .filter(contracts::validated_on.between(
            format_date(period.start()),
            format_date(period.end()),
        ))
        .group_by(contracts::freelancer_id)
        .select((contracts::freelancer_id, count_star()))
        .load::<(i64, i64)>(conn)?;

    let by_freelancer: HashMap<i64, i64> = counted.into_iter().collect();

    commercial_ids
        .into_iter()
        .map(|staff_id| {
            let count: i64 = by_freelancer.get(&staff_id).copied().unwrap_or(0);
            let count: u32 = u32::try_from(count).map_err(|_| {
                LedgerError::InvalidStoredData(format!(
                    "contract count {count} for staff {staff_id} exceeds storable range"
                ))
            })?;
            Ok((staff_id, count))
        })
        .collect()
}

/// Lists active account managers with their current assignment load.
///
/// Load counts only non-archived contacts. Candidates are ordered by
/// staff identifier, which is creation order; the selection engine's
/// tie-break therefore favors the longest-standing candidate.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_assignment_candidates(
    conn: &mut SqliteConnection,
) -> Result<Vec<AssignmentCandidate>, LedgerError> {
    let manager_ids: Vec<i64> = staff::table
        .filter(staff::role.eq(StaffRole::AccountManager.as_str()))
        .filter(staff::is_active.eq(1))
        .order(staff::staff_id.asc())
        .select(staff::staff_id)
        .load::<i64>(conn)?;

    let counted: Vec<(Option<i64>, i64)> = contacts::table
        .filter(contacts::is_archived.eq(0))
        .filter(contacts::owner_staff_id.is_not_null())
        .group_by(contacts::owner_staff_id)
        .select((contacts::owner_staff_id, count_star()))
        .load::<(Option<i64>, i64)>(conn)?;

    let by_owner: HashMap<i64, i64> = counted
        .into_iter()
        .filter_map(|(owner, count)| owner.map(|id| (id, count)))
        .collect();

    manager_ids
        .into_iter()
        .map(|staff_id| {
            let load: i64 = by_owner.get(&staff_id).copied().unwrap_or(0);
            let load: u32 = u32::try_from(load).map_err(|_| {
                LedgerError::InvalidStoredData(format!(
                    "assignment load {load} for staff {staff_id} exceeds storable range"
                ))
            })?;
            Ok(AssignmentCandidate::new(staff_id, load))
        })
        .collect()
}

/// Looks up a staff member's role, or `None` if the staff does not exist.
///
/// # Errors
///
/// Returns an error if the query fails or the stored role is unknown.
pub fn get_staff_role(
    conn: &mut SqliteConnection,
    staff_id: i64,
) -> Result<Option<StaffRole>, LedgerError> {
    let role: Option<String> = staff::table
        .filter(staff::staff_id.eq(staff_id))
        .select(staff::role)
        .first::<String>(conn)
        .optional()?;

    role.map(|r| r.parse::<StaffRole>().map_err(LedgerError::from))
        .transpose()
}

/// Retrieves the owner of a contact.
///
/// # Errors
///
/// Returns `LedgerError::NotFound` if the contact does not exist.
pub fn get_contact_owner(
    conn: &mut SqliteConnection,
    contact_id: i64,
) -> Result<Option<i64>, LedgerError> {
    contacts::table
        .filter(contacts::contact_id.eq(contact_id))
        .select(contacts::owner_staff_id)
        .first::<Option<i64>>(conn)
        .optional()?
        .ok_or_else(|| LedgerError::NotFound(format!("Contact {contact_id}")))
}

/// Lists all recorded audit events in insertion order.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn list_audit_events(conn: &mut SqliteConnection) -> Result<Vec<AuditEvent>, LedgerError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?;

    rows.into_iter()
        .map(|row| {
            let actor: Actor = serde_json::from_str(&row.actor_json)?;
            let cause: Cause = serde_json::from_str(&row.cause_json)?;
            let action: Action = serde_json::from_str(&row.action_json)?;
            let before: StateSnapshot = serde_json::from_str(&row.before_snapshot_json)?;
            let after: StateSnapshot = serde_json::from_str(&row.after_snapshot_json)?;
            Ok(AuditEvent::new(actor, cause, action, before, after))
        })
        .collect()
}
