// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the diesel schema and the domain types.
//!
//! Dates and timestamps are stored as ISO 8601 text so lexicographic
//! comparison in SQL matches chronological order. Amounts are stored as
//! decimal strings; they are never stored as floats.

use crate::diesel_schema::{audit_events, commission_rules, commissions, contacts, contracts, staff};
use crate::error::LedgerError;
use agio_domain::{
    Commission, CommissionStatus, CommissionTier, CommissionTierRule, Period, format_date,
    format_datetime, parse_amount, parse_date, parse_datetime,
};
use diesel::prelude::*;
use std::str::FromStr;
use time::OffsetDateTime;

/// A stored commission row.
#[derive(Debug, Clone, Queryable)]
pub struct CommissionRow {
    pub commission_id: i64,
    pub freelancer_id: i64,
    pub period_start: String,
    pub period_end: String,
    pub contracts_count: i32,
    pub tier: String,
    pub amount: String,
    pub status: String,
    pub payment_requested: i32,
    pub paid_date: Option<String>,
}

impl CommissionRow {
    /// Converts the stored row back into a domain commission.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidStoredData` if any stored field fails
    /// to parse into its domain form.
    pub fn into_domain(self) -> Result<Commission, LedgerError> {
        let contracts_count: u32 = u32::try_from(self.contracts_count).map_err(|_| {
            LedgerError::InvalidStoredData(format!(
                "negative contracts_count {} on commission {}",
                self.contracts_count, self.commission_id
            ))
        })?;

        let period: Period = Period::new(
            parse_date(&self.period_start)?,
            parse_date(&self.period_end)?,
        )?;

        let paid_date: Option<OffsetDateTime> = match self.paid_date {
            Some(s) => Some(parse_datetime(&s)?),
            None => None,
        };

        Ok(Commission {
            commission_id: Some(self.commission_id),
            freelancer_id: self.freelancer_id,
            period,
            contracts_count,
            tier: CommissionTier::from_str(&self.tier)?,
            amount: parse_amount(&self.amount)?,
            status: CommissionStatus::from_str(&self.status)?,
            payment_requested: self.payment_requested != 0,
            paid_date,
        })
    }
}

/// A commission row ready for insertion. The ledger assigns the ID.
#[derive(Debug, Insertable)]
#[diesel(table_name = commissions)]
pub struct NewCommissionRow {
    pub freelancer_id: i64,
    pub period_start: String,
    pub period_end: String,
    pub contracts_count: i32,
    pub tier: String,
    pub amount: String,
    pub status: String,
    pub payment_requested: i32,
    pub paid_date: Option<String>,
}

impl NewCommissionRow {
    /// Builds an insertable row from a domain commission.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidStoredData` if the contract count does
    /// not fit the stored integer width.
    pub fn from_domain(commission: &Commission) -> Result<Self, LedgerError> {
        let contracts_count: i32 = i32::try_from(commission.contracts_count).map_err(|_| {
            LedgerError::InvalidStoredData(format!(
                "contracts_count {} exceeds storable range",
                commission.contracts_count
            ))
        })?;

        Ok(Self {
            freelancer_id: commission.freelancer_id,
            period_start: format_date(commission.period.start()),
            period_end: format_date(commission.period.end()),
            contracts_count,
            tier: commission.tier.as_str().to_string(),
            amount: commission.amount.to_string(),
            status: commission.status.as_str().to_string(),
            payment_requested: i32::from(commission.payment_requested),
            paid_date: commission.paid_date.map(format_datetime),
        })
    }
}

/// A stored commission tier rule row.
#[derive(Debug, Clone, Queryable)]
pub struct RuleRow {
    pub rule_id: i64,
    pub position: i32,
    pub tier: String,
    pub min_contracts: i32,
    pub max_contracts: Option<i32>,
    pub unit_amount: String,
}

impl RuleRow {
    /// Converts the stored row back into a domain rule.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidStoredData` if any stored field fails
    /// to parse into its domain form.
    pub fn into_domain(self) -> Result<CommissionTierRule, LedgerError> {
        let min_contracts: u32 = u32::try_from(self.min_contracts).map_err(|_| {
            LedgerError::InvalidStoredData(format!(
                "negative min_contracts {} on rule {}",
                self.min_contracts, self.rule_id
            ))
        })?;
        let max_contracts: Option<u32> = match self.max_contracts {
            Some(max) => Some(u32::try_from(max).map_err(|_| {
                LedgerError::InvalidStoredData(format!(
                    "negative max_contracts {max} on rule {}",
                    self.rule_id
                ))
            })?),
            None => None,
        };

        Ok(CommissionTierRule {
            tier: CommissionTier::from_str(&self.tier)?,
            min_contracts,
            max_contracts,
            unit_amount: parse_amount(&self.unit_amount)?,
        })
    }
}

/// A rule row ready for insertion, positioned within its set.
#[derive(Debug, Insertable)]
#[diesel(table_name = commission_rules)]
pub struct NewRuleRow {
    pub position: i32,
    pub tier: String,
    pub min_contracts: i32,
    pub max_contracts: Option<i32>,
    pub unit_amount: String,
}

/// A staff row ready for insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = staff)]
pub struct NewStaffRow {
    pub display_name: String,
    pub role: String,
    pub is_active: i32,
}

/// A contact row ready for insertion. New contacts start unowned.
#[derive(Debug, Insertable)]
#[diesel(table_name = contacts)]
pub struct NewContactRow {
    pub display_name: String,
    pub owner_staff_id: Option<i64>,
    pub is_archived: i32,
}

/// A validated-contract row ready for insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = contracts)]
pub struct NewContractRow {
    pub freelancer_id: i64,
    pub validated_on: String,
}

/// A stored audit event row.
#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub actor_id: String,
    pub action_name: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

/// An audit event row ready for insertion. `created_at` defaults in SQL.
#[derive(Debug, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEventRow {
    pub actor_id: String,
    pub action_name: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}
