// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger layer for the Agio commission core.
//!
//! The [`Ledger`] trait is the storage contract the caller-facing
//! operations are written against. [`Persistence`] is its `SQLite`
//! reference implementation, built on Diesel with embedded migrations.
//!
//! Two writes carry the system's concurrency guarantees and both are
//! pushed down into single SQL statements:
//!
//! - commission creation is `INSERT ... ON CONFLICT DO NOTHING` against
//!   the unique `(freelancer, period)` logical key
//! - payment transitions are conditional updates that only match rows
//!   still in the expected prior state
//!
//! In-memory databases are used for tests; each receives a unique name
//! from an atomic counter so tests are isolated deterministically.

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

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use agio::PaymentTransition;
use agio_audit::AuditEvent;
use agio_domain::{AssignmentCandidate, Commission, Period, RuleSet, StaffRole};
use time::Date;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

pub use error::LedgerError;
pub use mutations::InsertOutcome;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Storage contract for the commission core.
///
/// The caller-facing operations are generic over this trait. Everything a
/// complete workflow needs, from the rule set to the audit trail, goes
/// through here.
pub trait Ledger {
    /// Loads the configured commission rule set, ordered.
    ///
    /// An empty store yields an empty rule set; interpreting that is the
    /// tier engine's job.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn commission_rules(&mut self) -> Result<RuleSet, LedgerError>;

    /// Replaces the configured commission rule set atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn replace_commission_rules(&mut self, rules: &RuleSet) -> Result<(), LedgerError>;

    /// Counts validated contracts per active commercial over a period.
    ///
    /// Every active commercial appears, including those with a count of
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn validated_contract_counts(
        &mut self,
        period: &Period,
    ) -> Result<Vec<(i64, u32)>, LedgerError>;

    /// Finds a commission by its logical key: freelancer and period.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_commission(
        &mut self,
        freelancer_id: i64,
        period: &Period,
    ) -> Result<Option<Commission>, LedgerError>;

    /// Retrieves a commission by its ledger identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_commission(&mut self, commission_id: i64) -> Result<Option<Commission>, LedgerError>;

    /// Inserts a commission unless one already exists for the same
    /// logical key. The check and the insert are atomic.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn insert_commission_if_absent(
        &mut self,
        commission: &Commission,
    ) -> Result<InsertOutcome, LedgerError>;

    /// Applies a payment transition as a conditional write.
    ///
    /// Returns `false` if the stored row was no longer in the expected
    /// prior state, meaning a concurrent transition won.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn apply_payment_transition(
        &mut self,
        transition: &PaymentTransition,
    ) -> Result<bool, LedgerError>;

    /// Lists active account managers with their current assignment load.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_assignment_candidates(&mut self) -> Result<Vec<AssignmentCandidate>, LedgerError>;

    /// Assigns a contact to a staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if the contact does not exist or is archived.
    fn record_assignment(&mut self, contact_id: i64, staff_id: i64) -> Result<(), LedgerError>;

    /// Retrieves the owner of a contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the contact does not exist.
    fn get_contact_owner(&mut self, contact_id: i64) -> Result<Option<i64>, LedgerError>;

    /// Records an audit event, returning its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, LedgerError>;

    /// Looks up a staff member's role, or `None` if the staff does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_staff_role(&mut self, staff_id: i64) -> Result<Option<StaffRole>, LedgerError>;
}

/// `SQLite`-backed ledger.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a ledger backed by an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, LedgerError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a ledger backed by a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path_str: &str = path
            .as_ref()
            .to_str()
            .ok_or_else(|| LedgerError::InitializationError("Invalid database path".to_string()))?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), LedgerError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Registers a staff member, returning the assigned staff ID.
    ///
    /// # Arguments
    ///
    /// * `display_name` - The staff member's display name
    /// * `role` - The staff member's role
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn register_staff(
        &mut self,
        display_name: &str,
        role: StaffRole,
    ) -> Result<i64, LedgerError> {
        mutations::register_staff(&mut self.conn, display_name, role)
    }

    /// Activates or deactivates a staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if the staff member does not exist.
    pub fn set_staff_active(&mut self, staff_id: i64, active: bool) -> Result<(), LedgerError> {
        mutations::set_staff_active(&mut self.conn, staff_id, active)
    }

    /// Creates an unowned contact, returning the assigned contact ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_contact(&mut self, display_name: &str) -> Result<i64, LedgerError> {
        mutations::create_contact(&mut self.conn, display_name)
    }

    /// Archives a contact, removing it from assignment load counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the contact does not exist.
    pub fn archive_contact(&mut self, contact_id: i64) -> Result<(), LedgerError> {
        mutations::archive_contact(&mut self.conn, contact_id)
    }

    /// Records a validated contract for a freelancer.
    ///
    /// # Errors
    ///
    /// Returns an error if the freelancer does not exist.
    pub fn record_validated_contract(
        &mut self,
        freelancer_id: i64,
        validated_on: Date,
    ) -> Result<i64, LedgerError> {
        mutations::record_validated_contract(&mut self.conn, freelancer_id, validated_on)
    }

    /// Lists all commissions for a freelancer, ordered by period start.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_commissions_for_freelancer(
        &mut self,
        freelancer_id: i64,
    ) -> Result<Vec<Commission>, LedgerError> {
        queries::list_commissions_for_freelancer(&mut self.conn, freelancer_id)
    }

    /// Lists all recorded audit events in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn list_audit_events(&mut self) -> Result<Vec<AuditEvent>, LedgerError> {
        queries::list_audit_events(&mut self.conn)
    }
}

impl Ledger for Persistence {
    fn commission_rules(&mut self) -> Result<RuleSet, LedgerError> {
        queries::load_commission_rules(&mut self.conn)
    }

    fn replace_commission_rules(&mut self, rules: &RuleSet) -> Result<(), LedgerError> {
        mutations::replace_commission_rules(&mut self.conn, rules)
    }

    fn validated_contract_counts(
        &mut self,
        period: &Period,
    ) -> Result<Vec<(i64, u32)>, LedgerError> {
        queries::validated_contract_counts(&mut self.conn, period)
    }

    fn find_commission(
        &mut self,
        freelancer_id: i64,
        period: &Period,
    ) -> Result<Option<Commission>, LedgerError> {
        queries::find_commission(&mut self.conn, freelancer_id, period)
    }

    fn get_commission(&mut self, commission_id: i64) -> Result<Option<Commission>, LedgerError> {
        queries::get_commission(&mut self.conn, commission_id)
    }

    fn insert_commission_if_absent(
        &mut self,
        commission: &Commission,
    ) -> Result<InsertOutcome, LedgerError> {
        mutations::insert_commission_if_absent(&mut self.conn, commission)
    }

    fn apply_payment_transition(
        &mut self,
        transition: &PaymentTransition,
    ) -> Result<bool, LedgerError> {
        mutations::apply_payment_transition(&mut self.conn, transition)
    }

    fn list_assignment_candidates(&mut self) -> Result<Vec<AssignmentCandidate>, LedgerError> {
        queries::list_assignment_candidates(&mut self.conn)
    }

    fn record_assignment(&mut self, contact_id: i64, staff_id: i64) -> Result<(), LedgerError> {
        mutations::record_assignment(&mut self.conn, contact_id, staff_id)
    }

    fn get_contact_owner(&mut self, contact_id: i64) -> Result<Option<i64>, LedgerError> {
        queries::get_contact_owner(&mut self.conn, contact_id)
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, LedgerError> {
        mutations::record_audit_event(&mut self.conn, event)
    }

    fn get_staff_role(&mut self, staff_id: i64) -> Result<Option<StaffRole>, LedgerError> {
        queries::get_staff_role(&mut self.conn, staff_id)
    }
}
