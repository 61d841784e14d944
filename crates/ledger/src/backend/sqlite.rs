// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! Everything `SQLite`-specific lives here: establishing connections,
//! running the embedded migrations, and the handful of PRAGMA statements
//! the ledger depends on. PRAGMAs go through `sql_query` since Diesel has
//! no DSL for them.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::LedgerError;

/// The ledger schema, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Returns the row ID assigned by the most recent insert.
///
/// Inserts here do not use `RETURNING`, so the ID comes from
/// `last_insert_rowid()` on the same connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, LedgerError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Verifies that foreign key enforcement is enabled on a connection.
///
/// `SQLite` leaves the pragma off by default, and without it the ledger
/// would accept commissions and contracts for staff that do not exist.
///
/// # Errors
///
/// Returns `LedgerError::ForeignKeyEnforcementNotEnabled` if the pragma
/// reads back as off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), LedgerError> {
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(LedgerError::ForeignKeyEnforcementNotEnabled);
    }

    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Runs any pending embedded migrations.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(
    conn: &mut SqliteConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Running ledger migrations");
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Opens a connection, enables foreign keys, and brings the schema up to
/// date.
///
/// The pragma must be set before anything writes, so it comes first on
/// every fresh connection.
///
/// # Errors
///
/// Returns an error if the connection cannot be established or a
/// migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, LedgerError> {
    info!("Initializing ledger database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| LedgerError::DatabaseConnectionFailed(e.to_string()))?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| LedgerError::QueryFailed(e.to_string()))?;

    run_migrations(&mut conn).map_err(|e| LedgerError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Switches a file-backed database to write-ahead logging.
///
/// WAL lets readers proceed while a generation pass writes. Meaningless
/// for in-memory databases, so only the file constructor calls it.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), LedgerError> {
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| LedgerError::QueryFailed(e.to_string()))?;
    Ok(())
}
