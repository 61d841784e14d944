// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific database utilities.
//!
//! The ledger targets `SQLite` only. Everything that cannot be expressed
//! in backend-agnostic Diesel DSL lives here; queries and mutations stay
//! in their own modules.

pub mod sqlite;
