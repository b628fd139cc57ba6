// SPDX-License-Identifier: MIT

//! Database layer (SQLite via sqlx).

pub mod sqlite;

pub use sqlite::Db;

/// Table names as constants.
pub mod tables {
    pub const PROVIDERS: &str = "providers";
    pub const PATIENTS: &str = "patients";
    pub const DIAGNOSES: &str = "diagnoses";
    pub const AUDIT_LOG: &str = "audit_log";
}
