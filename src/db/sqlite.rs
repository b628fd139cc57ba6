// SPDX-License-Identifier: MIT

//! SQLite client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Providers (credential store)
//! - Patients and diagnoses
//! - Audit log (append + retention sweep)
//!
//! The retention sweep runs inside its own transaction: committed on success,
//! rolled back when the unit of work fails or is dropped. Duplicate emails
//! are caught by the schema's UNIQUE constraints and mapped to typed errors.

use crate::db::tables;
use crate::error::{AppError, Result};
use crate::models::{AuditLogEntry, NewPatient, Patient, PatientRecord, Provider, RecentAction};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Translate a UNIQUE constraint failure into the given domain error.
fn map_unique_violation(e: sqlx::Error, duplicate: AppError) -> AppError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        duplicate
    } else {
        AppError::from(e)
    }
}

/// SQLite database client.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Connect to the database and create the schema if needed.
    ///
    /// In-memory databases are pinned to a single connection so that every
    /// operation sees the same database.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            // The REFERENCES clauses document relationships; row existence is
            // checked at the service layer, so leave the pragma at SQLite's
            // own default (off) rather than sqlx's (on).
            .foreign_keys(false);

        let is_memory = database_url.contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(if is_memory { 1 } else { 5 })
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect: {}", e)))?;

        let db = Self { pool };
        db.init_schema().await?;

        tracing::info!("Database initialized");
        Ok(db)
    }

    /// Connect to a fresh in-memory database (tests and local tooling).
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    /// Close all pool connections gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn init_schema(&self) -> Result<()> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {providers} (
                provider_id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS {patients} (
                patient_id INTEGER PRIMARY KEY AUTOINCREMENT,
                provider_id INTEGER NOT NULL REFERENCES {providers}(provider_id),
                patient_name TEXT NOT NULL,
                patient_age INTEGER NOT NULL,
                patient_gender TEXT NOT NULL,
                patient_email TEXT NOT NULL UNIQUE,
                patient_notes TEXT
            );
            CREATE TABLE IF NOT EXISTS {diagnoses} (
                diagnosis_id INTEGER PRIMARY KEY AUTOINCREMENT,
                provider_id INTEGER NOT NULL REFERENCES {providers}(provider_id),
                patient_id INTEGER NOT NULL REFERENCES {patients}(patient_id),
                prediction TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS {audit_log} (
                log_id INTEGER PRIMARY KEY AUTOINCREMENT,
                action TEXT NOT NULL,
                created_at TEXT NOT NULL,
                provider_id INTEGER NOT NULL
            );
            "#,
            providers = tables::PROVIDERS,
            patients = tables::PATIENTS,
            diagnoses = tables::DIAGNOSES,
            audit_log = tables::AUDIT_LOG,
        );
        sqlx::raw_sql(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    // ─── Provider Operations ─────────────────────────────────────

    /// Get a provider by email.
    pub async fn find_provider_by_email(&self, email: &str) -> Result<Option<Provider>> {
        let provider = sqlx::query_as::<_, Provider>(
            "SELECT provider_id, username, email, password_hash FROM providers WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(provider)
    }

    /// Create a provider. Email uniqueness is enforced by the schema, so a
    /// concurrent duplicate signup still surfaces as `DuplicateEmail`.
    pub async fn create_provider(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO providers (username, email, password_hash) VALUES (?, ?, ?)")
                .bind(username)
                .bind(email)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| map_unique_violation(e, AppError::DuplicateEmail))?;

        Ok(result.last_insert_rowid())
    }

    /// Replace a provider's password hash.
    pub async fn update_provider_password(&self, email: &str, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE providers SET password_hash = ? WHERE email = ?")
            .bind(password_hash)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ─── Patient Operations ──────────────────────────────────────

    /// Create a patient. Email uniqueness is enforced by the schema.
    pub async fn create_patient(&self, provider_id: i64, patient: &NewPatient) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO patients (provider_id, patient_name, patient_age, patient_gender, patient_email, patient_notes) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(provider_id)
        .bind(&patient.patient_name)
        .bind(patient.patient_age)
        .bind(&patient.patient_gender)
        .bind(&patient.patient_email)
        .bind(&patient.patient_notes)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, AppError::DuplicatePatientEmail))?;

        Ok(result.last_insert_rowid())
    }

    /// Get a patient by id.
    pub async fn find_patient_by_id(&self, patient_id: i64) -> Result<Option<Patient>> {
        let patient = sqlx::query_as::<_, Patient>(
            "SELECT patient_id, provider_id, patient_name, patient_age, patient_gender, \
             patient_email, patient_notes FROM patients WHERE patient_id = ?",
        )
        .bind(patient_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(patient)
    }

    /// Register a diagnosis against an existing patient.
    pub async fn create_diagnosis(
        &self,
        provider_id: i64,
        patient_id: i64,
        prediction: &str,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO diagnoses (provider_id, patient_id, prediction) VALUES (?, ?, ?)",
        )
        .bind(provider_id)
        .bind(patient_id)
        .bind(prediction)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    // ─── Dashboard Queries ───────────────────────────────────────

    /// Count patients belonging to a provider.
    pub async fn count_patients(&self, provider_id: i64) -> Result<i64> {
        let count =
            sqlx::query_scalar("SELECT COUNT(*) FROM patients WHERE provider_id = ?")
                .bind(provider_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count a provider's patients of a given gender.
    pub async fn count_patients_by_gender(&self, provider_id: i64, gender: &str) -> Result<i64> {
        let count = sqlx::query_scalar(
            "SELECT COUNT(*) FROM patients WHERE provider_id = ? AND patient_gender = ?",
        )
        .bind(provider_id)
        .bind(gender)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count a provider's diagnoses with a given prediction label.
    pub async fn count_diagnoses(&self, provider_id: i64, prediction: &str) -> Result<i64> {
        let count = sqlx::query_scalar(
            "SELECT COUNT(*) FROM diagnoses WHERE provider_id = ? AND prediction = ?",
        )
        .bind(provider_id)
        .bind(prediction)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Patient rows joined with their diagnosis predictions.
    pub async fn patients_with_predictions(&self, provider_id: i64) -> Result<Vec<PatientRecord>> {
        let rows = sqlx::query_as::<_, PatientRecord>(
            "SELECT p.patient_name, p.patient_age, p.patient_gender, p.patient_email, \
             p.patient_notes, d.prediction \
             FROM patients p JOIN diagnoses d ON p.patient_id = d.patient_id \
             WHERE p.provider_id = ?",
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ─── Audit Log Operations ────────────────────────────────────

    /// Append an audit entry.
    pub async fn insert_audit_entry(
        &self,
        action: &str,
        provider_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("INSERT INTO audit_log (action, created_at, provider_id) VALUES (?, ?, ?)")
            .bind(action)
            .bind(created_at)
            .bind(provider_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete audit entries older than `cutoff`, returning the deleted count.
    ///
    /// Runs in its own transaction; on error the unit of work rolls back when
    /// the transaction is dropped.
    pub async fn sweep_audit_log(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM audit_log WHERE created_at < ?")
            .bind(cutoff)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// The most recent audit actions for a provider, newest first.
    pub async fn recent_audit_entries(
        &self,
        provider_id: i64,
        limit: i64,
    ) -> Result<Vec<RecentAction>> {
        let rows = sqlx::query_as::<_, RecentAction>(
            "SELECT action, created_at FROM audit_log WHERE provider_id = ? \
             ORDER BY created_at DESC LIMIT ?",
        )
        .bind(provider_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All audit entries, oldest first (test and tooling support).
    pub async fn all_audit_entries(&self) -> Result<Vec<AuditLogEntry>> {
        let rows = sqlx::query_as::<_, AuditLogEntry>(
            "SELECT log_id, action, created_at, provider_id FROM audit_log ORDER BY log_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
