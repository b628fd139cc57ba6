// SPDX-License-Identifier: MIT

//! Append-only audit log with a retention sweep.
//!
//! Appends must never fail the action being logged: insertion errors are
//! reported through tracing and swallowed. The sweep likewise never raises;
//! a failed sweep rolls back and reports zero deletions so the host
//! scheduler keeps running.

use crate::db::Db;
use chrono::{Duration, Utc};

/// Audit log service shared by all other services.
#[derive(Clone)]
pub struct AuditLog {
    db: Db,
}

impl AuditLog {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Append an entry for a provider action.
    ///
    /// Failures are reported, not propagated: a login must not fail because
    /// audit insertion failed.
    pub async fn record(&self, action: &str, provider_id: i64) {
        if let Err(e) = self
            .db
            .insert_audit_entry(action, provider_id, Utc::now())
            .await
        {
            tracing::warn!(error = %e, action, provider_id, "Failed to write audit entry");
        }
    }

    /// Delete entries older than the retention window, returning the count.
    ///
    /// Any failure rolls back and returns 0 rather than raising.
    pub async fn sweep(&self, retention: Duration) -> u64 {
        let cutoff = Utc::now() - retention;
        match self.db.sweep_audit_log(cutoff).await {
            Ok(deleted) => {
                tracing::info!(deleted, cutoff = %cutoff, "Audit log sweep complete");
                deleted
            }
            Err(e) => {
                tracing::error!(error = %e, "Audit log sweep failed");
                0
            }
        }
    }
}
