// SPDX-License-Identifier: MIT

//! Audit log model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of a sensitive provider action.
///
/// Entries are only ever appended; an external retention sweep bulk-deletes
/// old rows by timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditLogEntry {
    pub log_id: i64,
    pub action: String,
    pub created_at: DateTime<Utc>,
    pub provider_id: i64,
}
