// SPDX-License-Identifier: MIT

//! Provider model: an authenticated clinical user.

use serde::{Deserialize, Serialize};

/// Provider row as stored in the database.
///
/// The password hash never leaves the auth service; API-facing summaries use
/// [`ProviderSummary`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Provider {
    pub provider_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Provider identity returned alongside a login token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub provider_id: i64,
    pub provider_username: String,
    pub provider_email: String,
}

impl From<&Provider> for ProviderSummary {
    fn from(p: &Provider) -> Self {
        Self {
            provider_id: p.provider_id,
            provider_username: p.username.clone(),
            provider_email: p.email.clone(),
        }
    }
}
