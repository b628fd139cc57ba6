// SPDX-License-Identifier: MIT

//! Identity lifecycle and bearer token issuance.
//!
//! Tokens are stateless JWTs (HS256, shared secret): validity is purely a
//! function of signature and expiry. There is no revocation list; logout is
//! an audit event only.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::ProviderSummary;
use crate::services::AuditLog;
use anyhow::anyhow;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (provider email)
    pub sub: String,
    /// Redundant copy of the subject identifier
    pub provider_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// New provider signup data.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub provider_username: String,
    pub provider_email: String,
    pub provider_password: String,
}

/// Successful login response: bearer token plus provider summary.
#[derive(Debug, Clone, Serialize)]
pub struct LoginToken {
    pub access_token: String,
    pub token_type: String,
    pub provider_id: i64,
    pub provider_username: String,
    pub provider_email: String,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    db: Db,
    audit: AuditLog,
    signing_key: Vec<u8>,
    token_expiry_minutes: u64,
}

impl AuthService {
    pub fn new(db: Db, audit: AuditLog, signing_key: Vec<u8>, token_expiry_minutes: u64) -> Self {
        Self {
            db,
            audit,
            signing_key,
            token_expiry_minutes,
        }
    }

    /// Register a new provider.
    ///
    /// The password is hashed irreversibly (bcrypt, salted) before storage.
    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let hash = bcrypt::hash(&request.provider_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(anyhow!("password hashing failed: {}", e)))?;

        let provider_id = self
            .db
            .create_provider(&request.provider_username, &request.provider_email, &hash)
            .await?;

        self.audit.record("Provider signup", provider_id).await;
        tracing::info!(provider_id, "Provider registered");
        Ok(())
    }

    /// Verify credentials and issue a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginToken> {
        let provider = self
            .db
            .find_provider_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let matches = bcrypt::verify(password, &provider.password_hash)
            .map_err(|e| AppError::Internal(anyhow!("password verification failed: {}", e)))?;
        if !matches {
            return Err(AppError::InvalidCredentials);
        }

        self.audit.record("Provider login", provider.provider_id).await;
        let token = self.create_access_token(&provider.email)?;
        let summary = ProviderSummary::from(&provider);

        Ok(LoginToken {
            access_token: token,
            token_type: "bearer".to_string(),
            provider_id: summary.provider_id,
            provider_username: summary.provider_username,
            provider_email: summary.provider_email,
        })
    }

    /// Replace a provider's password.
    ///
    /// The old password is deliberately not verified (reset flow); issued
    /// tokens stay valid until they expire.
    pub async fn change_password(&self, email: &str, new_password: &str) -> Result<()> {
        let provider = self
            .db
            .find_provider_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(anyhow!("password hashing failed: {}", e)))?;
        self.db.update_provider_password(email, &hash).await?;

        self.audit.record("Password changed", provider.provider_id).await;
        Ok(())
    }

    /// Record a logout. Tokens are stateless, so this is an audit event only.
    pub async fn logout(&self, provider: Option<i64>) -> Result<()> {
        let provider_id = provider.ok_or(AppError::Unauthorized)?;
        self.audit.record("Provider logout", provider_id).await;
        Ok(())
    }

    /// Validate a bearer token and resolve its subject to a provider id.
    ///
    /// Fails with `Unauthorized` on a bad signature, expiry, or a subject
    /// email that no longer resolves to a known provider.
    pub async fn validate_token(&self, token: &str) -> Result<i64> {
        let key = DecodingKey::from_secret(&self.signing_key);
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock-skew leeway: a token is invalid from the instant it expires.
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &key, &validation).map_err(|_| AppError::Unauthorized)?;

        let provider = self
            .db
            .find_provider_by_email(&token_data.claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(provider.provider_id)
    }

    /// Create a signed bearer token for a provider email.
    pub fn create_access_token(&self, email: &str) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(anyhow!(e)))?
            .as_secs() as usize;

        let claims = Claims {
            sub: email.to_string(),
            provider_id: email.to_string(),
            iat: now,
            exp: now + self.token_expiry_minutes as usize * 60,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.signing_key),
        )
        .map_err(|e| AppError::Internal(anyhow!("token signing failed: {}", e)))
    }
}
