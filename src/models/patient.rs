// SPDX-License-Identifier: MIT

//! Patient and diagnosis models.

use serde::{Deserialize, Serialize};

/// Patient record owned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Patient {
    pub patient_id: i64,
    pub provider_id: i64,
    pub patient_name: String,
    pub patient_age: i64,
    pub patient_gender: String,
    pub patient_email: String,
    pub patient_notes: Option<String>,
}

/// New patient data as received from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub patient_name: String,
    pub patient_age: i64,
    pub patient_gender: String,
    pub patient_email: String,
    pub patient_notes: Option<String>,
}
