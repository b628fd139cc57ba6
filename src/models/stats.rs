// SPDX-License-Identifier: MIT

//! Dashboard aggregate models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-provider dashboard headline numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: i64,
    pub benign_cases: i64,
    pub malignant_cases: i64,
    pub normal_cases: i64,
}

/// Chart breakdown by patient gender and diagnosis category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartAnalytics {
    pub total_male: i64,
    pub total_female: i64,
    pub total_normal: i64,
    pub total_benign: i64,
    pub total_malignant: i64,
}

/// Patient row joined with its diagnosis prediction.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PatientRecord {
    pub patient_name: String,
    pub patient_age: i64,
    pub patient_gender: String,
    pub patient_email: String,
    pub patient_notes: Option<String>,
    pub prediction: String,
}

/// Recent audit action shown on the provider dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecentAction {
    pub action: String,
    pub created_at: DateTime<Utc>,
}
