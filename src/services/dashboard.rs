// SPDX-License-Identifier: MIT

//! Provider dashboard aggregation queries.

use crate::db::Db;
use crate::error::Result;
use crate::inference::Category;
use crate::models::{ChartAnalytics, DashboardStats, PatientRecord, RecentAction};

/// Number of recent audit actions shown on the dashboard.
const RECENT_ACTION_LIMIT: i64 = 5;

/// Dashboard service: read-only aggregates over a provider's records.
#[derive(Clone)]
pub struct DashboardService {
    db: Db,
}

impl DashboardService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Headline numbers: total patients plus per-category diagnosis counts.
    pub async fn dashboard_data(&self, provider_id: i64) -> Result<DashboardStats> {
        let total_patients = self.db.count_patients(provider_id).await?;
        let benign = self
            .db
            .count_diagnoses(provider_id, Category::Benign.label())
            .await?;
        let malignant = self
            .db
            .count_diagnoses(provider_id, Category::Malignant.label())
            .await?;
        let normal = self
            .db
            .count_diagnoses(provider_id, Category::Normal.label())
            .await?;

        Ok(DashboardStats {
            total_patients,
            benign_cases: benign,
            malignant_cases: malignant,
            normal_cases: normal,
        })
    }

    /// Chart breakdown by patient gender and diagnosis category.
    pub async fn chart_data(&self, provider_id: i64) -> Result<ChartAnalytics> {
        let total_male = self
            .db
            .count_patients_by_gender(provider_id, "Male")
            .await?;
        let total_female = self
            .db
            .count_patients_by_gender(provider_id, "Female")
            .await?;
        let total_normal = self
            .db
            .count_diagnoses(provider_id, Category::Normal.label())
            .await?;
        let total_benign = self
            .db
            .count_diagnoses(provider_id, Category::Benign.label())
            .await?;
        let total_malignant = self
            .db
            .count_diagnoses(provider_id, Category::Malignant.label())
            .await?;

        Ok(ChartAnalytics {
            total_male,
            total_female,
            total_normal,
            total_benign,
            total_malignant,
        })
    }

    /// Patient rows joined with their diagnosis predictions.
    pub async fn patients_data(&self, provider_id: i64) -> Result<Vec<PatientRecord>> {
        self.db.patients_with_predictions(provider_id).await
    }

    /// The provider's most recent audit actions, newest first.
    pub async fn provider_log(&self, provider_id: i64) -> Result<Vec<RecentAction>> {
        self.db
            .recent_audit_entries(provider_id, RECENT_ACTION_LIMIT)
            .await
    }
}
