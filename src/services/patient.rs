// SPDX-License-Identifier: MIT

//! Patient registration and diagnosis recording.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::NewPatient;
use crate::services::AuditLog;

/// Patient service: registration of patients and their diagnoses.
#[derive(Clone)]
pub struct PatientService {
    db: Db,
    audit: AuditLog,
}

impl PatientService {
    pub fn new(db: Db, audit: AuditLog) -> Self {
        Self { db, audit }
    }

    /// Register a new patient under a provider, returning the patient id.
    pub async fn register_patient(&self, provider_id: i64, patient: &NewPatient) -> Result<i64> {
        let patient_id = self.db.create_patient(provider_id, patient).await?;

        self.audit
            .record(
                &format!("Registered Patient: {}", patient.patient_name),
                provider_id,
            )
            .await;
        tracing::info!(provider_id, patient_id, "Patient registered");
        Ok(patient_id)
    }

    /// Record a classification result against an existing patient.
    pub async fn register_diagnosis(
        &self,
        provider_id: i64,
        patient_id: i64,
        prediction: &str,
    ) -> Result<i64> {
        let patient = self
            .db
            .find_patient_by_id(patient_id)
            .await?
            .ok_or(AppError::PatientNotFound)?;

        let diagnosis_id = self
            .db
            .create_diagnosis(provider_id, patient_id, prediction)
            .await?;

        self.audit
            .record(
                &format!("Registered Diagnosis for {}", patient.patient_name),
                provider_id,
            )
            .await;
        Ok(diagnosis_id)
    }
}
