// SPDX-License-Identifier: MIT

//! PulmoScan: clinical lung-scan classification backend.
//!
//! This crate provides the service core consumed by the web-route layer:
//! token-based provider authentication with an append-only audit log, and a
//! warm, mutex-guarded model server for lung-scan classification.

pub mod config;
pub mod db;
pub mod error;
pub mod inference;
pub mod models;
pub mod services;

use config::Config;
use db::Db;
use inference::ModelServer;
use services::{AuditLog, AuthService, DashboardService, DetectionService, PatientService};
use std::sync::Arc;

/// Shared application state, assembled once at startup and handed to the
/// external route layer.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub model: Arc<ModelServer>,
    pub audit: AuditLog,
    pub auth: AuthService,
    pub detection: DetectionService,
    pub patients: PatientService,
    pub dashboard: DashboardService,
}

impl AppState {
    /// Wire up all services around a database and a loaded model.
    pub fn build(config: Config, db: Db, model: Arc<ModelServer>) -> Self {
        let audit = AuditLog::new(db.clone());
        let auth = AuthService::new(
            db.clone(),
            audit.clone(),
            config.jwt_signing_key.clone(),
            config.token_expiry_minutes,
        );
        let detection = DetectionService::new(Arc::clone(&model));
        let patients = PatientService::new(db.clone(), audit.clone());
        let dashboard = DashboardService::new(db.clone());

        Self {
            config,
            db,
            model,
            audit,
            auth,
            detection,
            patients,
            dashboard,
        }
    }
}
