// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod audit;
pub mod patient;
pub mod provider;
pub mod stats;

pub use audit::AuditLogEntry;
pub use patient::{NewPatient, Patient};
pub use provider::{Provider, ProviderSummary};
pub use stats::{ChartAnalytics, DashboardStats, PatientRecord, RecentAction};
