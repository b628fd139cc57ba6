// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod detect;
pub mod patient;

pub use audit::AuditLog;
pub use auth::{AuthService, Claims, LoginToken, SignupRequest};
pub use dashboard::DashboardService;
pub use detect::{Classification, DetectionService};
pub use patient::PatientService;
