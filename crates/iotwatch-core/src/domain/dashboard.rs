//! Dashboard summary records.

use serde::Deserialize;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_devices: u64,
    pub online_devices: u64,
    pub active_alerts: u64,
    pub today_data_points: u64,
}

/// Availability of backend subsystems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    pub database: bool,
    pub mqtt: bool,
    pub storage: bool,
    pub prediction: bool,
}

/// Liveness report from `/health`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HealthCheck {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
}
