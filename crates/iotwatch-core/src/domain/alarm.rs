//! Alarms raised by threshold rules.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmStatus {
    Active,
    Resolved,
    Acknowledged,
}

/// An alarm raised against a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: i64,
    pub sensor_id: i64,
    pub alarm_type: String,
    #[serde(default)]
    pub threshold_value: f64,
    #[serde(default)]
    pub current_value: f64,
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub resolved_at: Option<String>,
}

impl Alarm {
    /// Whether the alarm still needs attention.
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

/// Filters for listing alarms.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlarmQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AlarmStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Alarm counts by state and severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlarmStatistics {
    pub total: u64,
    pub active: u64,
    pub resolved: u64,
    pub critical: u64,
    pub warning: u64,
    pub info: u64,
}
