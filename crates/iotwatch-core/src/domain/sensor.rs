//! Sensors, readings and reading statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sensor attached to a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: i64,
    pub name: String,
    pub sensor_type: String,
    #[serde(default)]
    pub unit: String,
    pub device_id: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Payload for creating a sensor.
#[derive(Debug, Clone, Serialize)]
pub struct NewSensor {
    pub name: String,
    pub sensor_type: String,
    pub unit: String,
    pub device_id: i64,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

/// Partial update for a sensor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SensorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

/// A single numeric measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    pub sensor_id: i64,
    pub value: f64,
    pub timestamp: String,
    #[serde(default)]
    pub created_at: String,
}

/// Payload for recording a reading.
#[derive(Debug, Clone, Serialize)]
pub struct NewReading {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Filters for reading history queries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReadingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Summary statistics over a sensor's readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensorStatistics {
    pub count: u64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}
