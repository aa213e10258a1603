//! Device templates: the sensor layout expected for a device type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One sensor slot of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<Map<String, Value>>,
}

/// Template keyed by device type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceTemplate {
    #[serde(default)]
    pub id: i64,
    pub device_type: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub sensor_configs: Vec<SensorConfig>,
    #[serde(default)]
    pub default_config: Map<String, Value>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl DeviceTemplate {
    /// Whether a sensor of `sensor_type` fits this template.
    pub fn allows_sensor_type(&self, sensor_type: &str) -> bool {
        self.sensor_configs
            .iter()
            .any(|c| c.sensor_type == sensor_type)
    }

    /// Slots a device of this type must fill.
    pub fn required_sensors(&self) -> impl Iterator<Item = &SensorConfig> {
        self.sensor_configs.iter().filter(|c| c.is_required)
    }
}

/// Request body for creating a template.
#[derive(Debug, Clone, Serialize)]
pub struct NewDeviceTemplate {
    pub device_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub sensor_configs: Vec<SensorConfig>,
    pub default_config: Map<String, Value>,
    pub is_active: bool,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceTemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_configs: Option<Vec<SensorConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
