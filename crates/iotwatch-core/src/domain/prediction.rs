//! Forecast records produced by the prediction service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One forecast point with its confidence band.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub id: i64,
    pub sensor_id: i64,
    pub predict_ts: String,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    #[serde(default)]
    pub generated_at: String,
}

/// Filters for listing predictions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PredictionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Request body for `POST /predictions/trigger`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionTrigger {
    pub sensor_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periods: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freq: Option<String>,
}

/// Outcome of a triggered prediction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PredictionTriggerResult {
    pub status: String,
    pub message: String,
    pub predictions_count: u64,
}

/// Aggregate prediction counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PredictionStatistics {
    pub total_predictions: u64,
    pub sensors_with_predictions: u64,
    pub last_prediction_time: Option<String>,
}
