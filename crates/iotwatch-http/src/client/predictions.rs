//! Prediction endpoints.

use iotwatch_core::{
    ApiResult, Prediction, PredictionQuery, PredictionStatistics, PredictionTrigger,
    PredictionTriggerResult,
};

use super::TransportClient;
use crate::http::HttpBackend;
use crate::request::ApiRequest;

impl<B: HttpBackend> TransportClient<B> {
    pub async fn list_predictions(&self, query: &PredictionQuery) -> ApiResult<Vec<Prediction>> {
        self.fetch(ApiRequest::get("/predictions").query(query))
            .await
    }

    /// Ask the server to run a forecast for one sensor.
    pub async fn trigger_prediction(
        &self,
        trigger: &PredictionTrigger,
    ) -> ApiResult<PredictionTriggerResult> {
        self.post("/predictions/trigger", trigger).await
    }

    pub async fn prediction_statistics(&self) -> ApiResult<PredictionStatistics> {
        self.get("/predictions/statistics").await
    }
}
