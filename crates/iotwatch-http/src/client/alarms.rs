//! Alarm endpoints.

use iotwatch_core::{Alarm, AlarmQuery, AlarmStatistics, ApiResult};

use super::TransportClient;
use crate::http::HttpBackend;
use crate::request::ApiRequest;

impl<B: HttpBackend> TransportClient<B> {
    pub async fn list_alarms(&self, query: &AlarmQuery) -> ApiResult<Vec<Alarm>> {
        self.fetch(ApiRequest::get("/alarms").query(query)).await
    }

    pub async fn get_alarm(&self, alarm_id: i64) -> ApiResult<Alarm> {
        self.get(&format!("/alarms/{alarm_id}")).await
    }

    /// Mark an alarm as resolved and return its new state.
    pub async fn resolve_alarm(&self, alarm_id: i64) -> ApiResult<Alarm> {
        self.fetch(ApiRequest::post(format!("/alarms/{alarm_id}/resolve")))
            .await
    }

    pub async fn alarm_statistics(&self) -> ApiResult<AlarmStatistics> {
        self.get("/alarms/statistics").await
    }
}
