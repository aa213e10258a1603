//! Sensor and reading endpoints.
//!
//! The sensor collection routes end in a slash on the server; the paths
//! below match it exactly to avoid a redirect.

use iotwatch_core::{
    ApiResult, NewReading, NewSensor, Page, Reading, ReadingQuery, Sensor, SensorStatistics,
    SensorUpdate,
};

use super::TransportClient;
use crate::http::HttpBackend;
use crate::request::ApiRequest;

impl<B: HttpBackend> TransportClient<B> {
    pub async fn list_sensors(&self) -> ApiResult<Vec<Sensor>> {
        self.get("/sensors/").await
    }

    pub async fn get_sensor(&self, sensor_id: i64) -> ApiResult<Sensor> {
        self.get(&format!("/sensors/{sensor_id}/")).await
    }

    pub async fn create_sensor(&self, sensor: &NewSensor) -> ApiResult<Sensor> {
        self.post("/sensors/", sensor).await
    }

    pub async fn update_sensor(&self, sensor_id: i64, update: &SensorUpdate) -> ApiResult<Sensor> {
        self.put(&format!("/sensors/{sensor_id}/"), update).await
    }

    pub async fn delete_sensor(&self, sensor_id: i64) -> ApiResult<()> {
        self.delete(&format!("/sensors/{sensor_id}/")).await
    }

    /// One page of reading history.
    pub async fn sensor_readings(
        &self,
        sensor_id: i64,
        query: &ReadingQuery,
    ) -> ApiResult<Page<Reading>> {
        self.fetch_page(ApiRequest::get(format!("/sensors/{sensor_id}/readings")).query(query))
            .await
    }

    pub async fn add_sensor_reading(
        &self,
        sensor_id: i64,
        reading: &NewReading,
    ) -> ApiResult<Reading> {
        self.post(&format!("/sensors/{sensor_id}/readings"), reading)
            .await
    }

    pub async fn sensor_latest(&self, sensor_id: i64) -> ApiResult<Option<Reading>> {
        self.get(&format!("/sensors/{sensor_id}/readings/latest"))
            .await
    }

    /// Summary statistics, optionally bounded by `query`'s time range.
    pub async fn sensor_statistics(
        &self,
        sensor_id: i64,
        query: &ReadingQuery,
    ) -> ApiResult<SensorStatistics> {
        let range = ReadingQuery {
            start_time: query.start_time,
            end_time: query.end_time,
            ..ReadingQuery::default()
        };
        self.fetch(ApiRequest::get(format!("/sensors/{sensor_id}/statistics")).query(&range))
            .await
    }
}
