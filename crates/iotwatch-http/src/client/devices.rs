//! Device endpoints.

use iotwatch_core::{
    ApiResult, Device, DeviceHealth, DeviceUpdate, NewDevice, Reading, ReadingQuery, Sensor,
};

use super::TransportClient;
use crate::http::HttpBackend;
use crate::request::ApiRequest;

impl<B: HttpBackend> TransportClient<B> {
    pub async fn list_devices(&self) -> ApiResult<Vec<Device>> {
        self.get("/devices").await
    }

    pub async fn get_device(&self, device_id: i64) -> ApiResult<Device> {
        self.get(&format!("/devices/{device_id}")).await
    }

    pub async fn create_device(&self, device: &NewDevice) -> ApiResult<Device> {
        self.post("/devices", device).await
    }

    pub async fn update_device(&self, device_id: i64, update: &DeviceUpdate) -> ApiResult<Device> {
        self.put(&format!("/devices/{device_id}"), update).await
    }

    pub async fn delete_device(&self, device_id: i64) -> ApiResult<()> {
        self.delete(&format!("/devices/{device_id}")).await
    }

    /// Sensors attached to a device.
    pub async fn device_sensors(&self, device_id: i64) -> ApiResult<Vec<Sensor>> {
        self.get(&format!("/devices/{device_id}/sensors")).await
    }

    /// Latest reading of one sensor on a device, if it has reported yet.
    pub async fn device_sensor_latest(
        &self,
        device_id: i64,
        sensor_id: i64,
    ) -> ApiResult<Option<Reading>> {
        self.get(&format!("/devices/{device_id}/sensors/{sensor_id}/latest"))
            .await
    }

    pub async fn device_sensor_readings(
        &self,
        device_id: i64,
        sensor_id: i64,
        query: &ReadingQuery,
    ) -> ApiResult<Vec<Reading>> {
        self.fetch(
            ApiRequest::get(format!("/devices/{device_id}/sensors/{sensor_id}/readings"))
                .query(query),
        )
        .await
    }

    /// Online/offline counts across the fleet.
    pub async fn devices_health(&self) -> ApiResult<DeviceHealth> {
        self.get("/devices/health").await
    }
}
