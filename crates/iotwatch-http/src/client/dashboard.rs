//! Dashboard and liveness endpoints.

use iotwatch_core::{ApiResult, DashboardStats, HealthCheck, SystemStatus};

use super::TransportClient;
use crate::http::HttpBackend;

impl<B: HttpBackend> TransportClient<B> {
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get("/dashboard/stats").await
    }

    pub async fn system_status(&self) -> ApiResult<SystemStatus> {
        self.get("/status").await
    }

    pub async fn health_check(&self) -> ApiResult<HealthCheck> {
        self.get("/health").await
    }
}
