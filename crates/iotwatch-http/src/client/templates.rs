//! Device template endpoints, keyed by device type.

use iotwatch_core::{
    ApiResult, DeviceTemplate, DeviceTemplateUpdate, NewDeviceTemplate, SensorConfig,
};

use super::TransportClient;
use crate::http::HttpBackend;

const TEMPLATES_PATH: &str = "/device-templates/";

fn template_path(device_type: &str) -> String {
    format!("{TEMPLATES_PATH}{device_type}")
}

impl<B: HttpBackend> TransportClient<B> {
    pub async fn list_templates(&self) -> ApiResult<Vec<DeviceTemplate>> {
        self.get(TEMPLATES_PATH).await
    }

    pub async fn get_template(&self, device_type: &str) -> ApiResult<DeviceTemplate> {
        self.get(&template_path(device_type)).await
    }

    pub async fn create_template(&self, template: &NewDeviceTemplate) -> ApiResult<DeviceTemplate> {
        self.post(TEMPLATES_PATH, template).await
    }

    pub async fn update_template(
        &self,
        device_type: &str,
        update: &DeviceTemplateUpdate,
    ) -> ApiResult<DeviceTemplate> {
        self.put(&template_path(device_type), update).await
    }

    pub async fn delete_template(&self, device_type: &str) -> ApiResult<()> {
        self.delete(&template_path(device_type)).await
    }

    /// Sensor slots declared by the template for `device_type`.
    pub async fn template_sensors(&self, device_type: &str) -> ApiResult<Vec<SensorConfig>> {
        self.get(&format!("{}/sensors", template_path(device_type)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::Harness;
    use super::*;
    use crate::http::HttpMethod;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use iotwatch_core::ErrorKind;
    use serde_json::{Map, json};

    fn template_json(device_type: &str) -> serde_json::Value {
        json!({
            "id": 1,
            "device_type": device_type,
            "name": "Water pump",
            "sensor_configs": [
                {"type": "pressure", "name": "Outlet pressure", "unit": "bar", "is_required": true}
            ],
            "default_config": {},
            "is_active": true
        })
    }

    #[tokio::test]
    async fn test_list_templates() {
        let h = Harness::signed_in(FakeBackend::new().with_response(
            "/device-templates",
            CannedResponse::ok(json!({
                "success": true,
                "data": [template_json("pump")],
                "total": 1
            })),
        ));

        let templates = h.client.list_templates().await.unwrap();

        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].device_type, "pump");
        assert_eq!(h.last_request().url.path(), "/api/device-templates/");
    }

    #[tokio::test]
    async fn test_get_template_by_device_type() {
        let h = Harness::signed_in(FakeBackend::new().with_response(
            "/device-templates/pump",
            CannedResponse::ok(json!({"success": true, "data": template_json("pump")})),
        ));

        let template = h.client.get_template("pump").await.unwrap();

        assert!(template.allows_sensor_type("pressure"));
        assert_eq!(h.last_request().method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_create_template_posts_payload() {
        let h = Harness::signed_in(FakeBackend::new().with_response(
            "/device-templates",
            CannedResponse::status(201, json!({"success": true, "data": template_json("fan")})),
        ));
        let new = NewDeviceTemplate {
            device_type: "fan".to_string(),
            name: "Fan".to_string(),
            description: None,
            manufacturer: None,
            model: None,
            sensor_configs: Vec::new(),
            default_config: Map::new(),
            is_active: true,
        };

        h.client.create_template(&new).await.unwrap();

        let request = h.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.body,
            Some(json!({
                "device_type": "fan",
                "name": "Fan",
                "sensor_configs": [],
                "default_config": {},
                "is_active": true
            }))
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_template_paths() {
        let h = Harness::signed_in(FakeBackend::new().with_default(CannedResponse::ok(
            json!({"success": true, "data": template_json("pump")}),
        )));
        let update = DeviceTemplateUpdate {
            is_active: Some(false),
            ..Default::default()
        };

        h.client.update_template("pump", &update).await.unwrap();
        assert_eq!(h.last_request().method, HttpMethod::Put);
        assert_eq!(h.last_request().url.path(), "/api/device-templates/pump");
        assert_eq!(h.last_request().body, Some(json!({"is_active": false})));

        h.client.delete_template("pump").await.ok();
        assert_eq!(h.last_request().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_template_sensors() {
        let h = Harness::signed_in(FakeBackend::new().with_response(
            "/device-templates/pump/sensors",
            CannedResponse::ok(json!({
                "success": true,
                "data": [{"type": "pressure", "name": "Outlet pressure", "is_required": true}],
                "total": 1,
                "required_sensors": 1
            })),
        ));

        let sensors = h.client.template_sensors("pump").await.unwrap();

        assert_eq!(sensors.len(), 1);
        assert!(sensors[0].is_required);
    }

    #[tokio::test]
    async fn test_unknown_template_is_not_found() {
        let h = Harness::signed_in(FakeBackend::new().with_response(
            "/device-templates/ghost",
            CannedResponse::status(404, json!({"error": "Template not found"})),
        ));

        let err = h.client.get_template("ghost").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(h.client.session().is_authenticated());
    }
}
