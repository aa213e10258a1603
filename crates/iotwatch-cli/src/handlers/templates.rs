//! Device template commands.

use anyhow::Result;
use iotwatch_core::{DeviceTemplateUpdate, NewDeviceTemplate};
use iotwatch_http::HttpBackend;
use serde_json::Map;

use crate::bootstrap::CliContext;
use crate::commands::TemplateCommand;
use crate::presentation::{
    format_sensor_config_table, format_template_detail, format_template_table,
};
use crate::utils::input;

pub async fn execute<B: HttpBackend>(ctx: &CliContext<B>, command: TemplateCommand) -> Result<()> {
    let client = ctx.client();
    match command {
        TemplateCommand::List => {
            let templates = client.list_templates().await?;
            if templates.is_empty() {
                println!("No device templates defined.");
            } else {
                print!("{}", format_template_table(&templates));
            }
        }
        TemplateCommand::Show { device_type } => {
            let template = client.get_template(&device_type).await?;
            print!("{}", format_template_detail(&template));
        }
        TemplateCommand::Sensors { device_type } => {
            let sensors = client.template_sensors(&device_type).await?;
            if sensors.is_empty() {
                println!("Template '{device_type}' declares no sensors.");
            } else {
                print!("{}", format_sensor_config_table(&sensors));
            }
        }
        TemplateCommand::Create {
            device_type,
            name,
            description,
            manufacturer,
            model,
            sensors,
            inactive,
        } => {
            let new = NewDeviceTemplate {
                device_type,
                name,
                description,
                manufacturer,
                model,
                sensor_configs: sensors,
                default_config: Map::new(),
                is_active: !inactive,
            };
            let template = client.create_template(&new).await?;
            println!(
                "Created template '{}' with {} sensor slot(s)",
                template.device_type,
                template.sensor_configs.len()
            );
        }
        TemplateCommand::SetActive {
            device_type,
            active,
        } => {
            let update = DeviceTemplateUpdate {
                is_active: Some(active),
                ..DeviceTemplateUpdate::default()
            };
            let template = client.update_template(&device_type, &update).await?;
            let state = if template.is_active { "enabled" } else { "disabled" };
            println!("Template '{}' {state}", template.device_type);
        }
        TemplateCommand::Delete { device_type, force } => {
            if !force {
                let confirm = input::prompt_confirmation(&format!(
                    "Delete the template for device type '{device_type}'?"
                ))?;
                if !confirm {
                    println!("Delete cancelled.");
                    return Ok(());
                }
            }
            client.delete_template(&device_type).await?;
            println!("Template '{device_type}' deleted.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::TestCli;
    use iotwatch_core::{ApiError, ErrorKind, SensorConfig};
    use iotwatch_http::HttpMethod;
    use iotwatch_http::testing::{CannedResponse, FakeBackend};
    use serde_json::json;

    fn template_json(active: bool) -> serde_json::Value {
        json!({
            "device_type": "pump",
            "name": "Water pump",
            "sensor_configs": [
                {"type": "pressure", "name": "Outlet pressure", "is_required": true}
            ],
            "is_active": active
        })
    }

    #[tokio::test]
    async fn test_list_templates() {
        let cli = TestCli::signed_in(FakeBackend::new().with_response(
            "/device-templates",
            CannedResponse::ok(json!({"success": true, "data": [template_json(true)]})),
        ));

        execute(&cli.ctx, TemplateCommand::List).await.unwrap();

        let request = cli.last_request();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.header("authorization"), Some("Bearer tok-cli"));
    }

    #[tokio::test]
    async fn test_create_sends_sensor_slots() {
        let cli = TestCli::signed_in(FakeBackend::new().with_response(
            "/device-templates",
            CannedResponse::status(201, json!({"success": true, "data": template_json(true)})),
        ));
        let slot = SensorConfig {
            sensor_type: "pressure".to_string(),
            name: "Outlet pressure".to_string(),
            unit: "bar".to_string(),
            description: None,
            is_required: true,
            default_config: None,
            validation_rules: None,
        };

        execute(
            &cli.ctx,
            TemplateCommand::Create {
                device_type: "pump".to_string(),
                name: "Water pump".to_string(),
                description: None,
                manufacturer: Some("Acme".to_string()),
                model: None,
                sensors: vec![slot],
                inactive: false,
            },
        )
        .await
        .unwrap();

        let body = cli.last_request().body.unwrap();
        assert_eq!(body["manufacturer"], json!("Acme"));
        assert_eq!(body["sensor_configs"][0]["type"], json!("pressure"));
        assert_eq!(body["is_active"], json!(true));
    }

    #[tokio::test]
    async fn test_set_active_sends_partial_update() {
        let cli = TestCli::signed_in(FakeBackend::new().with_response(
            "/device-templates/pump",
            CannedResponse::ok(json!({"success": true, "data": template_json(false)})),
        ));

        execute(
            &cli.ctx,
            TemplateCommand::SetActive {
                device_type: "pump".to_string(),
                active: false,
            },
        )
        .await
        .unwrap();

        let request = cli.last_request();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.body, Some(json!({"is_active": false})));
    }

    #[tokio::test]
    async fn test_forced_delete() {
        let cli = TestCli::signed_in(
            FakeBackend::new().with_response("/device-templates/pump", CannedResponse::empty(204)),
        );

        execute(
            &cli.ctx,
            TemplateCommand::Delete {
                device_type: "pump".to_string(),
                force: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(cli.requests().len(), 1);
        assert_eq!(cli.last_request().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_show_unknown_template() {
        let cli = TestCli::signed_in(FakeBackend::new());

        let err = execute(
            &cli.ctx,
            TemplateCommand::Show {
                device_type: "ghost".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.downcast_ref::<ApiError>().unwrap().kind(), ErrorKind::NotFound);
        assert_eq!(cli.notifier.count(), 1);
    }
}
