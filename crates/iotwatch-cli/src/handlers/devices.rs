//! Device commands.

use anyhow::Result;
use iotwatch_core::{DeviceUpdate, NewDevice};
use iotwatch_http::HttpBackend;

use crate::bootstrap::CliContext;
use crate::commands::DeviceCommand;
use crate::presentation::{format_device_detail, format_device_table, format_sensor_table};
use crate::utils::input;

pub async fn execute<B: HttpBackend>(ctx: &CliContext<B>, command: DeviceCommand) -> Result<()> {
    let client = ctx.client();
    match command {
        DeviceCommand::List => {
            let devices = client.list_devices().await?;
            if devices.is_empty() {
                println!("No devices registered.");
            } else {
                print!("{}", format_device_table(&devices));
                println!("\n{} device(s)", devices.len());
            }
        }
        DeviceCommand::Show { id } => {
            let device = client.get_device(id).await?;
            print!("{}", format_device_detail(&device));
        }
        DeviceCommand::Sensors { id } => {
            let sensors = client.device_sensors(id).await?;
            if sensors.is_empty() {
                println!("Device #{id} has no sensors.");
            } else {
                print!("{}", format_sensor_table(&sensors));
            }
        }
        DeviceCommand::Health => {
            let health = client.devices_health().await?;
            println!(
                "Online: {}  Offline: {}  Total: {}",
                health.online, health.offline, health.total
            );
        }
        DeviceCommand::Create {
            name,
            device_type,
            location,
            description,
            inactive,
        } => {
            let new = NewDevice {
                name,
                device_type,
                location,
                description,
                is_active: !inactive,
            };
            let device = client.create_device(&new).await?;
            println!("Created device #{} ({})", device.id, device.name);
        }
        DeviceCommand::SetActive { id, active } => {
            let update = DeviceUpdate {
                is_active: Some(active),
                ..DeviceUpdate::default()
            };
            let device = client.update_device(id, &update).await?;
            let state = if device.is_active { "enabled" } else { "disabled" };
            println!("Device #{} {state}", device.id);
        }
        DeviceCommand::Delete { id, force } => delete(ctx, id, force).await?,
    }
    Ok(())
}

/// Delete a device, asking first unless `force` is set.
async fn delete<B: HttpBackend>(ctx: &CliContext<B>, id: i64, force: bool) -> Result<()> {
    if !force {
        let device = ctx.client().get_device(id).await?;
        print!("{}", format_device_detail(&device));
        println!();
        let confirm = input::prompt_confirmation(
            "Delete this device and all of its sensors and readings?",
        )?;
        if !confirm {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    ctx.client().delete_device(id).await?;
    println!("Device #{id} deleted.");
    Ok(())
}
