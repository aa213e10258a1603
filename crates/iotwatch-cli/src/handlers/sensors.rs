//! Sensor and reading commands.

use anyhow::Result;
use chrono::{TimeDelta, Utc};
use iotwatch_core::{NewReading, ReadingQuery};
use iotwatch_http::HttpBackend;

use crate::bootstrap::CliContext;
use crate::commands::SensorCommand;
use crate::presentation::{format_reading_table, format_sensor_table};

pub async fn execute<B: HttpBackend>(ctx: &CliContext<B>, command: SensorCommand) -> Result<()> {
    let client = ctx.client();
    match command {
        SensorCommand::List => {
            let sensors = client.list_sensors().await?;
            if sensors.is_empty() {
                println!("No sensors registered.");
            } else {
                print!("{}", format_sensor_table(&sensors));
            }
        }
        SensorCommand::Show { id } => {
            let sensor = client.get_sensor(id).await?;
            print!("{}", format_sensor_table(std::slice::from_ref(&sensor)));
        }
        SensorCommand::Readings {
            id,
            page,
            per_page,
            hours,
        } => {
            let query = ReadingQuery {
                page,
                per_page,
                ..since(hours)
            };
            let page = client.sensor_readings(id, &query).await?;
            if page.items.is_empty() {
                println!("No readings for sensor #{id}.");
            } else {
                print!(
                    "{}",
                    format_reading_table(&page.items, page.pagination.as_ref())
                );
            }
        }
        SensorCommand::Latest { id } => match client.sensor_latest(id).await? {
            Some(reading) => println!("{} at {}", reading.value, reading.timestamp),
            None => println!("Sensor #{id} has not reported yet."),
        },
        SensorCommand::Stats { id, hours } => {
            let stats = client.sensor_statistics(id, &since(hours)).await?;
            println!("Readings: {}", stats.count);
            if stats.count > 0 {
                println!("Average:  {:.2}", stats.avg);
                println!("Min/Max:  {:.2} / {:.2}", stats.min, stats.max);
                println!("Std dev:  {:.2}", stats.std);
            }
        }
        SensorCommand::Record { id, value } => {
            let reading = NewReading {
                value,
                timestamp: Some(Utc::now()),
            };
            let stored = client.add_sensor_reading(id, &reading).await?;
            println!("Recorded {} for sensor #{}", stored.value, stored.sensor_id);
        }
    }
    Ok(())
}

/// A query covering the last `hours` hours, or everything.
fn since(hours: Option<u32>) -> ReadingQuery {
    let Some(hours) = hours else {
        return ReadingQuery::default();
    };
    let now = Utc::now();
    ReadingQuery {
        start_time: Some(now - TimeDelta::hours(i64::from(hours))),
        end_time: Some(now),
        ..ReadingQuery::default()
    }
}
