//! Forecast commands.

use anyhow::Result;
use iotwatch_core::{PredictionQuery, PredictionTrigger};
use iotwatch_http::HttpBackend;

use crate::bootstrap::CliContext;
use crate::commands::PredictionCommand;
use crate::presentation::{format_optional, format_prediction_table};

pub async fn execute<B: HttpBackend>(
    ctx: &CliContext<B>,
    command: PredictionCommand,
) -> Result<()> {
    let client = ctx.client();
    match command {
        PredictionCommand::List { sensor, limit } => {
            let query = PredictionQuery {
                sensor_id: sensor,
                limit,
                ..PredictionQuery::default()
            };
            let predictions = client.list_predictions(&query).await?;
            if predictions.is_empty() {
                println!("No predictions yet.");
            } else {
                print!("{}", format_prediction_table(&predictions));
            }
        }
        PredictionCommand::Trigger {
            sensor,
            periods,
            freq,
        } => {
            let trigger = PredictionTrigger {
                sensor_id: sensor,
                periods,
                freq,
            };
            let result = client.trigger_prediction(&trigger).await?;
            if result.message.is_empty() {
                println!("Prediction {}", result.status);
            } else {
                println!("{}", result.message);
            }
            println!("{} forecast point(s) generated", result.predictions_count);
        }
        PredictionCommand::Stats => {
            let stats = client.prediction_statistics().await?;
            println!("Predictions:  {}", stats.total_predictions);
            println!("Sensors:      {}", stats.sensors_with_predictions);
            println!(
                "Last run:     {}",
                format_optional(stats.last_prediction_time.as_ref(), "never")
            );
        }
    }
    Ok(())
}
