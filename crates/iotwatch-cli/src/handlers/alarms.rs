//! Alarm commands.

use anyhow::Result;
use iotwatch_core::AlarmQuery;
use iotwatch_http::HttpBackend;

use crate::bootstrap::CliContext;
use crate::commands::AlarmCommand;
use crate::presentation::format_alarm_table;

pub async fn execute<B: HttpBackend>(ctx: &CliContext<B>, command: AlarmCommand) -> Result<()> {
    let client = ctx.client();
    match command {
        AlarmCommand::List {
            status,
            limit,
            offset,
        } => {
            let query = AlarmQuery {
                status,
                limit,
                offset,
            };
            let alarms = client.list_alarms(&query).await?;
            if alarms.is_empty() {
                println!("No alarms.");
            } else {
                print!("{}", format_alarm_table(&alarms));
                let active = alarms.iter().filter(|a| a.is_active()).count();
                println!("\n{} alarm(s), {active} active", alarms.len());
            }
        }
        AlarmCommand::Show { id } => {
            let alarm = client.get_alarm(id).await?;
            print!("{}", format_alarm_table(std::slice::from_ref(&alarm)));
            if let Some(resolved_at) = &alarm.resolved_at {
                println!("Resolved at {resolved_at}");
            }
        }
        AlarmCommand::Resolve { id } => {
            let alarm = client.resolve_alarm(id).await?;
            println!("Alarm #{} is now {}", alarm.id, alarm.status);
        }
        AlarmCommand::Stats => {
            let stats = client.alarm_statistics().await?;
            println!(
                "Total: {}  Active: {}  Resolved: {}",
                stats.total, stats.active, stats.resolved
            );
            println!(
                "Critical: {}  Warning: {}  Info: {}",
                stats.critical, stats.warning, stats.info
            );
        }
    }
    Ok(())
}
