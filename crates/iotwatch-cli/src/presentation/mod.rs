//! Presentation layer for CLI output formatting.
//!
//! Every formatter returns a `String`; handlers decide where it goes.

mod records;
mod tables;

pub use records::{
    format_alarm_table, format_dashboard, format_device_detail, format_device_table,
    format_prediction_table, format_reading_table, format_sensor_config_table,
    format_sensor_table, format_template_detail, format_template_table, format_user,
};
pub use tables::{format_optional, separator, truncate_string, yes_no};
