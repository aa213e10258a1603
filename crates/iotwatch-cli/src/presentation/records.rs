//! Formatters for platform records.

use std::fmt::Write;

use iotwatch_core::{
    Alarm, DashboardStats, Device, DeviceTemplate, Pagination, Prediction, Reading, Sensor,
    SensorConfig, SystemStatus, User,
};

use super::tables::{format_optional, separator, truncate_string, yes_no};

pub fn format_device_table(devices: &[Device]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<24} {:<12} {:<20} {:<7} Last seen",
        "ID", "Name", "Type", "Location", "Active"
    );
    let _ = writeln!(out, "{}", separator(90));
    for d in devices {
        let _ = writeln!(
            out,
            "{:<5} {:<24} {:<12} {:<20} {:<7} {}",
            d.id,
            truncate_string(&d.name, 23),
            truncate_string(&d.device_type, 11),
            truncate_string(&d.location, 19),
            yes_no(d.is_active),
            format_optional(d.last_seen.as_ref(), "never"),
        );
    }
    out
}

pub fn format_device_detail(device: &Device) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Device #{}: {}", device.id, device.name);
    let _ = writeln!(out, "  Type:        {}", device.device_type);
    let _ = writeln!(out, "  Location:    {}", device.location);
    let _ = writeln!(out, "  Active:      {}", yes_no(device.is_active));
    if let Some(description) = &device.description {
        let _ = writeln!(out, "  Description: {description}");
    }
    let _ = writeln!(
        out,
        "  Last seen:   {}",
        format_optional(device.last_seen.as_ref(), "never")
    );
    let _ = writeln!(out, "  Created:     {}", device.created_at);
    out
}

pub fn format_sensor_table(sensors: &[Sensor]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<22} {:<14} {:<6} {:<7} {:<7} Range",
        "ID", "Name", "Type", "Unit", "Device", "Active"
    );
    let _ = writeln!(out, "{}", separator(80));
    for s in sensors {
        let range = match (s.min_value, s.max_value) {
            (None, None) => "--".to_string(),
            (min, max) => format!(
                "{} .. {}",
                format_optional(min.as_ref(), ""),
                format_optional(max.as_ref(), "")
            ),
        };
        let _ = writeln!(
            out,
            "{:<5} {:<22} {:<14} {:<6} {:<7} {:<7} {}",
            s.id,
            truncate_string(&s.name, 21),
            truncate_string(&s.sensor_type, 13),
            truncate_string(&s.unit, 5),
            s.device_id,
            yes_no(s.is_active),
            range
        );
    }
    out
}

pub fn format_reading_table(readings: &[Reading], pagination: Option<&Pagination>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<26} Value", "Timestamp");
    let _ = writeln!(out, "{}", separator(40));
    for r in readings {
        let _ = writeln!(out, "{:<26} {}", r.timestamp, r.value);
    }
    if let Some(p) = pagination {
        let _ = writeln!(out, "\nPage {} of {} ({} readings)", p.page, p.pages, p.total);
    }
    out
}

pub fn format_alarm_table(alarms: &[Alarm]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<7} {:<12} {:<13} {:>9} {:>9}  Message",
        "ID", "Sensor", "Type", "Status", "Value", "Limit"
    );
    let _ = writeln!(out, "{}", separator(90));
    for a in alarms {
        let _ = writeln!(
            out,
            "{:<5} {:<7} {:<12} {:<13} {:>9.2} {:>9.2}  {}",
            a.id,
            a.sensor_id,
            truncate_string(&a.alarm_type, 11),
            truncate_string(&a.status, 12),
            a.current_value,
            a.threshold_value,
            truncate_string(&a.message, 40)
        );
    }
    out
}

pub fn format_prediction_table(predictions: &[Prediction]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<7} {:<22} {:>10} {:>10} {:>10}",
        "Sensor", "Time", "Forecast", "Lower", "Upper"
    );
    let _ = writeln!(out, "{}", separator(63));
    for p in predictions {
        let _ = writeln!(
            out,
            "{:<7} {:<22} {:>10.2} {:>10.2} {:>10.2}",
            p.sensor_id,
            truncate_string(&p.predict_ts, 21),
            p.yhat,
            p.yhat_lower,
            p.yhat_upper
        );
    }
    out
}

pub fn format_dashboard(stats: &DashboardStats, status: Option<&SystemStatus>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Devices online:   {}/{}",
        stats.online_devices, stats.total_devices
    );
    let _ = writeln!(out, "Active alarms:    {}", stats.active_alerts);
    let _ = writeln!(out, "Readings today:   {}", stats.today_data_points);
    if let Some(s) = status {
        let _ = writeln!(out);
        let _ = writeln!(out, "Database:   {}", up_down(s.database));
        let _ = writeln!(out, "MQTT:       {}", up_down(s.mqtt));
        let _ = writeln!(out, "Storage:    {}", up_down(s.storage));
        let _ = writeln!(out, "Prediction: {}", up_down(s.prediction));
    }
    out
}

pub fn format_template_table(templates: &[DeviceTemplate]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<26} {:<18} {:<8} Active",
        "Type", "Name", "Manufacturer", "Sensors"
    );
    let _ = writeln!(out, "{}", separator(76));
    for t in templates {
        let _ = writeln!(
            out,
            "{:<14} {:<26} {:<18} {:<8} {}",
            truncate_string(&t.device_type, 13),
            truncate_string(&t.name, 25),
            truncate_string(t.manufacturer.as_deref().unwrap_or("-"), 17),
            t.sensor_configs.len(),
            yes_no(t.is_active),
        );
    }
    out
}

pub fn format_template_detail(template: &DeviceTemplate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Template {}: {}", template.device_type, template.name);
    if let Some(description) = &template.description {
        let _ = writeln!(out, "  Description:  {description}");
    }
    if let Some(manufacturer) = &template.manufacturer {
        let model = template.model.as_deref().unwrap_or("");
        let maker = format!("{manufacturer} {model}");
        let _ = writeln!(out, "  Manufacturer: {}", maker.trim_end());
    }
    let _ = writeln!(out, "  Active:       {}", yes_no(template.is_active));
    let required = template.required_sensors().count();
    let _ = writeln!(
        out,
        "  Sensors:      {} ({required} required)",
        template.sensor_configs.len()
    );
    if !template.sensor_configs.is_empty() {
        out.push('\n');
        out.push_str(&format_sensor_config_table(&template.sensor_configs));
    }
    out
}

pub fn format_sensor_config_table(configs: &[SensorConfig]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<14} {:<26} {:<8} Required", "Type", "Name", "Unit");
    let _ = writeln!(out, "{}", separator(58));
    for c in configs {
        let _ = writeln!(
            out,
            "{:<14} {:<26} {:<8} {}",
            truncate_string(&c.sensor_type, 13),
            truncate_string(&c.name, 25),
            truncate_string(&c.unit, 7),
            yes_no(c.is_required),
        );
    }
    out
}

pub fn format_user(user: &User) -> String {
    let email = user.email.as_deref().unwrap_or("no email");
    if user.role.is_empty() {
        format!("{} <{email}>", user.username)
    } else {
        format!("{} <{email}> ({})", user.username, user.role)
    }
}

const fn up_down(flag: bool) -> &'static str {
    if flag { "up" } else { "down" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device() -> Device {
        serde_json::from_value(json!({
            "id": 3,
            "name": "boiler-room-gateway-with-a-long-name",
            "device_type": "gateway",
            "location": "B2",
            "is_active": true
        }))
        .unwrap()
    }

    #[test]
    fn test_device_table_truncates_and_marks_never_seen() {
        let table = format_device_table(&[device()]);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("3 "));
        assert!(row.contains("boiler-room-gateway-..."));
        assert!(row.trim_end().ends_with("never"));
    }

    #[test]
    fn test_device_detail_skips_missing_description() {
        let detail = format_device_detail(&device());
        assert!(detail.contains("Type:        gateway"));
        assert!(!detail.contains("Description"));
    }

    #[test]
    fn test_reading_table_with_pagination_footer() {
        let readings: Vec<Reading> = serde_json::from_value(json!([
            {"id": 1, "sensor_id": 2, "value": 21.5, "timestamp": "2024-05-01T08:00:00"}
        ]))
        .unwrap();
        let pagination = Pagination {
            page: 1,
            per_page: 1,
            pages: 3,
            total: 3,
            has_next: true,
            has_prev: false,
        };
        let table = format_reading_table(&readings, Some(&pagination));
        assert!(table.contains("21.5"));
        assert!(table.contains("Page 1 of 3 (3 readings)"));
    }

    #[test]
    fn test_dashboard_with_status() {
        let stats = DashboardStats {
            total_devices: 4,
            online_devices: 3,
            active_alerts: 1,
            today_data_points: 900,
        };
        let status = SystemStatus {
            database: true,
            ..Default::default()
        };
        let text = format_dashboard(&stats, Some(&status));
        assert!(text.contains("Devices online:   3/4"));
        assert!(text.contains("Database:   up"));
        assert!(text.contains("MQTT:       down"));
    }

    fn template() -> DeviceTemplate {
        serde_json::from_value(json!({
            "device_type": "pump",
            "name": "Water pump",
            "manufacturer": "Acme",
            "sensor_configs": [
                {"type": "pressure", "name": "Outlet pressure", "unit": "bar", "is_required": true},
                {"type": "vibration", "name": "Vibration", "unit": "mm/s"}
            ],
            "is_active": true
        }))
        .unwrap()
    }

    #[test]
    fn test_template_table_counts_sensors() {
        let table = format_template_table(&[template()]);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("pump "));
        assert!(row.contains("Acme"));
        assert!(row.contains(" 2 "));
    }

    #[test]
    fn test_template_detail_lists_required_slots() {
        let detail = format_template_detail(&template());
        assert!(detail.contains("Sensors:      2 (1 required)"));
        assert!(detail.contains("Outlet pressure"));
        assert!(!detail.contains("Description"));
    }

    #[test]
    fn test_format_user() {
        let user: User = serde_json::from_value(json!({
            "id": 1, "username": "alice", "email": "a@example.com", "role": "admin"
        }))
        .unwrap();
        assert_eq!(format_user(&user), "alice <a@example.com> (admin)");
    }
}
