//! Main commands enum and per-resource subcommands.

use clap::Subcommand;
use iotwatch_core::{AlarmStatus, LOGIN_ROUTE, RouteAccess, SensorConfig};

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Account name
        username: String,
        /// Password (prompted when omitted)
        #[arg(long, env = "IOTWATCH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Replace an existing session
        #[arg(short, long)]
        force: bool,
    },

    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        /// Password (prompted when omitted)
        #[arg(long, env = "IOTWATCH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Reload the profile from the server
        #[arg(long)]
        refresh: bool,
    },

    /// Exchange the stored token for a fresh one
    Refresh,

    /// Headline numbers and backend status
    Dashboard,

    /// Check that the API is reachable
    Health,

    /// Manage devices
    #[command(subcommand)]
    Devices(DeviceCommand),

    /// Manage sensors and readings
    #[command(subcommand)]
    Sensors(SensorCommand),

    /// Sensor layouts expected per device type
    #[command(subcommand)]
    Templates(TemplateCommand),

    /// Inspect and resolve alarms
    #[command(subcommand)]
    Alarms(AlarmCommand),

    /// Forecasts produced by the prediction service
    #[command(subcommand)]
    Predictions(PredictionCommand),
}

impl Commands {
    /// The route this command stands for, for the auth gate.
    pub const fn route(&self) -> (RouteAccess, &'static str) {
        match self {
            Self::Login { .. } => (RouteAccess::Public, LOGIN_ROUTE),
            Self::Register { .. } => (RouteAccess::Public, "/register"),
            Self::Logout | Self::Whoami { .. } => (RouteAccess::Public, "/profile"),
            Self::Refresh => (RouteAccess::Protected, "/profile"),
            Self::Health => (RouteAccess::Public, "/health"),
            Self::Dashboard => (RouteAccess::Protected, "/dashboard"),
            Self::Devices(_) => (RouteAccess::Protected, "/devices"),
            Self::Sensors(_) => (RouteAccess::Protected, "/sensors"),
            Self::Templates(_) => (RouteAccess::Protected, "/device-templates"),
            Self::Alarms(_) => (RouteAccess::Protected, "/alarms"),
            Self::Predictions(_) => (RouteAccess::Protected, "/predictions"),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// List all devices
    List,
    /// Show one device
    Show { id: i64 },
    /// List the sensors attached to a device
    Sensors { id: i64 },
    /// Online/offline counts across the fleet
    Health,
    /// Register a new device
    Create {
        name: String,
        /// Device type (e.g. "pump", "gateway")
        #[arg(long = "type")]
        device_type: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long)]
        description: Option<String>,
        /// Register the device as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Enable or disable a device
    SetActive {
        id: i64,
        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Delete a device
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SensorCommand {
    /// List all sensors
    List,
    /// Show one sensor
    Show { id: i64 },
    /// Reading history, newest page first
    Readings {
        id: i64,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long = "per-page")]
        per_page: Option<u32>,
        /// Only readings from the last N hours
        #[arg(long)]
        hours: Option<u32>,
    },
    /// Latest reading
    Latest { id: i64 },
    /// Summary statistics
    Stats {
        id: i64,
        /// Only readings from the last N hours
        #[arg(long)]
        hours: Option<u32>,
    },
    /// Record a reading now
    Record { id: i64, value: f64 },
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// List all templates
    List,
    /// Show the template for a device type
    Show { device_type: String },
    /// List the sensor slots of a template
    Sensors { device_type: String },
    /// Define a template
    Create {
        device_type: String,
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        manufacturer: Option<String>,
        #[arg(long)]
        model: Option<String>,
        /// Sensor slot as TYPE:NAME[:UNIT[:required]], repeatable
        #[arg(long = "sensor", value_parser = parse_sensor_slot)]
        sensors: Vec<SensorConfig>,
        /// Create the template as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Enable or disable a template
    SetActive {
        device_type: String,
        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Delete a template
    Delete {
        device_type: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AlarmCommand {
    /// List alarms
    List {
        /// Filter by status
        #[arg(long, value_parser = parse_alarm_status)]
        status: Option<AlarmStatus>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show one alarm
    Show { id: i64 },
    /// Mark an alarm as resolved
    Resolve { id: i64 },
    /// Alarm counts
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum PredictionCommand {
    /// List forecast points
    List {
        #[arg(long)]
        sensor: Option<i64>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Run a forecast for a sensor
    Trigger {
        sensor: i64,
        /// Number of future periods
        #[arg(long)]
        periods: Option<u32>,
        /// Period length (e.g. "H", "D")
        #[arg(long)]
        freq: Option<String>,
    },
    /// Prediction counts
    Stats,
}

fn parse_alarm_status(raw: &str) -> Result<AlarmStatus, String> {
    match raw.to_ascii_lowercase().as_str() {
        "active" => Ok(AlarmStatus::Active),
        "resolved" => Ok(AlarmStatus::Resolved),
        "acknowledged" => Ok(AlarmStatus::Acknowledged),
        other => Err(format!(
            "unknown status '{other}' (expected active, resolved or acknowledged)"
        )),
    }
}

fn parse_sensor_slot(raw: &str) -> Result<SensorConfig, String> {
    let mut parts = raw.split(':').map(str::trim);
    let sensor_type = parts.next().filter(|t| !t.is_empty());
    let name = parts.next().filter(|n| !n.is_empty());
    let (Some(sensor_type), Some(name)) = (sensor_type, name) else {
        return Err(format!("expected TYPE:NAME[:UNIT[:required]], got '{raw}'"));
    };
    let unit = parts.next().unwrap_or_default();
    let is_required = match parts.next() {
        None | Some("") => false,
        Some("required") => true,
        Some(other) => return Err(format!("unknown sensor flag '{other}' (expected 'required')")),
    };
    if parts.next().is_some() {
        return Err(format!("too many fields in '{raw}'"));
    }
    Ok(SensorConfig {
        sensor_type: sensor_type.to_string(),
        name: name.to_string(),
        unit: unit.to_string(),
        description: None,
        is_required,
        default_config: None,
        validation_rules: None,
    })
}
