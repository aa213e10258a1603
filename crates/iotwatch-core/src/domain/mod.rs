//! Domain records exchanged with the platform API.
//!
//! These are plain data types with no infrastructure dependencies. Backend
//! timestamps are kept as the strings the server sent; query parameters built
//! by the client use `chrono` and serialize as RFC 3339.

mod alarm;
mod dashboard;
mod device;
mod prediction;
mod sensor;
mod template;
mod user;

pub use alarm::{Alarm, AlarmQuery, AlarmStatistics, AlarmStatus};
pub use dashboard::{DashboardStats, HealthCheck, SystemStatus};
pub use device::{Device, DeviceHealth, DeviceUpdate, NewDevice};
pub use prediction::{
    Prediction, PredictionQuery, PredictionStatistics, PredictionTrigger, PredictionTriggerResult,
};
pub use sensor::{
    NewReading, NewSensor, Reading, ReadingQuery, Sensor, SensorStatistics, SensorUpdate,
};
pub use template::{DeviceTemplate, DeviceTemplateUpdate, NewDeviceTemplate, SensorConfig};
pub use user::{AuthPayload, LoginForm, RefreshedToken, RegisterForm, User};
