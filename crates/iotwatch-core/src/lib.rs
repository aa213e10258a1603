#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod envelope;
pub mod error;
pub mod gate;
pub mod ports;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{
    Alarm, AlarmQuery, AlarmStatistics, AlarmStatus, AuthPayload, DashboardStats, Device,
    DeviceHealth, DeviceTemplate, DeviceTemplateUpdate, DeviceUpdate, HealthCheck, LoginForm,
    NewDevice, NewDeviceTemplate, NewReading, NewSensor, Prediction, PredictionQuery,
    PredictionStatistics, PredictionTrigger, PredictionTriggerResult, Reading, ReadingQuery,
    RefreshedToken, RegisterForm, Sensor, SensorConfig, SensorStatistics, SensorUpdate,
    SystemStatus, User,
};
pub use envelope::{Envelope, Page, Pagination, ResponseBody, error_message, normalize};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use gate::{GateDecision, RouteAccess, gate};
pub use ports::{
    HOME_ROUTE, LOGIN_ROUTE, MemoryStorage, Navigator, NoopNavigator, NoopNotifier, Notice,
    NoticeLevel, Notifier, SessionStorage, StorageError,
};
pub use session::{SessionContext, SessionCredential, SessionState, TOKEN_KEY, USER_KEY};
