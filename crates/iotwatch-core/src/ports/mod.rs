//! Port definitions (trait abstractions) for the client's side effects.
//!
//! The transport client never touches a browser, terminal or filesystem
//! directly. It talks to these ports, and each adapter (CLI, tests, a GUI
//! shell) provides its own implementation.
//!
//! # Design Rules
//!
//! - Ports are synchronous: every implementation is a local, non-blocking
//!   side effect (key-value write, message print, route change)
//! - No HTTP types in any signature
//! - Each port has a no-op or in-memory implementation for tests and
//!   headless contexts

pub mod navigator;
pub mod notifier;
pub mod storage;

pub use navigator::{HOME_ROUTE, LOGIN_ROUTE, Navigator, NoopNavigator};
pub use notifier::{Notice, NoticeLevel, Notifier, NoopNotifier};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
