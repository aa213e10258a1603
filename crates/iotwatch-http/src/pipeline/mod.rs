//! The request pipeline, one function per step:
//!
//! ```text
//! attach_credential -> send -> classify -> SideEffects::on_failure
//! ```
//!
//! The client composes these in [`TransportClient::send`](crate::TransportClient::send);
//! each step is independently testable.

mod attach;
mod classify;
mod effects;
mod send;

pub use attach::attach_credential;
pub use classify::classify;
pub use effects::SideEffects;
pub use send::send;
