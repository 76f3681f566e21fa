//! WebSocket infrastructure for real-time fan-out to observers.
//!
//! Provides connection management and the HTTP upgrade handler used by
//! Axum routes. Dead connections are pruned opportunistically when a
//! send fails; there is no active heartbeating.

mod handler;
pub mod manager;

pub use handler::ws_handler;
pub use manager::WsManager;
