//! Collaborator seams: reply bus, ports (traits + contracts), adapters.

pub mod adapters;
pub mod bus;
pub mod ports;

pub use bus::{session_bus, SessionBusReceiver, SessionBusSender, SessionMessage};
