//! Translation between Tasmota MQTT payloads and typed device records.
//!
//! The [`tasmota`] module holds the pure translator: discovery topic
//! classification, discovery/power/energy parsing and command topic rendering.
//! [`bridge::Bridge`] drives it for a stream of received messages.

pub mod bridge;
pub mod config;
pub mod registry;
pub mod tasmota;
