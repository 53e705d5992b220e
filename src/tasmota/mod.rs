pub mod json;
pub mod parser;
pub mod power;
pub mod topic;

use serde::Serialize;
use thiserror::Error;

pub use parser::{parse_config, parse_power, parse_wattage};
pub use power::{PowerCommand, render_toggle};
pub use topic::{is_discovery_topic, render_topic};

/// Device identity as announced on `tasmota/discovery/<id>/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// `dn`
    pub display_name: String,
    /// `ft`, e.g. `"%prefix%/%topic%/"`
    pub full_topic_template: String,
    /// `t`
    pub topic: String,
    /// First entry of `fn`
    pub friendly_name: String,
}

/// Relay state of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Power {
    pub device_name: String,
    pub display_name: String,
    pub on: bool,
}

/// Instantaneous power draw reported in `StatusSNS.ENERGY.Power`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wattage {
    pub device_name: String,
    pub display_name: String,
    pub watts: i32,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Malformed JSON")]
    Parse(#[from] serde_json::Error),

    #[error("Missing field \"{field}\"")]
    MissingField { field: String },

    #[error("Field \"{field}\" isn't {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("No value for %{0}%")]
    UndefinedPlaceholder(String),

    #[error("Unterminated placeholder %{0}")]
    UnterminatedPlaceholder(String),

    #[error("Unrecognized power value: {0}")]
    UnrecognizedPowerValue(String),
}
