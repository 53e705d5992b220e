use std::fmt;
use std::str::FromStr;

use super::{Power, TranslateError};

/// Tokens accepted as "on", canonical token first.
pub const ON_VALUES: [&str; 3] = ["on", "1", "true"];
/// Tokens accepted as "off", canonical token first.
pub const OFF_VALUES: [&str; 3] = ["off", "0", "false"];

/// The on/off payload of a `POWER` state or command message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerCommand {
    On,
    Off,
}

impl PowerCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            PowerCommand::On => ON_VALUES[0],
            PowerCommand::Off => OFF_VALUES[0],
        }
    }

    pub fn is_on(self) -> bool {
        self == PowerCommand::On
    }
}

impl From<bool> for PowerCommand {
    fn from(on: bool) -> Self {
        if on {
            PowerCommand::On
        } else {
            PowerCommand::Off
        }
    }
}

impl FromStr for PowerCommand {
    type Err = TranslateError;

    /// Case-insensitive. The error carries the message as received.
    fn from_str(message: &str) -> Result<Self, Self::Err> {
        let lc = message.to_lowercase();
        if ON_VALUES.contains(&lc.as_str()) {
            Ok(PowerCommand::On)
        } else if OFF_VALUES.contains(&lc.as_str()) {
            Ok(PowerCommand::Off)
        } else {
            Err(TranslateError::UnrecognizedPowerValue(message.to_string()))
        }
    }
}

impl fmt::Display for PowerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command payload that flips the device to the opposite state.
pub fn render_toggle(power: &Power) -> &'static str {
    PowerCommand::from(!power.on).as_str()
}
