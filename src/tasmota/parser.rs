use serde_json::Value;

use super::json::{field, int32_field, object_field, string_element, string_field};
use super::power::PowerCommand;
use super::{Config, Power, TranslateError, Wattage};

/// Parse a discovery message. All four fields are required; nothing is
/// returned unless every one of them is present and a string.
pub fn parse_config(json: &str) -> Result<Config, TranslateError> {
    let document: Value = serde_json::from_str(json)?;
    Ok(Config {
        display_name: string_field(&document, "dn")?.to_string(),
        full_topic_template: string_field(&document, "ft")?.to_string(),
        topic: string_field(&document, "t")?.to_string(),
        friendly_name: string_element(field(&document, "fn")?, 0)?.to_string(),
    })
}

/// Parse a bare `POWER` payload such as `ON` or `0`.
pub fn parse_power(config: &Config, message: &str) -> Result<Power, TranslateError> {
    let command: PowerCommand = message.parse()?;
    Ok(Power {
        device_name: config.topic.clone(),
        display_name: config.friendly_name.clone(),
        on: command.is_on(),
    })
}

/// Parse a status response carrying `StatusSNS.ENERGY.Power`.
pub fn parse_wattage(config: &Config, json: &str) -> Result<Wattage, TranslateError> {
    let document: Value = serde_json::from_str(json)?;
    let sensors = object_field(&document, "StatusSNS")?;
    let energy = object_field(sensors, "ENERGY")?;
    Ok(Wattage {
        device_name: config.topic.clone(),
        display_name: config.friendly_name.clone(),
        watts: int32_field(energy, "Power")?,
    })
}
