use std::collections::HashMap;

use super::{Config, TranslateError};

const DISCOVERY_PREFIX: &str = "tasmota/discovery/";
const DISCOVERY_SUFFIX: &str = "/config";

/// True for `tasmota/discovery/<id>/config`.
pub fn is_discovery_topic(topic: &str) -> bool {
    topic.starts_with(DISCOVERY_PREFIX) && topic.ends_with(DISCOVERY_SUFFIX)
}

/// Build a device topic from its full topic template.
///
/// `%prefix%` is replaced by `prefix`, `%topic%` by the device topic, and
/// `suffix` is appended as is:
///
/// ```
/// # use tasmota_translator::tasmota::{render_topic, Config};
/// let config = Config {
///     display_name: "Sonoff".into(),
///     full_topic_template: "%prefix%/%topic%/".into(),
///     topic: "sonoff1".into(),
///     friendly_name: "Kitchen".into(),
/// };
/// assert_eq!(render_topic(&config, "cmnd", "POWER").unwrap(), "cmnd/sonoff1/POWER");
/// ```
pub fn render_topic(config: &Config, prefix: &str, suffix: &str) -> Result<String, TranslateError> {
    let values = HashMap::from([("prefix", prefix), ("topic", config.topic.as_str())]);
    let mut topic = substitute(&config.full_topic_template, &values)?;
    topic.push_str(suffix);
    Ok(topic)
}

/// Replace every `%name%` in `template` with `values[name]`.
///
/// A `%` opens a placeholder and the next `%` closes it. An unknown name fails
/// with `UndefinedPlaceholder`; a template ending inside a placeholder fails
/// with `UnterminatedPlaceholder`.
pub fn substitute(template: &str, values: &HashMap<&str, &str>) -> Result<String, TranslateError> {
    let mut output = String::with_capacity(template.len());
    let mut name = String::new();
    let mut in_name = false;

    for c in template.chars() {
        match (c, in_name) {
            ('%', true) => {
                let value = values
                    .get(name.as_str())
                    .ok_or_else(|| TranslateError::UndefinedPlaceholder(name.clone()))?;
                output.push_str(value);
                name.clear();
                in_name = false;
            }
            ('%', false) => in_name = true,
            (c, true) => name.push(c),
            (c, false) => output.push(c),
        }
    }

    if in_name {
        return Err(TranslateError::UnterminatedPlaceholder(name));
    }
    Ok(output)
}
