use serde::Serialize;
use tracing::{debug, info};

use crate::config::Settings;
use crate::registry::DeviceRegistry;
use crate::tasmota::{
    Config, Power, TranslateError, Wattage, parse_power, parse_wattage, render_toggle,
    render_topic,
};

/// A record produced from one incoming message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Translated {
    Config(Config),
    Power(Power),
    Wattage(Wattage),
    /// Outgoing message to publish on behalf of a device
    Command { topic: String, payload: String },
}

enum Route {
    Power,
    Sensor,
}

/// Feeds incoming (topic, payload) pairs through the translator, keeping
/// track of the devices it has seen announced.
pub struct Bridge {
    settings: Settings,
    registry: DeviceRegistry,
}

impl Bridge {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            registry: DeviceRegistry::new(),
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Translate one message. Topics of unknown devices yield no records.
    pub fn handle(&mut self, topic: &str, payload: &str) -> Result<Vec<Translated>, TranslateError> {
        if let Some(config) = self.registry.observe(topic, payload)? {
            return Ok(vec![Translated::Config(config.clone())]);
        }

        let Some((route, config)) = self.route(topic) else {
            debug!("No known device for {}", topic);
            return Ok(Vec::new());
        };

        match route {
            Route::Sensor => Ok(vec![Translated::Wattage(parse_wattage(config, payload)?)]),
            Route::Power => {
                let power = parse_power(config, payload)?;
                let command = if self.settings.toggle_on_power {
                    info!("Toggling {} ({})", power.device_name, power.display_name);
                    Some(Translated::Command {
                        topic: render_topic(
                            config,
                            &self.settings.cmnd_prefix,
                            &self.settings.power_suffix,
                        )?,
                        payload: render_toggle(&power).to_string(),
                    })
                } else {
                    None
                };
                let mut records = vec![Translated::Power(power)];
                records.extend(command);
                Ok(records)
            }
        }
    }

    /// Find the device whose rendered power or sensor topic equals `topic`.
    /// When several devices render the same topic the first in `%topic%` order wins.
    fn route(&self, topic: &str) -> Option<(Route, &Config)> {
        let prefix = &self.settings.stat_prefix;
        self.registry.iter().find_map(|config| {
            let matches = |suffix: &str| match render_topic(config, prefix, suffix) {
                Ok(rendered) => rendered == topic,
                Err(e) => {
                    debug!("Skipping device {}: {}", config.topic, e);
                    false
                }
            };
            if matches(self.settings.power_suffix.as_str()) {
                Some((Route::Power, config))
            } else if matches(self.settings.sensor_suffix.as_str()) {
                Some((Route::Sensor, config))
            } else {
                None
            }
        })
    }
}
