use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::tasmota::{Config, TranslateError, is_discovery_topic, parse_config};

/// Known devices keyed by their `%topic%` value.
///
/// Each discovery topic owns at most one device: a device announcing itself
/// again under a new `%topic%` evicts its previous entry.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    configs: BTreeMap<String, Config>,
    /// Discovery topic -> device `%topic%`
    owners: HashMap<String, String>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the device announced by a discovery message.
    ///
    /// Returns `Ok(None)` when `topic` isn't a discovery topic. A device that
    /// announces itself again replaces its previous entry.
    pub fn observe(&mut self, topic: &str, payload: &str) -> Result<Option<&Config>, TranslateError> {
        if !is_discovery_topic(topic) {
            return Ok(None);
        }
        let config = parse_config(payload)?;
        let key = config.topic.clone();

        if let Some(previous) = self.owners.insert(topic.to_string(), key.clone()) {
            if previous != key {
                self.configs.remove(&previous);
                info!("Device {} renamed to {} by {}", previous, key, topic);
            }
        }
        // Another discovery topic may have announced the same %topic% before
        self.owners
            .retain(|discovery, device| discovery == topic || *device != key);

        match self.configs.insert(key.clone(), config) {
            Some(_) => debug!("Updated device {} from {}", key, topic),
            None => info!("Discovered device {} from {}", key, topic),
        }
        Ok(self.configs.get(&key))
    }

    pub fn get(&self, device: &str) -> Option<&Config> {
        self.configs.get(device)
    }

    /// Devices in `%topic%` order.
    pub fn iter(&self) -> impl Iterator<Item = &Config> {
        self.configs.values()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
