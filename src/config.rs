use std::env;

use crate::tasmota::PowerCommand;

/// Topic naming used to route incoming messages and build outgoing commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Substituted for `%prefix%` on power state and status topics
    pub stat_prefix: String,
    /// Substituted for `%prefix%` on command topics
    pub cmnd_prefix: String,
    pub power_suffix: String,
    /// Suffix of status responses carrying `StatusSNS`
    pub sensor_suffix: String,
    /// Emit a toggle command for every power record
    pub toggle_on_power: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stat_prefix: "stat".to_string(),
            cmnd_prefix: "cmnd".to_string(),
            power_suffix: "POWER".to_string(),
            sensor_suffix: "STATUS10".to_string(),
            toggle_on_power: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = Self::default();
        let or_default = |key: &str, default: String| lookup(key).unwrap_or(default);

        let toggle_on_power = match lookup("TASMOTA_TOGGLE_ON_POWER") {
            Some(v) => v
                .parse::<PowerCommand>()
                .map(PowerCommand::is_on)
                .map_err(|_| format!("TASMOTA_TOGGLE_ON_POWER: invalid value {v}"))?,
            None => defaults.toggle_on_power,
        };

        let settings = Self {
            stat_prefix: or_default("TASMOTA_STAT_PREFIX", defaults.stat_prefix),
            cmnd_prefix: or_default("TASMOTA_CMND_PREFIX", defaults.cmnd_prefix),
            power_suffix: or_default("TASMOTA_POWER_SUFFIX", defaults.power_suffix),
            sensor_suffix: or_default("TASMOTA_SENSOR_SUFFIX", defaults.sensor_suffix),
            toggle_on_power,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("TASMOTA_STAT_PREFIX", &self.stat_prefix),
            ("TASMOTA_CMND_PREFIX", &self.cmnd_prefix),
            ("TASMOTA_POWER_SUFFIX", &self.power_suffix),
            ("TASMOTA_SENSOR_SUFFIX", &self.sensor_suffix),
        ];
        for (key, value) in required {
            if value.is_empty() {
                return Err(format!("{key} must not be empty"));
            }
        }
        if self.power_suffix == self.sensor_suffix {
            return Err("TASMOTA_POWER_SUFFIX and TASMOTA_SENSOR_SUFFIX must differ".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use test_case::test_case;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(settings_from(&[]), Ok(Settings::default()));
    }

    #[test]
    fn variables_override_defaults() {
        let settings = settings_from(&[
            ("TASMOTA_STAT_PREFIX", "status"),
            ("TASMOTA_CMND_PREFIX", "command"),
            ("TASMOTA_POWER_SUFFIX", "POWER1"),
            ("TASMOTA_SENSOR_SUFFIX", "SENSOR"),
        ])
        .unwrap();
        assert_eq!(
            settings,
            Settings {
                stat_prefix: "status".into(),
                cmnd_prefix: "command".into(),
                power_suffix: "POWER1".into(),
                sensor_suffix: "SENSOR".into(),
                toggle_on_power: false,
            }
        );
    }

    #[test_case("1", true ; "one")]
    #[test_case("TRUE", true ; "upper true")]
    #[test_case("on", true ; "on")]
    #[test_case("false", false ; "false token")]
    #[test_case("Off", false ; "mixed off")]
    #[test_case("0", false ; "zero")]
    fn toggle_flag_accepts_power_tokens(value: &str, expected: bool) {
        let settings = settings_from(&[("TASMOTA_TOGGLE_ON_POWER", value)]).unwrap();
        assert_eq!(settings.toggle_on_power, expected);
    }

    #[test_case("yes" ; "yes")]
    #[test_case("" ; "empty")]
    fn toggle_flag_rejects_other_values(value: &str) {
        assert_eq!(
            settings_from(&[("TASMOTA_TOGGLE_ON_POWER", value)]),
            Err(format!("TASMOTA_TOGGLE_ON_POWER: invalid value {value}"))
        );
    }

    #[test]
    fn empty_prefix_is_rejected() {
        assert_eq!(
            settings_from(&[("TASMOTA_CMND_PREFIX", "")]),
            Err("TASMOTA_CMND_PREFIX must not be empty".to_string())
        );
    }

    #[test]
    fn power_and_sensor_suffix_must_differ() {
        assert_eq!(
            settings_from(&[("TASMOTA_SENSOR_SUFFIX", "POWER")]),
            Err("TASMOTA_POWER_SUFFIX and TASMOTA_SENSOR_SUFFIX must differ".to_string())
        );
    }
}
