use std::io::{self, BufRead, Write};

use tasmota_translator::bridge::Bridge;
use tasmota_translator::config::Settings;
use tracing::{error, info, warn};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting tasmota-translator (stat={}, cmnd={}, power={}, sensor={}, toggle={})",
        settings.stat_prefix,
        settings.cmnd_prefix,
        settings.power_suffix,
        settings.sensor_suffix,
        settings.toggle_on_power,
    );

    let mut bridge = Bridge::new(settings);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read input: {}", e);
                std::process::exit(1);
            }
        };
        let Some((topic, payload)) = split_line(&line) else {
            warn!("Ignoring line without payload: {}", line);
            continue;
        };

        let records = match bridge.handle(topic, payload) {
            Ok(records) => records,
            Err(e) => {
                warn!("Dropping message on {}: {}", topic, e);
                continue;
            }
        };

        for record in records {
            let written = serde_json::to_string(&record)
                .map_err(io::Error::from)
                .and_then(|json| writeln!(out, "{json}"));
            if let Err(e) = written {
                error!("Failed to write record: {}", e);
                std::process::exit(1);
            }
        }
    }

    info!(
        "tasmota-translator stopped ({} devices known)",
        bridge.registry().len()
    );
}

/// Split a `"<topic> <payload>"` line, as printed by `mosquitto_sub -v`.
/// The payload may itself contain spaces.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let (topic, payload) = line.split_once(' ')?;
    if topic.is_empty() {
        return None;
    }
    Some((topic, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("stat/sonoff1/POWER ON", Some(("stat/sonoff1/POWER", "ON")) ; "power message")]
    #[test_case(
        r#"stat/sonoff1/STATUS10 {"StatusSNS": {"ENERGY": {"Power": 42}}}"#,
        Some(("stat/sonoff1/STATUS10", r#"{"StatusSNS": {"ENERGY": {"Power": 42}}}"#))
        ; "payload with spaces"
    )]
    #[test_case("stat/sonoff1/POWER ", Some(("stat/sonoff1/POWER", "")) ; "empty payload")]
    #[test_case("stat/sonoff1/POWER", None ; "no payload")]
    #[test_case(" ON", None ; "no topic")]
    #[test_case("", None ; "empty line")]
    fn split_input_line(line: &str, expected: Option<(&str, &str)>) {
        assert_eq!(split_line(line), expected);
    }
}
