use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct SemsParameters {
    pub system_id: String,
    pub account: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct PollParameters {
    pub interval_secs: u64,
    pub day_report_hour: u32,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub sems: SemsParameters,
    pub poll: PollParameters,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses and validates a configuration
///
/// # Arguments
///
/// * 'toml' - the configuration in toml format
fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.poll.interval_secs == 0 {
        return Err(ConfigError::from("poll interval must be at least one second"));
    }
    if config.poll.day_report_hour > 23 {
        return Err(ConfigError::from("day report hour must be within 0 - 23"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[sems]
system_id = "6c3b8a6e-0c2f-4d1a-9a0e-2f1c6b7d8e90"
account = "me@example.com"
password = "secret"

[poll]
interval_secs = 300
day_report_hour = 23

[general]
log_path = "/tmp/goodwe-poller.log"
log_level = "debug"
log_to_stdout = true
"#;

    #[test]
    fn test_parse_config() {
        let config = parse_config(CONFIG).unwrap();

        assert_eq!(config.sems.account, "me@example.com");
        assert_eq!(config.poll.interval_secs, 300);
        assert_eq!(config.general.log_level, LevelFilter::Debug);
        assert!(config.general.log_to_stdout);
    }

    #[test]
    fn test_reject_bad_report_hour() {
        let toml = CONFIG.replace("day_report_hour = 23", "day_report_hour = 24");
        assert!(matches!(parse_config(&toml), Err(ConfigError::Parameter(_))));
    }

    #[test]
    fn test_reject_missing_section() {
        let toml = CONFIG.replace("[poll]\ninterval_secs = 300\nday_report_hour = 23\n", "");
        assert!(matches!(parse_config(&toml), Err(ConfigError::Toml(_))));
    }
}
