use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("ConfigError::Toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("ConfigError::Parameter: {0}")]
    Parameter(String),
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError::Parameter(e.to_string()) }
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("LoggingError::Appender: {0}")]
    Appender(#[from] std::io::Error),
    #[error("LoggingError::Config: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("LoggingError::SetLogger: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}
