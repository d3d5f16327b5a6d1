use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use crate::config::General;
use crate::errors::LoggingError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {t} - {m}{n}";

/// Sets up logging to file and, if so configured, to stdout
///
/// # Arguments
///
/// * 'general' - log path, level and whether to log to stdout
pub fn setup_logger(general: &General) -> Result<Handle, LoggingError> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&general.log_path)?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let config = builder.build(root.build(general.log_level))?;

    Ok(log4rs::init_config(config)?)
}
