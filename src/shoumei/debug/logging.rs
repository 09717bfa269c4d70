use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::fmt;

const PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

#[derive(Debug)]
pub enum LoggingError {
    Config(log4rs::config::runtime::ConfigErrors),
    Install(log::SetLoggerError),
}

impl From<log4rs::config::runtime::ConfigErrors> for LoggingError {
    fn from(err: log4rs::config::runtime::ConfigErrors) -> Self {
        LoggingError::Config(err)
    }
}

impl From<log::SetLoggerError> for LoggingError {
    fn from(err: log::SetLoggerError) -> Self {
        LoggingError::Install(err)
    }
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::Config(err) => write!(f, "bad logging config: {}", err),
            LoggingError::Install(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoggingError {}

/// Console logging to stdout at `level`.
pub fn config(level: LevelFilter) -> Result<Config, LoggingError> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    Ok(config)
}

pub fn init(level: LevelFilter) -> Result<log4rs::Handle, LoggingError> {
    let handle = log4rs::init_config(config(level)?)?;
    log::debug!("Logging at {}", level);
    Ok(handle)
}
