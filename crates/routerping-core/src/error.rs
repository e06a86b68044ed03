use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PingError {
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("unknown time zone '{0}'")]
    InvalidTimeZone(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("malformed log record '{line}': {reason}")]
    MalformedRecord { line: String, reason: String },

    #[error("invalid log level '{0}': expected INFO, WARNING or ERROR")]
    InvalidLevel(String),

    #[error("invalid elapsed duration '{0}'")]
    InvalidDuration(String),

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("cannot resolve ambiguous local time {naive} in {tz}: {reason}")]
    AmbiguousTime {
        naive: String,
        tz: String,
        reason: String,
    },

    #[error("local time {naive} does not exist in {tz}")]
    NonexistentLocalTime { naive: String, tz: String },

    #[error("notification rejected: {0}")]
    Notify(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PingError>;
