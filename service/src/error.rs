use std::io;
use std::path::PathBuf;

use lighthaus_composer::{ExternalLookupError, ScheduleFormatError, ValidationError};
use thiserror::Error;

/// Configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("initial gradient is invalid: {0}")]
    InitialGradient(#[from] ValidationError),
    #[error("pixel_count {requested} exceeds the supported maximum of {max}")]
    TooManyPixels { requested: usize, max: usize },
    #[error("tick_ms must be greater than zero")]
    ZeroTick,
    #[error("invalid sun time {0:?}, expected HH:MM")]
    SunTime(String),
    #[error("unknown time zone {0:?}")]
    TimeZone(String),
}

/// One schedule refresh failed; the previous schedule stays active
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("cannot read schedule file: {0}")]
    Read(#[from] io::Error),
    #[error(transparent)]
    Format(#[from] ScheduleFormatError),
    #[error("sun times lookup failed: {0}")]
    Lookup(#[from] ExternalLookupError),
    #[error("control inbox is full")]
    InboxFull,
}

/// A request line from a client was rejected
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid request: {0}")]
    Invalid(#[from] ValidationError),
    #[error("controller is busy, try again")]
    InboxFull,
}

/// Fatal service error
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: io::Error,
    },
}
