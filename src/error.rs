use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the engine's parsing and loading boundaries.
///
/// Position, aspect and series computations never fail; these only surface
/// from strict parsers, configuration loading and external position sources.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid instant: {input:?}")]
    InvalidInstant { input: String },
    #[error("invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("unknown body: {0}")]
    UnknownBody(String),
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid calendar config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to decode position response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("position source failed: {0}")]
    Source(String),
}
