use thiserror::Error;

use crate::Time;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Negative weight {weight} while traversing segment '{segment}'")]
    NegativeWeight { weight: f64, segment: String },
    #[error("Clock overflow at time {time} while traversing segment '{segment}'")]
    TimeOverflow { time: Time, segment: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
