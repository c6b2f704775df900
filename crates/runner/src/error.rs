//! Error types for the runner crate

use thiserror::Error;

/// Errors raised by the strategy host
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: cannot decode event: {reason}")]
    Decode { line: usize, reason: String },

    #[error("event channel closed")]
    ChannelClosed,

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
