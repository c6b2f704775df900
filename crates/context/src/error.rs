//! Context errors

use athena_core::{FieldKind, OrderIdParseError, PeriodParseError, SeriesKey};
use thiserror::Error;

/// Why a closed-bar row could not be merged into its series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowDefect {
    #[error("row has no time field")]
    MissingTime,

    #[error("time field '{0}' is not an integral timestamp")]
    InvalidTime(String),

    #[error("row is missing field '{0}'")]
    MissingField(String),

    #[error("row has unexpected field '{0}'")]
    UnexpectedField(String),

    #[error("field '{field}' is {found}, series holds {expected}")]
    KindMismatch {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot convert user data '{key}' from '{text}': {reason}")]
    Conversion {
        key: String,
        text: String,
        reason: String,
    },

    #[error("Malformed update for {key}: {reason}")]
    MalformedUpdate { key: SeriesKey, reason: RowDefect },

    #[error("Invalid period: {0}")]
    InvalidPeriod(#[from] PeriodParseError),

    #[error("Invalid order id reply '{reply}': {source}")]
    InvalidOrderIds {
        reply: String,
        #[source]
        source: OrderIdParseError,
    },

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
