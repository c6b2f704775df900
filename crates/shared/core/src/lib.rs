//! Athena Core Domain
//!
//! Pure domain types for the Athena HFT strategy context.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod instruments;
pub mod market;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Engine clock readings
    EngineClock,
    // Order lifecycle events
    EntrustAck,
    // Local order identifiers
    LocalOrderId,
    OrderIdParseError,
    OrderIdSet,
    OrderUpdate,
    Side,
    TradeFill,
};
pub use instruments::{InstrumentId, ProductInfo};
pub use market::{
    FieldKind, FieldValue, Fragment, Period, PeriodParseError, PeriodUnit, SeriesKey, SeriesKind,
    TIME_FIELD,
};
pub use values::{Price, Quantity, Timestamp};
