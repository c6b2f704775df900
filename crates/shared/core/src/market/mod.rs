//! Market data vocabulary: periods, series keys and raw row fragments

mod field;
mod key;
mod period;

pub use field::{FieldKind, FieldValue, Fragment, TIME_FIELD};
pub use key::{SeriesKey, SeriesKind};
pub use period::{Period, PeriodParseError, PeriodUnit};
