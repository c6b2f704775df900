use serde::{Deserialize, Serialize};
use std::fmt;

use super::Period;
use crate::instruments::InstrumentId;

/// Whether a series holds bars or ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Bar,
    Tick,
}

impl SeriesKind {
    /// Name of the display column duplicating `time` on every row
    pub fn derived_field(&self) -> &'static str {
        match self {
            Self::Bar => "bartime",
            Self::Tick => "ticktime",
        }
    }
}

/// Cache key for one series
///
/// Bars are keyed by instrument and period, ticks by instrument alone.
/// Two bar series of the same instrument with different periods are
/// distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub instrument: InstrumentId,
    pub period: Option<Period>,
}

impl SeriesKey {
    pub fn bars(instrument: impl Into<InstrumentId>, period: Period) -> Self {
        Self {
            instrument: instrument.into(),
            period: Some(period),
        }
    }

    pub fn ticks(instrument: impl Into<InstrumentId>) -> Self {
        Self {
            instrument: instrument.into(),
            period: None,
        }
    }

    pub fn kind(&self) -> SeriesKind {
        match self.period {
            Some(_) => SeriesKind::Bar,
            None => SeriesKind::Tick,
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.period {
            Some(period) => write!(f, "{}@{}", self.instrument, period),
            None => write!(f, "{}@tick", self.instrument),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_periods_are_distinct_keys() {
        let m1 = SeriesKey::bars("SHFE.ag.HOT", Period::minutes(1).unwrap());
        let m5 = SeriesKey::bars("SHFE.ag.HOT", Period::minutes(5).unwrap());
        let tick = SeriesKey::ticks("SHFE.ag.HOT");

        let keys: HashSet<_> = [m1.clone(), m5, tick.clone(), m1.clone()].into_iter().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(m1.kind(), SeriesKind::Bar);
        assert_eq!(tick.kind(), SeriesKind::Tick);
    }

    #[test]
    fn test_display() {
        let key = SeriesKey::bars("SHFE.ag.HOT", Period::minutes(5).unwrap());
        assert_eq!(key.to_string(), "SHFE.ag.HOT@m5");
        assert_eq!(SeriesKey::ticks("SSE.600000").to_string(), "SSE.600000@tick");
    }
}
