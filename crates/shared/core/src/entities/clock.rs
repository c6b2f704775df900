use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Engine clock readings, in the engine's integer encodings
///
/// - `date`: `YYYYMMDD`, e.g. `20230512`
/// - `time`: `HHMM`, e.g. `1031`
/// - `secs`: seconds within the minute in milliseconds, e.g. `30500`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineClock {
    pub date: u32,
    pub time: u32,
    pub secs: u32,
}

impl EngineClock {
    pub fn new(date: u32, time: u32, secs: u32) -> Self {
        Self { date, time, secs }
    }

    /// Combine the readings; `None` if any part is out of range
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            (self.date / 10000) as i32,
            (self.date / 100) % 100,
            self.date % 100,
        )?;
        let time = NaiveTime::from_hms_milli_opt(
            self.time / 100,
            self.time % 100,
            self.secs / 1000,
            self.secs % 1000,
        )?;
        Some(NaiveDateTime::new(date, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_to_datetime() {
        let dt = EngineClock::new(20230512, 1031, 30500).to_datetime().unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 5, 12));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (10, 31, 30));
        assert_eq!(dt.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_invalid_readings() {
        assert!(EngineClock::new(20231332, 1031, 0).to_datetime().is_none());
        assert!(EngineClock::new(20230512, 2561, 0).to_datetime().is_none());
        assert!(EngineClock::new(20230512, 1031, 61000).to_datetime().is_none());
    }
}
