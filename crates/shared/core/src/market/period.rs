use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Base unit of a bar period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodUnit {
    Minute,
    Day,
}

impl PeriodUnit {
    pub fn as_char(&self) -> char {
        match self {
            Self::Minute => 'm',
            Self::Day => 'd',
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("Empty period")]
    Empty,

    #[error("Unknown period unit '{0}'")]
    UnknownUnit(char),

    #[error("Invalid period multiplier '{0}'")]
    InvalidMultiplier(String),
}

/// Bar period: base unit plus multiplier
///
/// Text form is the unit letter followed by the multiplier, `m5` for
/// five-minute bars and `d1` for daily bars. A bare letter means a
/// multiplier of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    unit: PeriodUnit,
    multiplier: u32,
}

impl Period {
    /// Returns `None` for a zero multiplier
    pub fn new(unit: PeriodUnit, multiplier: u32) -> Option<Self> {
        (multiplier > 0).then_some(Self { unit, multiplier })
    }

    pub fn minutes(multiplier: u32) -> Option<Self> {
        Self::new(PeriodUnit::Minute, multiplier)
    }

    pub fn days(multiplier: u32) -> Option<Self> {
        Self::new(PeriodUnit::Day, multiplier)
    }

    pub fn unit(&self) -> PeriodUnit {
        self.unit
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.unit.as_char(), self.multiplier)
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let unit = match chars.next() {
            None => return Err(PeriodParseError::Empty),
            Some('m') | Some('M') => PeriodUnit::Minute,
            Some('d') | Some('D') => PeriodUnit::Day,
            Some(other) => return Err(PeriodParseError::UnknownUnit(other)),
        };

        let rest = chars.as_str();
        if rest.is_empty() {
            return Ok(Self { unit, multiplier: 1 });
        }

        rest.parse::<u32>()
            .ok()
            .and_then(|multiplier| Self::new(unit, multiplier))
            .ok_or_else(|| PeriodParseError::InvalidMultiplier(rest.to_string()))
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Period> for String {
    fn from(p: Period) -> Self {
        p.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let p: Period = "m5".parse().unwrap();
        assert_eq!(p.unit(), PeriodUnit::Minute);
        assert_eq!(p.multiplier(), 5);
        assert_eq!(p.to_string(), "m5");

        let d: Period = "d".parse().unwrap();
        assert_eq!(d, Period::days(1).unwrap());
        assert_eq!(d.to_string(), "d1");
    }

    #[test]
    fn test_rejects_bad_text() {
        assert_eq!("x3".parse::<Period>(), Err(PeriodParseError::UnknownUnit('x')));
        assert_eq!(
            "m0".parse::<Period>(),
            Err(PeriodParseError::InvalidMultiplier("0".to_string()))
        );
        assert_eq!(
            "m-1".parse::<Period>(),
            Err(PeriodParseError::InvalidMultiplier("-1".to_string()))
        );
        assert_eq!("".parse::<Period>(), Err(PeriodParseError::Empty));
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        assert!(Period::minutes(0).is_none());
    }

    #[test]
    fn test_serde_uses_text_form() {
        let p = Period::minutes(15).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"m15\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
