use indexmap::IndexMap;
use indexmap::map::Iter;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the field every fragment is indexed by
pub const TIME_FIELD: &str = "time";

/// Variant tag of a [`FieldValue`], used for schema checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Number,
    Time,
    Text,
}

impl FieldKind {
    /// Numbers and times share a column; text only matches text
    pub fn is_compatible(&self, other: FieldKind) -> bool {
        match (self, other) {
            (Self::Text, Self::Text) => true,
            (Self::Text, _) | (_, Self::Text) => false,
            _ => true,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::Time => "time",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// A single scalar field value pushed by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValue {
    Number(Decimal),
    /// Engine timestamp, e.g. `202305121031` for bars or
    /// `20230512103100500` for ticks
    Time(u64),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Number(_) => FieldKind::Number,
            Self::Time(_) => FieldKind::Time,
            Self::Text(_) => FieldKind::Text,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Time(t) => Some(Decimal::from(*t)),
            Self::Text(_) => None,
        }
    }

    /// Time value; integral non-negative numbers are accepted as times
    pub fn as_time(&self) -> Option<u64> {
        match self {
            Self::Time(t) => Some(*t),
            Self::Number(n) if n.fract().is_zero() => n.to_u64(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Time(t) => write!(f, "{}", t),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<Decimal> for FieldValue {
    fn from(n: Decimal) -> Self {
        Self::Number(n)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One raw row pushed by the engine: field name to value, in arrival order
///
/// Every well-formed fragment carries a `time` field. The context never
/// assumes any other column; instruments differ in what they send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fragment(IndexMap<String, FieldValue>);

impl Fragment {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Create a fragment holding only its `time` field
    pub fn at(time: u64) -> Self {
        Self::new().with(TIME_FIELD, FieldValue::Time(time))
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or overwrite a field, keeping the original position on overwrite
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Insert a field at the front (used for the derived display column)
    pub fn insert_first(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.shift_insert(0, name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn number(&self, name: &str) -> Option<Decimal> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Row time; `None` if the field is missing or not an integral time
    pub fn time(&self) -> Option<u64> {
        self.get(TIME_FIELD).and_then(FieldValue::as_time)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, FieldValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Fragment {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fragment {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar() -> Fragment {
        Fragment::at(202305121031)
            .with("open", dec!(5321))
            .with("close", dec!(5324.5))
            .with("code", "SHFE.ag.HOT")
    }

    #[test]
    fn test_time_accessor() {
        assert_eq!(bar().time(), Some(202305121031));

        let numeric = Fragment::new().with(TIME_FIELD, dec!(1031));
        assert_eq!(numeric.time(), Some(1031));

        let fractional = Fragment::new().with(TIME_FIELD, dec!(1031.5));
        assert_eq!(fractional.time(), None);

        let text = Fragment::new().with(TIME_FIELD, "1031");
        assert_eq!(text.time(), None);

        assert_eq!(Fragment::new().time(), None);
    }

    #[test]
    fn test_preserves_arrival_order() {
        let mut row = bar();
        row.insert_first("bartime", FieldValue::Time(202305121031));
        let names: Vec<_> = row.field_names().collect();
        assert_eq!(names, vec!["bartime", "time", "open", "close", "code"]);

        // Overwrite keeps position
        row.insert("open", dec!(1));
        let names: Vec<_> = row.field_names().collect();
        assert_eq!(names[2], "open");
        assert_eq!(row.number("open"), Some(dec!(1)));
    }

    #[test]
    fn test_kind_compatibility() {
        assert!(FieldKind::Number.is_compatible(FieldKind::Time));
        assert!(FieldKind::Text.is_compatible(FieldKind::Text));
        assert!(!FieldKind::Number.is_compatible(FieldKind::Text));
    }

    #[test]
    fn test_json_shape() {
        let row = Fragment::at(1031).with("code", "ag");
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"time":{"time":1031},"code":{"text":"ag"}}"#);
        let back: Fragment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
