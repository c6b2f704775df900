//! Time-indexed series of bars or ticks
//!
//! A [`Series`] is what a cache slot holds once its fragments have been
//! materialized: one row per distinct `time`, in arrival order, each row
//! carrying a derived display column (`bartime`/`ticktime`) that
//! duplicates `time`. Strategies never see a `Series` directly; they get
//! an immutable [`SeriesView`] copied out of it.

use athena_core::{FieldValue, Fragment, SeriesKey, SeriesKind, TIME_FIELD};
use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::error::RowDefect;

/// Result of merging a closed row into a series
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted {
    /// The row as stored, derived column included
    pub row: Fragment,
    /// True if a row with the same time was overwritten
    pub replaced: bool,
}

/// Materialized series owned by a cache slot
#[derive(Debug, Clone)]
pub struct Series {
    kind: SeriesKind,
    rows: Vec<Fragment>,
    /// time -> position in `rows`
    index: HashMap<u64, usize>,
    /// Last row is final rather than in progress
    closed: bool,
}

impl Series {
    pub fn new(kind: SeriesKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
            index: HashMap::new(),
            closed: false,
        }
    }

    /// Build a series from pending fragments, in arrival order
    ///
    /// Fragments without a usable `time` cannot be indexed and are skipped.
    /// A repeated time overwrites the earlier row in place.
    pub(crate) fn materialize(key: &SeriesKey, pending: Vec<Fragment>) -> Self {
        let mut series = Self::new(key.kind());
        series.rows.reserve(pending.len());

        for fragment in pending {
            let Some(time) = fragment.time() else {
                warn!("[{}] skipping fragment without a usable time: {:?}", key, fragment);
                continue;
            };
            series.put(time, fragment);
        }
        series
    }

    /// Insert or replace the row at `row.time`
    ///
    /// Once the series has rows, a new row must carry the same columns with
    /// compatible kinds; an incoming derived column is ignored and
    /// re-derived. Marks the series closed on success.
    pub(crate) fn upsert(&mut self, mut row: Fragment) -> Result<Upserted, RowDefect> {
        row.remove(self.kind.derived_field());

        let time = match row.get(TIME_FIELD) {
            None => return Err(RowDefect::MissingTime),
            Some(value) => value
                .as_time()
                .ok_or_else(|| RowDefect::InvalidTime(value.to_string()))?,
        };
        self.check_schema(&row)?;

        let replaced = self.put(time, row);
        self.closed = true;

        let position = self.index[&time];
        Ok(Upserted {
            row: self.rows[position].clone(),
            replaced,
        })
    }

    /// Columns of the series, taken from its first row
    fn check_schema(&self, row: &Fragment) -> Result<(), RowDefect> {
        let Some(first) = self.rows.first() else {
            return Ok(());
        };
        let derived = self.kind.derived_field();

        for (name, value) in first.iter().filter(|(name, _)| name.as_str() != derived) {
            let incoming = row
                .get(name)
                .ok_or_else(|| RowDefect::MissingField(name.clone()))?;
            if !value.kind().is_compatible(incoming.kind()) {
                return Err(RowDefect::KindMismatch {
                    field: name.clone(),
                    expected: value.kind(),
                    found: incoming.kind(),
                });
            }
        }

        match row.field_names().find(|name| !first.contains(name)) {
            Some(extra) => Err(RowDefect::UnexpectedField(extra.to_string())),
            None => Ok(()),
        }
    }

    /// Returns true if an existing row was replaced
    fn put(&mut self, time: u64, mut row: Fragment) -> bool {
        row.insert_first(self.kind.derived_field(), FieldValue::Time(time));

        match self.index.get(&time) {
            Some(&position) => {
                self.rows[position] = row;
                true
            }
            None => {
                self.index.insert(time, self.rows.len());
                self.rows.push(row);
                false
            }
        }
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn get(&self, time: u64) -> Option<&Fragment> {
        self.index.get(&time).map(|&position| &self.rows[position])
    }

    /// Last `count` rows (all of them if the series is shorter)
    pub fn tail(&self, count: usize) -> &[Fragment] {
        let start = self.rows.len().saturating_sub(count);
        &self.rows[start..]
    }
}

/// Immutable snapshot of the tail of a series
///
/// Copied out of the cache, so holding one never blocks or corrupts
/// cache updates.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesView {
    key: SeriesKey,
    rows: Vec<Fragment>,
    closed: bool,
}

impl SeriesView {
    pub(crate) fn from_tail(key: &SeriesKey, series: &Series, count: usize) -> Self {
        Self {
            key: key.clone(),
            rows: series.tail(count).to_vec(),
            closed: series.is_closed(),
        }
    }

    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    pub fn kind(&self) -> SeriesKind {
        self.key.kind()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Last row is final (a closed bar was merged after the pull)
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn rows(&self) -> &[Fragment] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fragment> {
        self.rows.iter()
    }

    pub fn first(&self) -> Option<&Fragment> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&Fragment> {
        self.rows.last()
    }

    pub fn get(&self, time: u64) -> Option<&Fragment> {
        self.rows.iter().rev().find(|row| row.time() == Some(time))
    }

    /// Row times, oldest first
    pub fn times(&self) -> Vec<u64> {
        self.rows.iter().filter_map(Fragment::time).collect()
    }

    /// One column; `None` where a row lacks the field
    pub fn column(&self, name: &str) -> Vec<Option<&FieldValue>> {
        self.rows.iter().map(|row| row.get(name)).collect()
    }

    /// Numeric column, skipping rows where the field is absent or text
    pub fn numbers(&self, name: &str) -> Vec<Decimal> {
        self.rows.iter().filter_map(|row| row.number(name)).collect()
    }
}

impl<'a> IntoIterator for &'a SeriesView {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use athena_core::Period;
    use rust_decimal_macros::dec;

    fn key() -> SeriesKey {
        SeriesKey::bars("SHFE.ag.HOT", Period::minutes(1).unwrap())
    }

    fn bar(time: u64, close: Decimal) -> Fragment {
        Fragment::at(time).with("close", close).with("volume", dec!(10))
    }

    #[test]
    fn test_materialize_derives_display_column() {
        let series = Series::materialize(&key(), vec![bar(1031, dec!(1)), bar(1032, dec!(2))]);

        assert_eq!(series.len(), 2);
        assert!(!series.is_closed());
        let row = series.get(1032).unwrap();
        let names: Vec<_> = row.field_names().collect();
        assert_eq!(names, vec!["bartime", "time", "close", "volume"]);
        assert_eq!(row.get("bartime"), Some(&FieldValue::Time(1032)));
    }

    #[test]
    fn test_materialize_skips_rows_without_time() {
        let orphan = Fragment::new().with("close", dec!(3));
        let series = Series::materialize(&key(), vec![bar(1031, dec!(1)), orphan]);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_materialize_repeated_time_upserts() {
        let series = Series::materialize(
            &key(),
            vec![bar(1031, dec!(1)), bar(1032, dec!(2)), bar(1031, dec!(9))],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.tail(2)[0].number("close"), Some(dec!(9)));
    }

    #[test]
    fn test_upsert_schema_checks() {
        let mut series = Series::materialize(&key(), vec![bar(1031, dec!(1))]);

        let missing = Fragment::at(1032).with("close", dec!(2));
        assert_eq!(
            series.upsert(missing),
            Err(RowDefect::MissingField("volume".to_string()))
        );

        let extra = bar(1032, dec!(2)).with("oi", dec!(5));
        assert_eq!(
            series.upsert(extra),
            Err(RowDefect::UnexpectedField("oi".to_string()))
        );

        let text = Fragment::at(1032).with("close", "n/a").with("volume", dec!(1));
        assert!(matches!(
            series.upsert(text),
            Err(RowDefect::KindMismatch { .. })
        ));

        assert_eq!(
            series.upsert(Fragment::new().with("close", dec!(2))),
            Err(RowDefect::MissingTime)
        );
        assert!(matches!(
            series.upsert(bar(0, dec!(2)).with(TIME_FIELD, "later")),
            Err(RowDefect::InvalidTime(_))
        ));

        assert_eq!(series.len(), 1);
        assert!(!series.is_closed());
    }

    #[test]
    fn test_upsert_ignores_incoming_display_column() {
        let mut series = Series::materialize(&key(), vec![bar(1031, dec!(1))]);
        let row = bar(1032, dec!(2)).with("bartime", FieldValue::Time(999));

        let upserted = series.upsert(row).unwrap();
        assert!(!upserted.replaced);
        assert_eq!(upserted.row.get("bartime"), Some(&FieldValue::Time(1032)));
        assert!(series.is_closed());
    }

    #[test]
    fn test_empty_series_accepts_any_columns() {
        let mut series = Series::materialize(&key(), Vec::new());
        let upserted = series.upsert(Fragment::at(1031).with("close", dec!(1))).unwrap();
        assert!(!upserted.replaced);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_view_accessors() {
        let series = Series::materialize(
            &key(),
            vec![bar(1031, dec!(1)), bar(1032, dec!(2)), bar(1033, dec!(3))],
        );
        let view = SeriesView::from_tail(&key(), &series, 2);

        assert_eq!(view.len(), 2);
        assert_eq!(view.times(), vec![1032, 1033]);
        assert_eq!(view.numbers("close"), vec![dec!(2), dec!(3)]);
        assert_eq!(view.first().and_then(Fragment::time), Some(1032));
        assert!(view.get(1031).is_none());
        assert_eq!(view.column("missing"), vec![None, None]);
    }
}
