//! Incremental Series Cache
//!
//! Turns the engine's push-style fragment stream into queryable series.
//! Each key moves through an explicit state machine:
//!
//! ```text
//!            ingest(Some/None, false)
//!   Empty ─────────────────────────────► Building(pending)
//!     │                                     │   ▲
//!     │ ingest(_, true)                     │   │ ingest(_, false)
//!     ▼                                     ▼   │ (restart, ready rows discarded)
//!   Ready(series) ◄──── ingest(_, true) ─────   │
//!     │  ▲                                      │
//!     └──┘ upsert_closed_row                    │
//!     └─────────────────────────────────────────┘
//! ```
//!
//! Materialization happens exactly once per pull, on the fragment marked
//! `is_last`. After that only closed-row upserts change the series until
//! the next pull restarts the build.

use athena_core::{Fragment, InstrumentId, Period, SeriesKey, SeriesKind};
use athena_ports::FragmentSink;
use log::{debug, trace};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::series::{Series, SeriesView, Upserted};

/// Representation held by an occupied cache slot
#[derive(Debug, Clone)]
enum Slot {
    Building(Vec<Fragment>),
    Ready(Series),
}

/// Observable state of one cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Building { pending: usize },
    Ready { len: usize, closed: bool },
}

/// Cache of series of one kind (bars or ticks), keyed by [`SeriesKey`]
#[derive(Debug, Clone)]
pub struct SeriesCache {
    kind: SeriesKind,
    slots: HashMap<SeriesKey, Slot>,
}

impl SeriesCache {
    pub fn new(kind: SeriesKind) -> Self {
        Self {
            kind,
            slots: HashMap::new(),
        }
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Accumulate one fragment for `key`, materializing on `is_last`
    ///
    /// A key that is empty or already ready starts a fresh build; a ready
    /// series is discarded rather than mixed with new fragments.
    pub fn ingest(&mut self, key: SeriesKey, fragment: Option<Fragment>, is_last: bool) {
        let slot = self
            .slots
            .entry(key.clone())
            .or_insert_with(|| Slot::Building(Vec::new()));

        if let Slot::Ready(series) = slot {
            debug!(
                "[{}] new build started, discarding {} ready rows",
                key,
                series.len()
            );
            *slot = Slot::Building(Vec::new());
        }

        if let Slot::Building(pending) = slot {
            if let Some(fragment) = fragment {
                pending.push(fragment);
            }
            if is_last {
                let rows = std::mem::take(pending);
                let series = Series::materialize(&key, rows);
                trace!("[{}] materialized {} rows", key, series.len());
                *slot = Slot::Ready(series);
            }
        }
    }

    /// Merge a closed row into the ready series for `key`
    ///
    /// Returns `Ok(None)` when there is no ready series to close into; the
    /// cache is left untouched in that case and on error.
    pub fn upsert_closed_row(&mut self, key: &SeriesKey, row: Fragment) -> Result<Option<Upserted>> {
        let Some(Slot::Ready(series)) = self.slots.get_mut(key) else {
            return Ok(None);
        };

        series
            .upsert(row)
            .map(Some)
            .map_err(|reason| Error::MalformedUpdate {
                key: key.clone(),
                reason,
            })
    }

    /// Last `count` rows of the ready series for `key`
    ///
    /// `None` is a miss: nothing ready under this key, the caller should
    /// pull from the engine. A ready but empty series is `Some` of an
    /// empty view.
    pub fn slice(&self, key: &SeriesKey, count: usize) -> Option<SeriesView> {
        match self.slots.get(key) {
            Some(Slot::Ready(series)) => Some(SeriesView::from_tail(key, series, count)),
            _ => None,
        }
    }

    pub fn state(&self, key: &SeriesKey) -> SlotState {
        match self.slots.get(key) {
            None => SlotState::Empty,
            Some(Slot::Building(pending)) => SlotState::Building {
                pending: pending.len(),
            },
            Some(Slot::Ready(series)) => SlotState::Ready {
                len: series.len(),
                closed: series.is_closed(),
            },
        }
    }

    /// Drop whatever is held under `key`; returns true if something was dropped
    pub fn discard(&mut self, key: &SeriesKey) -> bool {
        self.slots.remove(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SeriesKey> {
        self.slots.keys()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Bar and tick caches of one context
///
/// Doubles as the sink the engine pushes history into during a pull.
#[derive(Debug, Clone)]
pub struct MarketDataCache {
    pub bars: SeriesCache,
    pub ticks: SeriesCache,
}

impl MarketDataCache {
    pub fn new() -> Self {
        Self {
            bars: SeriesCache::new(SeriesKind::Bar),
            ticks: SeriesCache::new(SeriesKind::Tick),
        }
    }
}

impl Default for MarketDataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentSink for MarketDataCache {
    fn bar_fragment(
        &mut self,
        instrument: &InstrumentId,
        period: &Period,
        fragment: Option<Fragment>,
        is_last: bool,
    ) {
        self.bars
            .ingest(SeriesKey::bars(instrument, *period), fragment, is_last);
    }

    fn tick_fragment(&mut self, instrument: &InstrumentId, fragment: Option<Fragment>, is_last: bool) {
        self.ticks
            .ingest(SeriesKey::ticks(instrument), fragment, is_last);
    }
}
