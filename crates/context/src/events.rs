//! Engine Events - everything the engine pushes into a context
//!
//! One variant per row of the dispatch table. Events are plain data so
//! they can cross a channel or be replayed from a capture file.

use athena_core::{EntrustAck, Fragment, InstrumentId, OrderUpdate, Period, TradeFill};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Strategy start-up
    Init,
    /// One row of a tick history stream
    TickFragment {
        instrument: InstrumentId,
        #[serde(default)]
        fragment: Option<Fragment>,
        is_last: bool,
    },
    /// One row of a bar history stream
    BarFragment {
        instrument: InstrumentId,
        period: Period,
        #[serde(default)]
        fragment: Option<Fragment>,
        is_last: bool,
    },
    /// A bar interval was finalized at the venue
    BarClosed {
        instrument: InstrumentId,
        period: Period,
        bar: Fragment,
    },
    /// Live tick
    NewTick {
        instrument: InstrumentId,
        tick: Fragment,
    },
    ChannelReady,
    ChannelLost,
    Entrust(EntrustAck),
    Order(OrderUpdate),
    Trade(TradeFill),
}

impl EngineEvent {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::TickFragment { .. } => "tick_fragment",
            Self::BarFragment { .. } => "bar_fragment",
            Self::BarClosed { .. } => "bar_closed",
            Self::NewTick { .. } => "new_tick",
            Self::ChannelReady => "channel_ready",
            Self::ChannelLost => "channel_lost",
            Self::Entrust(_) => "entrust",
            Self::Order(_) => "order",
            Self::Trade(_) => "trade",
        }
    }

    /// Instrument the event relates to, if any
    pub fn instrument(&self) -> Option<&InstrumentId> {
        match self {
            Self::TickFragment { instrument, .. }
            | Self::BarFragment { instrument, .. }
            | Self::BarClosed { instrument, .. }
            | Self::NewTick { instrument, .. } => Some(instrument),
            Self::Entrust(ack) => Some(&ack.instrument),
            Self::Order(update) => Some(&update.instrument),
            Self::Trade(fill) => Some(&fill.instrument),
            Self::Init | Self::ChannelReady | Self::ChannelLost => None,
        }
    }

    pub fn bar_closed(instrument: impl Into<InstrumentId>, period: Period, bar: Fragment) -> Self {
        Self::BarClosed {
            instrument: instrument.into(),
            period,
            bar,
        }
    }

    pub fn new_tick(instrument: impl Into<InstrumentId>, tick: Fragment) -> Self {
        Self::NewTick {
            instrument: instrument.into(),
            tick,
        }
    }
}
