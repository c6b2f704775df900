//! Event Dispatcher
//!
//! Routes each engine event to its cache mutation and then to at most one
//! strategy callback, in arrival order. Bar-closed updates that cannot be
//! merged are logged and dropped here; nothing raised by cache bookkeeping
//! ever reaches the strategy or the caller.

use athena_core::{Fragment, InstrumentId, Period, SeriesKey};
use athena_ports::HftEngine;
use log::{debug, trace, warn};

use crate::context::HftContext;
use crate::events::EngineEvent;
use crate::strategy::Strategy;

/// Counters kept by a dispatcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Events dispatched
    pub events: u64,
    /// Closed bars for keys without a ready series
    pub unsubscribed_bars: u64,
    /// Closed bars that could not be merged
    pub malformed_updates: u64,
}

/// Binds one strategy to its context
pub struct EventDispatcher<S, E>
where
    S: Strategy<E>,
    E: HftEngine,
{
    strategy: S,
    ctx: HftContext<E>,
    stats: DispatchStats,
}

impl<S, E> EventDispatcher<S, E>
where
    S: Strategy<E>,
    E: HftEngine,
{
    pub fn new(strategy: S, ctx: HftContext<E>) -> Self {
        Self {
            strategy,
            ctx,
            stats: DispatchStats::default(),
        }
    }

    /// Handle one engine event
    pub fn dispatch(&mut self, event: EngineEvent) {
        self.stats.events += 1;
        trace!("[{}] dispatch {}", self.ctx.name(), event.name());

        match event {
            EngineEvent::Init => self.strategy.on_init(&mut self.ctx),
            EngineEvent::TickFragment {
                instrument,
                fragment,
                is_last,
            } => {
                self.ctx
                    .market_mut()
                    .ticks
                    .ingest(SeriesKey::ticks(instrument), fragment, is_last);
            }
            EngineEvent::BarFragment {
                instrument,
                period,
                fragment,
                is_last,
            } => {
                self.ctx.market_mut().bars.ingest(
                    SeriesKey::bars(instrument, period),
                    fragment,
                    is_last,
                );
            }
            EngineEvent::BarClosed {
                instrument,
                period,
                bar,
            } => self.on_bar_closed(instrument, period, bar),
            EngineEvent::NewTick { instrument, tick } => {
                self.strategy.on_tick(&mut self.ctx, &instrument, &tick)
            }
            EngineEvent::ChannelReady => self.strategy.on_channel_ready(&mut self.ctx),
            EngineEvent::ChannelLost => self.strategy.on_channel_lost(&mut self.ctx),
            EngineEvent::Entrust(ack) => self.strategy.on_entrust(&mut self.ctx, &ack),
            EngineEvent::Order(update) => self.strategy.on_order(&mut self.ctx, &update),
            EngineEvent::Trade(fill) => self.strategy.on_trade(&mut self.ctx, &fill),
        }
    }

    /// Merge the closed bar, then notify the strategy if the merge happened
    fn on_bar_closed(&mut self, instrument: InstrumentId, period: Period, bar: Fragment) {
        let key = SeriesKey::bars(instrument, period);

        match self.ctx.market_mut().bars.upsert_closed_row(&key, bar) {
            Ok(Some(upserted)) => {
                self.strategy
                    .on_bar(&mut self.ctx, &key.instrument, &period, &upserted.row);
            }
            Ok(None) => {
                self.stats.unsubscribed_bars += 1;
                debug!(
                    "[{}] dropping closed bar for {}: no history cached",
                    self.ctx.name(),
                    key
                );
            }
            Err(e) => {
                self.stats.malformed_updates += 1;
                warn!("[{}] dropping closed bar: {}", self.ctx.name(), e);
            }
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    pub fn context(&self) -> &HftContext<E> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut HftContext<E> {
        &mut self.ctx
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn into_parts(self) -> (S, HftContext<E>) {
        (self.strategy, self.ctx)
    }
}
