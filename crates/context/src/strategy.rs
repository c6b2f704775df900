//! Strategy Trait
//!
//! The capability set a strategy implements. Every callback is a
//! fire-and-forget notification: the strategy reacts by querying the
//! context and issuing commands through it, never by returning values.

use athena_core::{EntrustAck, Fragment, InstrumentId, OrderUpdate, Period, TradeFill};
use athena_ports::HftEngine;

use crate::context::HftContext;

/// Strategy trait - implement this for your HFT strategy
///
/// Market data arrives as immutable snapshots; the cache behind the
/// context cannot be modified through them.
pub trait Strategy<E: HftEngine> {
    /// Strategy name for logging
    fn name(&self) -> &str;

    /// Called once when the engine starts the strategy
    fn on_init(&mut self, _ctx: &mut HftContext<E>) {}

    /// Called on every live tick of a subscribed instrument
    fn on_tick(&mut self, _ctx: &mut HftContext<E>, _instrument: &InstrumentId, _tick: &Fragment) {
    }

    /// Called when a bar closes, after it has been merged into the bar cache
    fn on_bar(
        &mut self,
        _ctx: &mut HftContext<E>,
        _instrument: &InstrumentId,
        _period: &Period,
        _bar: &Fragment,
    ) {
    }

    /// Trading channel connected
    fn on_channel_ready(&mut self, _ctx: &mut HftContext<E>) {}

    /// Trading channel disconnected
    fn on_channel_lost(&mut self, _ctx: &mut HftContext<E>) {}

    /// Engine acknowledged (or rejected) an order placement
    fn on_entrust(&mut self, _ctx: &mut HftContext<E>, _ack: &EntrustAck) {}

    /// Own order status changed
    fn on_order(&mut self, _ctx: &mut HftContext<E>, _update: &OrderUpdate) {}

    /// Own order filled (fully or partially)
    fn on_trade(&mut self, _ctx: &mut HftContext<E>, _fill: &TradeFill) {}
}
