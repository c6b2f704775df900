use athena_core::{InstrumentId, LocalOrderId, Period, Price, Quantity};

use crate::FragmentSink;

/// Identifier the engine assigned to a strategy context
pub type StrategyId = u32;

/// Port for the native execution engine
///
/// Every call is synchronous and blocking from the context's point of
/// view. The engine reports failures in-band: rejected orders come back
/// as an empty id list, failed cancels as `false`. Implementations must
/// not call back into the context except through the supplied sink.
pub trait HftEngine {
    /// Current trading date, `YYYYMMDD`
    fn date(&self) -> u32;

    /// Current time of day, `HHMM`
    fn time(&self) -> u32;

    /// Seconds within the current minute, in milliseconds
    fn secs(&self) -> u32;

    /// Latest price of an instrument
    fn price(&self, instrument: &InstrumentId) -> Price;

    /// Pull up to `count` historical bars into `sink`; returns the number of rows delivered
    fn pull_bars(
        &mut self,
        strategy: StrategyId,
        instrument: &InstrumentId,
        period: &Period,
        count: usize,
        sink: &mut dyn FragmentSink,
    ) -> usize;

    /// Pull up to `count` historical ticks into `sink`; returns the number of rows delivered
    fn pull_ticks(
        &mut self,
        strategy: StrategyId,
        instrument: &InstrumentId,
        count: usize,
        sink: &mut dyn FragmentSink,
    ) -> usize;

    /// Net position (positive long, negative short)
    fn position(&self, strategy: StrategyId, instrument: &InstrumentId) -> Quantity;

    /// Number of orders still working at the venue
    fn undone(&self, strategy: StrategyId, instrument: &InstrumentId) -> i64;

    /// Subscribe to live ticks for an extra instrument
    fn sub_ticks(&mut self, strategy: StrategyId, instrument: &InstrumentId);

    /// Place a buy order; price zero means market. Replies with comma-separated local ids.
    fn buy(&mut self, strategy: StrategyId, instrument: &InstrumentId, price: Price, qty: Quantity)
    -> String;

    /// Place a sell order; price zero means market. Replies with comma-separated local ids.
    fn sell(
        &mut self,
        strategy: StrategyId,
        instrument: &InstrumentId,
        price: Price,
        qty: Quantity,
    ) -> String;

    fn cancel(&mut self, strategy: StrategyId, local_id: LocalOrderId) -> bool;

    /// Cancel every working order on one side; replies with the canceled local ids
    fn cancel_all(&mut self, strategy: StrategyId, instrument: &InstrumentId, is_buy: bool) -> String;

    fn log_text(&mut self, strategy: StrategyId, message: &str);

    fn save_user_data(&mut self, strategy: StrategyId, key: &str, value: &str);

    /// Stored text for `key`, or `default` when nothing is stored
    fn load_user_data(&self, strategy: StrategyId, key: &str, default: &str) -> String;
}
