//! HFT Context
//!
//! The only object a strategy talks to. Queries and commands are mirrored
//! 1:1 from the engine; bar and tick history goes through the incremental
//! cache first and falls back to an engine pull on a miss.

use athena_core::{
    EngineClock, InstrumentId, LocalOrderId, OrderIdSet, Period, Price, ProductInfo, Quantity,
    SeriesKey, Side,
};
use athena_ports::{HftEngine, ProductCatalog, StrategyId};
use log::{debug, info, warn};
use std::fmt::Display;
use std::str::FromStr;

use crate::cache::{MarketDataCache, SlotState};
use crate::config::ContextConfig;
use crate::error::Result;
use crate::gateway::CommandGateway;
use crate::series::SeriesView;
use crate::user_data::UserDataStore;

/// Per-strategy context over an engine `E`
pub struct HftContext<E: HftEngine> {
    config: ContextConfig,
    engine: E,
    catalog: Option<Box<dyn ProductCatalog>>,
    market: MarketDataCache,
    gateway: CommandGateway,
    user_data: UserDataStore,
}

impl<E: HftEngine> HftContext<E> {
    pub fn new(config: ContextConfig, engine: E) -> Self {
        let gateway = CommandGateway::new(config.strategy_id);
        let user_data = UserDataStore::new(config.strategy_id);
        Self {
            config,
            engine,
            catalog: None,
            market: MarketDataCache::new(),
            gateway,
            user_data,
        }
    }

    /// Attach a product catalog for `get_comminfo`
    pub fn with_catalog(mut self, catalog: impl ProductCatalog + 'static) -> Self {
        self.catalog = Some(Box::new(catalog));
        self
    }

    pub fn strategy_id(&self) -> StrategyId {
        self.config.strategy_id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn market(&self) -> &MarketDataCache {
        &self.market
    }

    pub(crate) fn market_mut(&mut self) -> &mut MarketDataCache {
        &mut self.market
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    // === Logging ===

    /// Write to the engine's strategy log
    pub fn log_text(&mut self, message: &str) {
        info!("[{}] {}", self.config.name, message);
        self.engine.log_text(self.config.strategy_id, message);
    }

    // === Time ===

    /// Current date, `YYYYMMDD`
    pub fn get_date(&self) -> u32 {
        self.engine.date()
    }

    /// Current time, `HHMM`
    pub fn get_time(&self) -> u32 {
        self.engine.time()
    }

    /// Seconds within the minute, in milliseconds
    pub fn get_secs(&self) -> u32 {
        self.engine.secs()
    }

    pub fn get_clock(&self) -> EngineClock {
        EngineClock::new(self.engine.date(), self.engine.time(), self.engine.secs())
    }

    // === Market data ===

    pub fn get_price(&self, instrument: &InstrumentId) -> Price {
        self.engine.price(instrument)
    }

    /// Last `count` bars of `instrument` at `period`
    ///
    /// Served from the cache when a series is ready; otherwise pulled from
    /// the engine. `None` means the engine had no data.
    pub fn get_bars(
        &mut self,
        instrument: &InstrumentId,
        period: Period,
        count: usize,
    ) -> Option<SeriesView> {
        let count = self.effective_count(count);
        let key = SeriesKey::bars(instrument, period);

        if let Some(view) = self.market.bars.slice(&key, count) {
            return Some(view);
        }

        if let SlotState::Building { pending } = self.market.bars.state(&key) {
            debug!(
                "[{}] discarding interrupted build of {} ({} pending)",
                self.config.name, key, pending
            );
            self.market.bars.discard(&key);
        }

        let pulled = self.engine.pull_bars(
            self.config.strategy_id,
            instrument,
            &period,
            count,
            &mut self.market,
        );
        if pulled == 0 {
            // Zero rows is "no data"; the key stays a miss
            self.market.bars.discard(&key);
            debug!("[{}] no bars for {}", self.config.name, key);
            return None;
        }

        let view = self.market.bars.slice(&key, count);
        if view.is_none() {
            warn!(
                "[{}] engine reported {} bars for {} but never finished the stream",
                self.config.name, pulled, key
            );
        }
        view
    }

    /// Same as [`Self::get_bars`] with the period in text form (`m5`, `d1`)
    pub fn get_bars_str(
        &mut self,
        instrument: &InstrumentId,
        period: &str,
        count: usize,
    ) -> Result<Option<SeriesView>> {
        let period = Period::from_str(period)?;
        Ok(self.get_bars(instrument, period, count))
    }

    /// Last `count` ticks of `instrument`
    ///
    /// The tick cache is a transfer buffer: unless passthrough is disabled
    /// in the config, every call re-pulls from the engine.
    pub fn get_ticks(&mut self, instrument: &InstrumentId, count: usize) -> Option<SeriesView> {
        let count = self.effective_count(count);
        let key = SeriesKey::ticks(instrument);

        if !self.config.tick_cache_passthrough {
            if let Some(view) = self.market.ticks.slice(&key, count) {
                return Some(view);
            }
        }

        self.market.ticks.discard(&key);
        let pulled = self.engine.pull_ticks(
            self.config.strategy_id,
            instrument,
            count,
            &mut self.market,
        );
        if pulled == 0 {
            self.market.ticks.discard(&key);
            debug!("[{}] no ticks for {}", self.config.name, key);
            return None;
        }

        self.market.ticks.slice(&key, count)
    }

    fn effective_count(&self, count: usize) -> usize {
        if count == 0 {
            self.config.default_history_count
        } else {
            count
        }
    }

    /// Subscribe to live ticks of an extra instrument
    ///
    /// Instruments whose history was requested are subscribed by the engine
    /// already.
    pub fn sub_ticks(&mut self, instrument: &InstrumentId) {
        self.engine.sub_ticks(self.config.strategy_id, instrument);
    }

    // === Positions and orders ===

    /// Net position: positive long, negative short
    pub fn get_position(&self, instrument: &InstrumentId) -> Quantity {
        self.engine.position(self.config.strategy_id, instrument)
    }

    /// Number of orders still working
    pub fn get_undone(&self, instrument: &InstrumentId) -> i64 {
        self.engine.undone(self.config.strategy_id, instrument)
    }

    /// Product details; `None` without a catalog or for unknown codes
    pub fn get_comminfo(&self, code: &InstrumentId) -> Option<ProductInfo> {
        self.catalog.as_ref()?.product_info(code)
    }

    /// Buy `qty` at `price`; zero price is a market order
    pub fn buy(&mut self, instrument: &InstrumentId, price: Price, qty: Quantity) -> OrderIdSet {
        self.gateway.buy(&mut self.engine, instrument, price, qty)
    }

    /// Sell `qty` at `price`; zero price is a market order
    pub fn sell(&mut self, instrument: &InstrumentId, price: Price, qty: Quantity) -> OrderIdSet {
        self.gateway.sell(&mut self.engine, instrument, price, qty)
    }

    pub fn cancel(&mut self, local_id: LocalOrderId) -> bool {
        self.gateway.cancel(&mut self.engine, local_id)
    }

    /// Cancel all buy (`is_buy`) or all sell orders of `instrument`
    pub fn cancel_all(&mut self, instrument: &InstrumentId, is_buy: bool) -> OrderIdSet {
        self.gateway
            .cancel_all(&mut self.engine, instrument, Side::from_is_buy(is_buy))
    }

    // === User data ===

    pub fn save_data<T: Display>(&mut self, key: &str, value: T) {
        self.user_data.save(&mut self.engine, key, value);
    }

    /// Load a stored value, `default` if nothing is stored
    pub fn load_data<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.user_data.load(&self.engine, key, default)
    }

    /// Load a stored value through a custom conversion
    pub fn load_data_with<T, F, CE>(&self, key: &str, default: T, convert: F) -> Result<T>
    where
        F: FnOnce(&str) -> std::result::Result<T, CE>,
        CE: Display,
    {
        self.user_data.load_with(&self.engine, key, default, convert)
    }
}
