//! Offline Engine - in-process engine for replays and tests
//!
//! Serves stored history, answers queries from tables the host fills in,
//! and books orders into a resting list. Nothing ever fills: positions
//! only change when the host sets them.

use athena_core::{
    EngineClock, Fragment, InstrumentId, LocalOrderId, Period, Price, ProductInfo, Quantity, Side,
    Timestamp,
};
use athena_ports::{FragmentSink, HftEngine, ProductCatalog, StrategyId};
use chrono::{Datelike, Timelike};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// An order accepted by the offline engine and not yet canceled
#[derive(Debug, Clone, PartialEq)]
pub struct RestingOrder {
    pub local_id: LocalOrderId,
    pub strategy: StrategyId,
    pub instrument: InstrumentId,
    pub side: Side,
    /// Zero for market orders
    pub price: Price,
    pub qty: Quantity,
}

/// Product table keyed by product code (`SHFE.ag`)
#[derive(Debug, Clone, Default)]
pub struct ProductTable {
    products: HashMap<InstrumentId, ProductInfo>,
}

impl ProductTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: ProductInfo) {
        self.products.insert(info.code.clone(), info);
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for ProductTable {
    /// Exact code first, then the `exchange.product` prefix of a contract code
    fn product_info(&self, code: &InstrumentId) -> Option<ProductInfo> {
        if let Some(info) = self.products.get(code) {
            return Some(info.clone());
        }
        let prefix = InstrumentId::new(format!("{}.{}", code.exchange()?, code.product()?));
        self.products.get(&prefix).cloned()
    }
}

/// In-process [`HftEngine`]
#[derive(Debug, Clone)]
pub struct OfflineEngine {
    clock: EngineClock,
    bars: HashMap<(InstrumentId, Period), Vec<Fragment>>,
    ticks: HashMap<InstrumentId, Vec<Fragment>>,
    prices: HashMap<InstrumentId, Price>,
    positions: HashMap<(StrategyId, InstrumentId), Quantity>,
    products: ProductTable,
    next_local_id: LocalOrderId,
    resting: BTreeMap<LocalOrderId, RestingOrder>,
    subscriptions: Vec<InstrumentId>,
    user_data: HashMap<(StrategyId, String), String>,
    log: Vec<String>,
}

impl Default for OfflineEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OfflineEngine {
    pub fn new() -> Self {
        Self {
            clock: EngineClock::new(19700101, 0, 0),
            bars: HashMap::new(),
            ticks: HashMap::new(),
            prices: HashMap::new(),
            positions: HashMap::new(),
            products: ProductTable::new(),
            next_local_id: 1,
            resting: BTreeMap::new(),
            subscriptions: Vec::new(),
            user_data: HashMap::new(),
            log: Vec::new(),
        }
    }

    // === Setup ===

    pub fn set_clock(&mut self, clock: EngineClock) {
        self.clock = clock;
    }

    /// Set the clock from a UTC timestamp
    pub fn set_time(&mut self, now: Timestamp) {
        self.clock = EngineClock::new(
            now.year() as u32 * 10000 + now.month() * 100 + now.day(),
            now.hour() * 100 + now.minute(),
            now.second() * 1000 + now.timestamp_subsec_millis().min(999),
        );
    }

    /// Append bars to the stored history of `instrument` at `period`
    pub fn add_bars(
        &mut self,
        instrument: impl Into<InstrumentId>,
        period: Period,
        rows: impl IntoIterator<Item = Fragment>,
    ) {
        self.bars
            .entry((instrument.into(), period))
            .or_default()
            .extend(rows);
    }

    /// Append ticks to the stored history of `instrument`
    pub fn add_ticks(
        &mut self,
        instrument: impl Into<InstrumentId>,
        rows: impl IntoIterator<Item = Fragment>,
    ) {
        self.ticks
            .entry(instrument.into())
            .or_default()
            .extend(rows);
    }

    pub fn set_price(&mut self, instrument: impl Into<InstrumentId>, price: Price) {
        self.prices.insert(instrument.into(), price);
    }

    pub fn set_position(
        &mut self,
        strategy: StrategyId,
        instrument: impl Into<InstrumentId>,
        qty: Quantity,
    ) {
        self.positions.insert((strategy, instrument.into()), qty);
    }

    pub fn add_product(&mut self, info: ProductInfo) {
        self.products.insert(info);
    }

    // === Inspection ===

    pub fn clock(&self) -> EngineClock {
        self.clock
    }

    /// Copy of the product table, to attach as a context catalog
    pub fn products(&self) -> ProductTable {
        self.products.clone()
    }

    /// Resting orders in id order
    pub fn resting_orders(&self) -> impl Iterator<Item = &RestingOrder> {
        self.resting.values()
    }

    pub fn subscriptions(&self) -> &[InstrumentId] {
        &self.subscriptions
    }

    /// Lines written through `log_text`
    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    // === Internals ===

    fn place(
        &mut self,
        strategy: StrategyId,
        instrument: &InstrumentId,
        side: Side,
        price: Price,
        qty: Quantity,
    ) -> String {
        if qty <= Decimal::ZERO || price < Decimal::ZERO {
            warn!(
                "Offline engine rejecting {:?} {} {} @ {}",
                side, qty, instrument, price
            );
            return String::new();
        }

        let local_id = self.next_local_id;
        self.next_local_id += 1;
        self.resting.insert(
            local_id,
            RestingOrder {
                local_id,
                strategy,
                instrument: instrument.clone(),
                side,
                price,
                qty,
            },
        );
        debug!(
            "Offline engine booked #{}: {:?} {} {} @ {}",
            local_id, side, qty, instrument, price
        );
        local_id.to_string()
    }

    /// Last `count` rows, delivered in order with the final one flagged
    fn serve(rows: &[Fragment], count: usize, mut push: impl FnMut(Option<Fragment>, bool)) -> usize {
        let tail = &rows[rows.len().saturating_sub(count)..];
        if tail.is_empty() {
            push(None, true);
            return 0;
        }
        for (i, row) in tail.iter().enumerate() {
            push(Some(row.clone()), i + 1 == tail.len());
        }
        tail.len()
    }
}

impl HftEngine for OfflineEngine {
    fn date(&self) -> u32 {
        self.clock.date
    }

    fn time(&self) -> u32 {
        self.clock.time
    }

    fn secs(&self) -> u32 {
        self.clock.secs
    }

    fn price(&self, instrument: &InstrumentId) -> Price {
        self.prices.get(instrument).copied().unwrap_or_default()
    }

    fn pull_bars(
        &mut self,
        _strategy: StrategyId,
        instrument: &InstrumentId,
        period: &Period,
        count: usize,
        sink: &mut dyn FragmentSink,
    ) -> usize {
        let key = (instrument.clone(), *period);
        let rows = self.bars.get(&key).map(Vec::as_slice).unwrap_or_default();
        let served = Self::serve(rows, count, |row, last| {
            sink.bar_fragment(instrument, period, row, last)
        });

        if !self.subscriptions.contains(instrument) {
            self.subscriptions.push(instrument.clone());
        }
        served
    }

    fn pull_ticks(
        &mut self,
        _strategy: StrategyId,
        instrument: &InstrumentId,
        count: usize,
        sink: &mut dyn FragmentSink,
    ) -> usize {
        let rows = self.ticks.get(instrument).map(Vec::as_slice).unwrap_or_default();
        Self::serve(rows, count, |row, last| {
            sink.tick_fragment(instrument, row, last)
        })
    }

    fn position(&self, strategy: StrategyId, instrument: &InstrumentId) -> Quantity {
        self.positions
            .get(&(strategy, instrument.clone()))
            .copied()
            .unwrap_or_default()
    }

    fn undone(&self, strategy: StrategyId, instrument: &InstrumentId) -> i64 {
        self.resting
            .values()
            .filter(|o| o.strategy == strategy && &o.instrument == instrument)
            .count() as i64
    }

    fn sub_ticks(&mut self, _strategy: StrategyId, instrument: &InstrumentId) {
        if !self.subscriptions.contains(instrument) {
            self.subscriptions.push(instrument.clone());
        }
    }

    fn buy(
        &mut self,
        strategy: StrategyId,
        instrument: &InstrumentId,
        price: Price,
        qty: Quantity,
    ) -> String {
        self.place(strategy, instrument, Side::Buy, price, qty)
    }

    fn sell(
        &mut self,
        strategy: StrategyId,
        instrument: &InstrumentId,
        price: Price,
        qty: Quantity,
    ) -> String {
        self.place(strategy, instrument, Side::Sell, price, qty)
    }

    fn cancel(&mut self, strategy: StrategyId, local_id: LocalOrderId) -> bool {
        match self.resting.get(&local_id) {
            Some(order) if order.strategy == strategy => {
                self.resting.remove(&local_id);
                true
            }
            _ => false,
        }
    }

    fn cancel_all(&mut self, strategy: StrategyId, instrument: &InstrumentId, is_buy: bool) -> String {
        let side = Side::from_is_buy(is_buy);
        let ids: Vec<LocalOrderId> = self
            .resting
            .values()
            .filter(|o| o.strategy == strategy && &o.instrument == instrument && o.side == side)
            .map(|o| o.local_id)
            .collect();

        for id in &ids {
            self.resting.remove(id);
        }
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    fn log_text(&mut self, strategy: StrategyId, message: &str) {
        info!("[strategy {}] {}", strategy, message);
        self.log.push(message.to_string());
    }

    fn save_user_data(&mut self, strategy: StrategyId, key: &str, value: &str) {
        self.user_data
            .insert((strategy, key.to_string()), value.to_string());
    }

    fn load_user_data(&self, strategy: StrategyId, key: &str, default: &str) -> String {
        self.user_data
            .get(&(strategy, key.to_string()))
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

impl ProductCatalog for OfflineEngine {
    fn product_info(&self, code: &InstrumentId) -> Option<ProductInfo> {
        self.products.product_info(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use athena_context::MarketDataCache;
    use athena_core::SeriesKey;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ag() -> InstrumentId {
        InstrumentId::new("SHFE.ag.HOT")
    }

    fn silver() -> ProductInfo {
        ProductInfo {
            code: InstrumentId::new("SHFE.ag"),
            exchange: "SHFE".to_string(),
            product: "ag".to_string(),
            name: "silver".to_string(),
            price_tick: dec!(1),
            volume_scale: dec!(15),
            precision: 0,
        }
    }

    #[test]
    fn test_ids_increase_from_one() {
        let mut engine = OfflineEngine::new();

        assert_eq!(engine.buy(1, &ag(), dec!(5321), dec!(1)), "1");
        assert_eq!(engine.sell(1, &ag(), dec!(5330), dec!(2)), "2");
        assert_eq!(engine.buy(1, &ag(), Decimal::ZERO, dec!(1)), "3");
        assert_eq!(engine.undone(1, &ag()), 3);
    }

    #[test]
    fn test_invalid_orders_rejected() {
        let mut engine = OfflineEngine::new();

        assert_eq!(engine.buy(1, &ag(), dec!(5321), Decimal::ZERO), "");
        assert_eq!(engine.sell(1, &ag(), dec!(-1), dec!(1)), "");
        assert_eq!(engine.resting_orders().count(), 0);
    }

    #[test]
    fn test_cancel_all_one_side() {
        let mut engine = OfflineEngine::new();
        engine.buy(1, &ag(), dec!(5321), dec!(1));
        engine.sell(1, &ag(), dec!(5330), dec!(1));
        engine.buy(1, &ag(), dec!(5320), dec!(1));
        engine.buy(2, &ag(), dec!(5319), dec!(1));

        assert_eq!(engine.cancel_all(1, &ag(), true), "1,3");
        assert_eq!(engine.cancel_all(1, &ag(), true), "");

        let left: Vec<_> = engine.resting_orders().map(|o| o.local_id).collect();
        assert_eq!(left, vec![2, 4]);
    }

    #[test]
    fn test_cancel_checks_owner() {
        let mut engine = OfflineEngine::new();
        engine.buy(1, &ag(), dec!(5321), dec!(1));

        assert!(!engine.cancel(2, 1));
        assert!(engine.cancel(1, 1));
        assert!(!engine.cancel(1, 1));
    }

    #[test]
    fn test_pull_bars_serves_tail() {
        let mut engine = OfflineEngine::new();
        let m1 = Period::minutes(1).unwrap();
        engine.add_bars("SHFE.ag.HOT", m1, (1031..=1035).map(Fragment::at));

        let mut market = MarketDataCache::new();
        assert_eq!(engine.pull_bars(1, &ag(), &m1, 3, &mut market), 3);

        let view = market.bars.slice(&SeriesKey::bars(ag(), m1), 10).unwrap();
        assert_eq!(view.times(), vec![1033, 1034, 1035]);
        assert_eq!(engine.subscriptions(), &[ag()]);
    }

    #[test]
    fn test_pull_without_history() {
        let mut engine = OfflineEngine::new();
        let mut market = MarketDataCache::new();

        assert_eq!(engine.pull_ticks(1, &ag(), 10, &mut market), 0);
        assert!(market.ticks.slice(&SeriesKey::ticks(ag()), 10).unwrap().is_empty());
    }

    #[test]
    fn test_clock_from_timestamp() {
        let mut engine = OfflineEngine::new();
        let now = chrono::Utc
            .with_ymd_and_hms(2023, 5, 12, 10, 31, 30)
            .unwrap();
        engine.set_time(now);

        assert_eq!(engine.date(), 20230512);
        assert_eq!(engine.time(), 1031);
        assert_eq!(engine.secs(), 30000);
    }

    #[test]
    fn test_product_lookup_by_prefix() {
        let mut engine = OfflineEngine::new();
        engine.add_product(silver());

        assert_eq!(engine.product_info(&ag()).unwrap().name, "silver");
        assert_eq!(
            engine.product_info(&InstrumentId::new("SHFE.ag")).unwrap().volume_scale,
            dec!(15)
        );
        assert!(engine.product_info(&InstrumentId::new("SHFE.au.HOT")).is_none());
    }

    #[test]
    fn test_user_data_per_strategy() {
        let mut engine = OfflineEngine::new();
        engine.save_user_data(1, "k", "1.25");

        assert_eq!(engine.load_user_data(1, "k", "3"), "1.25");
        assert_eq!(engine.load_user_data(2, "k", "3"), "3");
    }
}
