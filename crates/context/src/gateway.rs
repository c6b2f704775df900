//! Command Gateway
//!
//! Forwards order commands to the engine and decodes its comma-delimited
//! id replies. The engine reports failures in-band; they pass through
//! unchanged as an empty id set or a `false` acknowledgment.

use athena_core::{InstrumentId, LocalOrderId, OrderIdSet, Price, Quantity, Side};
use athena_ports::{HftEngine, StrategyId};
use log::{debug, info, warn};

use crate::error::{Error, Result};

/// Decode an engine id reply; empty text is an empty set
pub fn decode_order_ids(reply: &str) -> Result<OrderIdSet> {
    OrderIdSet::parse(reply).map_err(|source| Error::InvalidOrderIds {
        reply: reply.to_string(),
        source,
    })
}

/// Order commands of one strategy
#[derive(Debug, Clone, Copy)]
pub struct CommandGateway {
    strategy: StrategyId,
}

impl CommandGateway {
    pub fn new(strategy: StrategyId) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> StrategyId {
        self.strategy
    }

    /// Place a buy order; a price of zero is a market order
    pub fn buy<E: HftEngine + ?Sized>(
        &self,
        engine: &mut E,
        instrument: &InstrumentId,
        price: Price,
        qty: Quantity,
    ) -> OrderIdSet {
        self.place(engine, Side::Buy, instrument, price, qty)
    }

    /// Place a sell order; a price of zero is a market order
    pub fn sell<E: HftEngine + ?Sized>(
        &self,
        engine: &mut E,
        instrument: &InstrumentId,
        price: Price,
        qty: Quantity,
    ) -> OrderIdSet {
        self.place(engine, Side::Sell, instrument, price, qty)
    }

    fn place<E: HftEngine + ?Sized>(
        &self,
        engine: &mut E,
        side: Side,
        instrument: &InstrumentId,
        price: Price,
        qty: Quantity,
    ) -> OrderIdSet {
        let order_type = if price.is_zero() { "market" } else { "limit" };
        debug!(
            "[{}] {:?} {} {} @ {} ({})",
            self.strategy, side, qty, instrument, price, order_type
        );

        let reply = match side {
            Side::Buy => engine.buy(self.strategy, instrument, price, qty),
            Side::Sell => engine.sell(self.strategy, instrument, price, qty),
        };

        let ids = self.decode(&reply);
        if ids.is_empty() {
            info!(
                "[{}] {:?} {} {} @ {} returned no order ids",
                self.strategy, side, qty, instrument, price
            );
        }
        ids
    }

    /// Cancel one order; returns the engine's acknowledgment verbatim
    pub fn cancel<E: HftEngine + ?Sized>(&self, engine: &mut E, local_id: LocalOrderId) -> bool {
        let acknowledged = engine.cancel(self.strategy, local_id);
        debug!(
            "[{}] cancel {} -> {}",
            self.strategy, local_id, acknowledged
        );
        acknowledged
    }

    /// Cancel every working order of one side; returns the canceled ids
    pub fn cancel_all<E: HftEngine + ?Sized>(
        &self,
        engine: &mut E,
        instrument: &InstrumentId,
        side: Side,
    ) -> OrderIdSet {
        let reply = engine.cancel_all(self.strategy, instrument, side.is_buy());
        let ids = self.decode(&reply);
        debug!(
            "[{}] cancel all {:?} {} -> [{}]",
            self.strategy, side, instrument, ids
        );
        ids
    }

    fn decode(&self, reply: &str) -> OrderIdSet {
        decode_order_ids(reply).unwrap_or_else(|e| {
            warn!("[{}] {}", self.strategy, e);
            OrderIdSet::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_order_ids() {
        assert!(decode_order_ids("").unwrap().is_empty());
        assert_eq!(decode_order_ids("5,7,9").unwrap().as_slice(), &[5, 7, 9]);
        assert!(matches!(
            decode_order_ids("5;7"),
            Err(Error::InvalidOrderIds { .. })
        ));
    }
}
