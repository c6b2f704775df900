use serde::{Deserialize, Serialize};

use super::{LocalOrderId, Side};
use crate::instruments::InstrumentId;
use crate::values::{Price, Quantity};

/// Engine acknowledgment of an order placement (`on_entrust`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrustAck {
    pub local_id: LocalOrderId,
    pub instrument: InstrumentId,
    /// False when the venue rejected the entrust
    pub success: bool,
    pub message: String,
}

/// Order state change (`on_order`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub local_id: LocalOrderId,
    pub instrument: InstrumentId,
    pub side: Side,
    pub total_qty: Quantity,
    /// Quantity still working at the venue
    pub left_qty: Quantity,
    pub price: Price,
    pub canceled: bool,
}

impl OrderUpdate {
    pub fn filled_qty(&self) -> Quantity {
        self.total_qty - self.left_qty
    }

    /// No further updates will follow for this order
    pub fn is_done(&self) -> bool {
        self.canceled || self.left_qty.is_zero()
    }
}

/// Execution report (`on_trade`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeFill {
    pub instrument: InstrumentId,
    pub side: Side,
    pub qty: Quantity,
    pub price: Price,
}

impl TradeFill {
    pub fn notional(&self) -> rust_decimal::Decimal {
        self.price * self.qty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_update_progress() {
        let mut update = OrderUpdate {
            local_id: 7,
            instrument: InstrumentId::new("SHFE.ag.HOT"),
            side: Side::Buy,
            total_qty: dec!(10),
            left_qty: dec!(4),
            price: dec!(5321),
            canceled: false,
        };
        assert_eq!(update.filled_qty(), dec!(6));
        assert!(!update.is_done());

        update.canceled = true;
        assert!(update.is_done());

        update.canceled = false;
        update.left_qty = dec!(0);
        assert!(update.is_done());
    }

    #[test]
    fn test_trade_notional() {
        let fill = TradeFill {
            instrument: InstrumentId::new("SHFE.ag.HOT"),
            side: Side::Sell,
            qty: dec!(2),
            price: dec!(5321),
        };
        assert_eq!(fill.notional(), dec!(10642));
    }
}
