use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InstrumentId;
use crate::values::{Price, Quantity};

/// Product (commodity) details as registered with the engine
///
/// Returned by `get_comminfo`. Only carries what a strategy needs to size
/// and price orders; margin and fee schedules stay in the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Product code, e.g. `SHFE.ag`
    pub code: InstrumentId,
    pub exchange: String,
    pub product: String,
    /// Display name
    pub name: String,
    /// Minimum price increment
    pub price_tick: Price,
    /// Contract multiplier
    pub volume_scale: Quantity,
    /// Decimal places used when displaying prices
    pub precision: u32,
}

impl ProductInfo {
    /// Round a price down to the nearest valid tick
    pub fn round_price_down(&self, price: Price) -> Price {
        if self.price_tick.is_zero() {
            return price;
        }
        (price / self.price_tick).floor() * self.price_tick
    }

    /// Round a price up to the nearest valid tick
    pub fn round_price_up(&self, price: Price) -> Price {
        if self.price_tick.is_zero() {
            return price;
        }
        (price / self.price_tick).ceil() * self.price_tick
    }

    /// Validate that a price conforms to the tick size
    pub fn is_valid_price(&self, price: Price) -> bool {
        self.price_tick.is_zero() || (price % self.price_tick) == Decimal::ZERO
    }

    /// Notional value of `qty` contracts at `price`
    pub fn notional(&self, price: Price, qty: Quantity) -> Decimal {
        price * qty * self.volume_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

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
    fn test_tick_rounding() {
        let info = silver();
        assert_eq!(info.round_price_down(dec!(5321.7)), dec!(5321));
        assert_eq!(info.round_price_up(dec!(5321.2)), dec!(5322));
        assert!(info.is_valid_price(dec!(5321)));
        assert!(!info.is_valid_price(dec!(5321.5)));
    }

    #[test]
    fn test_notional() {
        assert_eq!(silver().notional(dec!(5000), dec!(2)), dec!(150000));
    }
}
