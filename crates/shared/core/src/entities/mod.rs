mod clock;
mod order_events;
mod order_ids;
mod side;

pub use clock::EngineClock;
pub use order_events::{EntrustAck, OrderUpdate, TradeFill};
pub use order_ids::{LocalOrderId, OrderIdParseError, OrderIdSet};
pub use side::Side;
