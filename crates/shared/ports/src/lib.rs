//! Athena Ports
//!
//! Port definitions (traits) for the boundary between the strategy
//! context and the native execution engine. The engine owns market
//! connectivity, order routing and persistence; the context only ever
//! sees it through these traits.

mod catalog;
mod engine;
mod sink;

pub use catalog::ProductCatalog;
pub use engine::{HftEngine, StrategyId};
pub use sink::FragmentSink;
