//! Athena HFT Context
//!
//! The per-strategy event context of the HFT runtime:
//! - Incremental bar/tick caches fed by engine fragment streams
//! - Event dispatch from the engine to strategy callbacks
//! - Order commands with decoded local-id replies
//! - Typed user data persisted through the engine
//!
//! ## Architecture
//!
//! ```text
//!      Engine (native execution)
//!         │ fragments, bar closed,          ▲ buy / sell / cancel,
//!         │ ticks, order events             │ pulls, queries, user data
//!         ▼                                 │
//!  ┌─────────────────┐   callbacks   ┌──────┴──────┐
//!  │ EventDispatcher ├──────────────►│  Strategy   │
//!  └────────┬────────┘               └──────┬──────┘
//!           │ ingest / upsert               │ get_* / buy / sell
//!           ▼                               ▼
//!  ┌─────────────────┐   slice      ┌─────────────────┐
//!  │  SeriesCache    │◄─────────────┤   HftContext    │
//!  │  (bars, ticks)  │              │ CommandGateway  │
//!  └─────────────────┘              │ UserDataStore   │
//!                                   └─────────────────┘
//! ```
//!
//! Everything here is single-threaded and synchronous: the engine delivers
//! one event at a time and every engine call blocks until it returns. A
//! multi-threaded host must serialize access per context.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use athena_context::{ContextConfig, EventDispatcher, HftContext, Strategy};
//!
//! let ctx = HftContext::new(ContextConfig::new(1, "hft_ag"), engine);
//! let mut dispatcher = EventDispatcher::new(MyStrategy::default(), ctx);
//! dispatcher.dispatch(EngineEvent::Init);
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod gateway;
pub mod series;
pub mod strategy;
pub mod user_data;

// Re-export main types
pub use cache::{MarketDataCache, SeriesCache, SlotState};
pub use config::ContextConfig;
pub use context::HftContext;
pub use dispatcher::{DispatchStats, EventDispatcher};
pub use error::{Error, Result, RowDefect};
pub use events::EngineEvent;
pub use gateway::{CommandGateway, decode_order_ids};
pub use series::{Series, SeriesView, Upserted};
pub use strategy::Strategy;
pub use user_data::UserDataStore;
