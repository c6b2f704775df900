//! Athena Runner - Strategy Host
//!
//! Drives an HFT strategy context outside the native engine:
//!
//! - **Event Pump**: drains a tokio channel of engine events into one dispatcher
//! - **Replay**: decodes captured JSON-lines event streams
//! - **Offline Engine**: in-process engine with stored history and a resting-order book
//! - **Logging**: `env_logger` bootstrap for hosts
//!
//! ## Architecture
//!
//! ```text
//!   capture.jsonl ──► replay::stream_into ──┐
//!                                           │ EngineEvent
//!   live engine adapter ────────────────────┤
//!                                           ▼
//!                                 ┌───────────────────┐
//!                                 │  mpsc::channel    │
//!                                 └─────────┬─────────┘
//!                                           ▼
//!                                 ┌───────────────────┐
//!                                 │    EventPump      │
//!                                 │  EventDispatcher  │──► Strategy callbacks
//!                                 └─────────┬─────────┘
//!                                           │ pulls, orders, user data
//!                                           ▼
//!                                 ┌───────────────────┐
//!                                 │  OfflineEngine    │
//!                                 └───────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod offline;
pub mod pump;
pub mod replay;

// Re-export main types
pub use config::RunnerConfig;
pub use error::{Result, RunnerError};
pub use logging::init_logging;
pub use offline::{OfflineEngine, ProductTable, RestingOrder};
pub use pump::{EventPump, channel};
pub use replay::{EventLines, events, replay_into, stream_into};
