//! Event Pump - feeds engine events from a channel into one dispatcher
//!
//! The engine side may run on any task; the pump is the single consumer,
//! so strategy callbacks still see events one at a time, in send order.

use athena_context::{EngineEvent, EventDispatcher, Strategy};
use athena_ports::HftEngine;
use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::config::RunnerConfig;

/// Bounded event channel sized from the config
pub fn channel(config: &RunnerConfig) -> (Sender<EngineEvent>, Receiver<EngineEvent>) {
    mpsc::channel(config.channel_capacity.max(1))
}

/// Drains an event channel into a dispatcher
pub struct EventPump<S, E>
where
    S: Strategy<E>,
    E: HftEngine,
{
    dispatcher: EventDispatcher<S, E>,
}

impl<S, E> EventPump<S, E>
where
    S: Strategy<E>,
    E: HftEngine,
{
    pub fn new(dispatcher: EventDispatcher<S, E>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &EventDispatcher<S, E> {
        &self.dispatcher
    }

    /// Dispatch events until every sender is dropped
    ///
    /// Returns the dispatcher so the host can inspect the final state.
    pub async fn run(mut self, mut rx: Receiver<EngineEvent>) -> EventDispatcher<S, E> {
        let name = self.dispatcher.context().name().to_string();
        log::info!("[{}] Event pump started", name);

        while let Some(event) = rx.recv().await {
            self.dispatcher.dispatch(event);
        }

        let stats = self.dispatcher.stats();
        log::info!(
            "[{}] Event pump stopped after {} events ({} malformed bars dropped)",
            name,
            stats.events,
            stats.malformed_updates
        );
        self.dispatcher
    }
}
