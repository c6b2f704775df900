//! JSON-lines replay of captured engine events
//!
//! One `EngineEvent` per line; blank lines are skipped. Line numbers in
//! errors are 1-based.

use athena_context::{EngineEvent, EventDispatcher, Strategy};
use athena_ports::HftEngine;
use std::io::{BufRead, Lines};
use tokio::sync::mpsc::Sender;

use crate::error::{Result, RunnerError};

/// Iterator over the events of a JSON-lines stream
pub struct EventLines<R> {
    lines: Lines<R>,
    line: usize,
}

/// Decode events lazily from `reader`
pub fn events<R: BufRead>(reader: R) -> EventLines<R> {
    EventLines {
        lines: reader.lines(),
        line: 0,
    }
}

impl<R: BufRead> Iterator for EventLines<R> {
    type Item = Result<EngineEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            return Some(
                serde_json::from_str(text).map_err(|e| RunnerError::Decode {
                    line: self.line,
                    reason: e.to_string(),
                }),
            );
        }
    }
}

/// Dispatch every event of `reader` in order; returns the number dispatched
///
/// Stops at the first undecodable line. Events before it stay dispatched.
pub fn replay_into<S, E, R>(dispatcher: &mut EventDispatcher<S, E>, reader: R) -> Result<usize>
where
    S: Strategy<E>,
    E: HftEngine,
    R: BufRead,
{
    let mut count = 0;
    for event in events(reader) {
        dispatcher.dispatch(event?);
        count += 1;
    }
    log::debug!(
        "[{}] replayed {} events",
        dispatcher.context().name(),
        count
    );
    Ok(count)
}

/// Send every event of `reader` into a pump channel; returns the number sent
pub async fn stream_into<R: BufRead>(tx: &Sender<EngineEvent>, reader: R) -> Result<usize> {
    let mut count = 0;
    for event in events(reader) {
        tx.send(event?)
            .await
            .map_err(|_| RunnerError::ChannelClosed)?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_skips_blank_lines() {
        let input = "{\"event\":\"init\"}\n\n   \n{\"event\":\"channel_ready\"}\n";
        let decoded: Vec<_> = events(Cursor::new(input))
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(decoded, vec![EngineEvent::Init, EngineEvent::ChannelReady]);
    }

    #[test]
    fn test_decode_error_names_line() {
        let input = "{\"event\":\"init\"}\n\n{\"event\":\"bogus\"}\n";
        let results: Vec<_> = events(Cursor::new(input)).collect();

        assert!(results[0].is_ok());
        match &results[1] {
            Err(RunnerError::Decode { line, .. }) => assert_eq!(*line, 3),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stream_into_closed_channel() {
        let (tx, rx) = tokio::sync::mpsc::channel(4);
        drop(rx);

        let result = stream_into(&tx, Cursor::new("{\"event\":\"init\"}\n")).await;
        assert!(matches!(result, Err(RunnerError::ChannelClosed)));
    }
}
