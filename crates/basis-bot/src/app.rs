//! Replay application loop.
//!
//! Reads JSONL events from any buffered source, runs them through the
//! driver on a single task, and writes the resulting commands to stdout as
//! JSONL. This is the in-repo stand-in for a live venue session.

use crate::config::AppConfig;
use crate::driver::StrategyDriver;
use crate::error::BotResult;
use basis_core::Event;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Run the driver over an event stream until it ends.
pub async fn run<R>(config: AppConfig, input: R) -> BotResult<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Event>(1024);

    let reader = tokio::spawn(async move {
        let mut lines = input.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match Event::from_json_line(line) {
                        Ok(event) => {
                            if tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Err(err) => warn!(error = %err, "skipping malformed event"),
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    warn!(error = %err, "event stream read failed");
                    break;
                }
            }
        }
    });

    let mut driver = StrategyDriver::new(&config);
    let mut events = 0u64;
    let mut commands = 0u64;
    while let Some(event) = rx.recv().await {
        events += 1;
        for command in driver.on_event(event) {
            commands += 1;
            println!("{}", serde_json::to_string(&command)?);
        }
    }
    reader.await.ok();

    info!(
        events,
        commands,
        position = driver.position(),
        hedge_position = driver.hedge_position(),
        "event stream ended"
    );
    Ok(())
}
