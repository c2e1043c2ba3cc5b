//! Watch command handler.
//!
//! Simulates a consumer: pops one item per tick while printing every queue
//! event, until the limit is reached, the feed runs dry, or Ctrl-C.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::bootstrap::CliContext;
use crate::presentation::{describe_event, format_item};

pub async fn execute(ctx: &CliContext, interval_ms: u64, limit: Option<u32>) -> Result<()> {
    let mut events = ctx.events.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => println!("  · {}", describe_event(&event)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    ctx.manager.activate().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    let mut consumed = 0u32;

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        if let Some(item) = ctx.manager.current().await {
            println!("▶ {}", format_item(&item));
            ctx.manager.pop().await;
            consumed += 1;
            if limit.is_some_and(|limit| consumed >= limit) {
                break;
            }
        } else if ctx.manager.is_exhausted().await {
            println!("Feed exhausted after {consumed} item(s).");
            break;
        } else if !ctx.manager.is_loading().await {
            // Empty after a failure; an empty pop retries the fetch
            ctx.manager.pop().await;
        }
    }

    ctx.manager.wait_idle().await;
    printer.abort();
    Ok(())
}
