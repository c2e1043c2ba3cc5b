//! Clear command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Drop the queue and its snapshot without fetching.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    ctx.manager.clear().await;
    println!("Queue cleared.");
    Ok(())
}
