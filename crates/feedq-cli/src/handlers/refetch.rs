//! Refetch command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Fetch now, ignoring exhaustion, and report the outcome.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    super::ready(&ctx.manager).await;
    let before = ctx.manager.len().await;

    ctx.manager.refetch().await;
    ctx.manager.wait_idle().await;

    if let Some(error) = ctx.manager.last_error().await {
        return Err(CliError::Fetch(error).into());
    }

    let after = ctx.manager.len().await;
    println!(
        "Queue holds {after} item(s) ({} new).",
        after.saturating_sub(before)
    );
    if ctx.manager.is_exhausted().await {
        println!("The feed has no more items right now.");
    }
    Ok(())
}
