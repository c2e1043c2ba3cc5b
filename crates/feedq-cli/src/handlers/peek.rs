//! Peek command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::format_item;

/// Print the head item without consuming it.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    super::ready(&ctx.manager).await;

    match ctx.manager.current().await {
        Some(item) => println!("{}", format_item(&item)),
        None => println!("Queue is empty."),
    }
    Ok(())
}
