//! List command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::{format_item, print_separator};

/// Print every buffered item, head first.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    super::ready(&ctx.manager).await;

    let items = ctx.manager.items().await;
    if items.is_empty() {
        println!("Queue is empty.");
        return Ok(());
    }

    println!("{} item(s) buffered:\n", items.len());
    print_separator(60);
    for (position, item) in items.iter().enumerate() {
        println!("{:>3}. {}", position + 1, format_item(item));
    }
    print_separator(60);
    Ok(())
}
