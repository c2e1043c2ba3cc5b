//! Status command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::yes_no;

/// Print queue length, fetch flags, and where the snapshot lives.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    super::ready(&ctx.manager).await;
    let manager = &ctx.manager;
    let config = manager.config();

    println!("Queue length:     {}", manager.len().await);
    println!("Loading:          {}", yes_no(manager.is_loading().await));
    println!("Exhausted:        {}", yes_no(manager.is_exhausted().await));
    println!(
        "Last error:       {}",
        manager.last_error().await.as_deref().unwrap_or("-")
    );
    println!(
        "Batch/threshold:  {}/{}",
        config.batch_size, config.refill_threshold
    );
    match &ctx.snapshot_file {
        Some(path) => println!("Snapshot:         {}", path.display()),
        None => println!("Snapshot:         disabled"),
    }
    Ok(())
}
