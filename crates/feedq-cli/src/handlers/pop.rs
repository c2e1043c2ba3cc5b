//! Pop command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::format_item;

/// Consume up to `count` items, printing each one.
///
/// Waits for any refill the pops trigger so the snapshot on disk reflects
/// the final queue.
pub async fn execute(ctx: &CliContext, count: u32) -> Result<()> {
    super::ready(&ctx.manager).await;

    let mut consumed = 0;
    while consumed < count {
        let Some(item) = ctx.manager.current().await else {
            // An empty pop is what re-arms the refill after a failure
            ctx.manager.pop().await;
            ctx.manager.wait_idle().await;
            if ctx.manager.is_empty().await {
                break;
            }
            continue;
        };

        println!("{}", format_item(&item));
        ctx.manager.pop().await;
        consumed += 1;
    }

    ctx.manager.wait_idle().await;

    if consumed < count {
        match ctx.manager.last_error().await {
            Some(error) => eprintln!("Stopped after {consumed} item(s): {error}"),
            None => eprintln!("Stopped after {consumed} item(s): feed has no more items"),
        }
    }
    Ok(())
}
