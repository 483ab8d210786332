//! The `scoredesk flag` command.

use anyhow::Result;

use super::Console;

pub async fn execute(console: &Console, attempt_id: &str, reason: &str) -> Result<()> {
    let detail = console.actions.flag(attempt_id, reason).await?;

    println!("Flag created for attempt {attempt_id}");
    println!("Status is now {}", detail.status);

    Ok(())
}
