//! The `scoredesk recompute` command.

use anyhow::Result;

use super::Console;

pub async fn execute(console: &Console, attempt_id: &str) -> Result<()> {
    let detail = console.actions.recompute(attempt_id).await?;

    println!("Recompute accepted for attempt {attempt_id}");
    println!(
        "Refreshed: status {}, score {}",
        detail.status,
        detail
            .score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into())
    );

    Ok(())
}
