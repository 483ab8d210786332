//! The `scoredesk dashboard` command.

use anyhow::Result;

use super::Console;

pub async fn execute(console: &Console) -> Result<()> {
    let stats = console.fetcher.dashboard_stats().await;

    println!("Total Students   {}", stats.students);
    println!("Active Tests     {}", stats.tests);
    println!("Total Attempts   {}", stats.attempts);
    println!("Flagged Issues   {}", stats.flagged);

    Ok(())
}
