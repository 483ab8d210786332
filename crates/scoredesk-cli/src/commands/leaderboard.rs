//! The `scoredesk leaderboard` command.

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use super::Console;

pub async fn execute(console: &Console, test_id: &str) -> Result<()> {
    let entries = console.fetcher.leaderboard(test_id).await?;

    if entries.is_empty() {
        println!("No results found for this test.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Student", "Score", "Accuracy", "Net Correct"]);

    for entry in &entries {
        let rank_cell = if entry.is_winner() {
            Cell::new(format!("#{}", entry.rank)).fg(Color::Yellow)
        } else if entry.is_top_three() {
            Cell::new(format!("#{}", entry.rank)).fg(Color::DarkYellow)
        } else {
            Cell::new(entry.rank.to_string())
        };

        table.add_row(vec![
            rank_cell,
            Cell::new(&entry.student_name),
            Cell::new(entry.score.to_string()),
            Cell::new(format!("{}%", entry.accuracy)),
            Cell::new(entry.net_correct.to_string()),
        ]);
    }

    println!("{table}");

    Ok(())
}
