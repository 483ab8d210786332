//! The `scoredesk attempts` command.

use anyhow::Result;
use comfy_table::Table;

use scoredesk_core::model::AttemptStatus;
use scoredesk_core::query::AttemptFilter;

use super::Console;

pub async fn execute(
    console: &Console,
    search: Option<String>,
    status: Option<String>,
    test_id: Option<String>,
    duplicates: Option<bool>,
) -> Result<()> {
    let status = status
        .map(|s| s.parse::<AttemptStatus>())
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let filter = AttemptFilter {
        search: search.unwrap_or_default(),
        status,
        test_id: test_id.unwrap_or_default(),
        has_duplicates: duplicates,
    };

    console.fetcher.refresh_attempts(&filter).await?;
    let (attempts, total) = console.fetcher.store().list();

    if attempts.is_empty() {
        println!("No attempts found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Student", "Test", "Status", "Score", "Duplicate", "Attempt ID"]);
    for a in &attempts {
        table.add_row(vec![
            a.student_name.clone(),
            a.test_name.clone(),
            a.status.to_string(),
            a.score.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
            if a.is_duplicate() { "Yes".into() } else { "-".to_string() },
            a.attempt_id.clone(),
        ]);
    }

    println!("{table}");
    println!("{} of {} attempt(s)", attempts.len(), total);

    Ok(())
}
