//! The `scoredesk tests`, `students`, and `flags` listings.

use anyhow::Result;
use comfy_table::Table;

use super::Console;

pub async fn tests(console: &Console) -> Result<()> {
    let tests = console.fetcher.tests().await?;
    if tests.is_empty() {
        println!("No tests found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Test ID", "Name", "Max Marks"]);
    for t in &tests {
        table.add_row(vec![
            t.test_id.clone(),
            t.name.clone(),
            t.max_marks.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
        ]);
    }
    println!("{table}");

    Ok(())
}

pub async fn students(console: &Console) -> Result<()> {
    let students = console.fetcher.students().await?;
    if students.is_empty() {
        println!("No students found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Student ID", "Name", "Email"]);
    for s in &students {
        table.add_row(vec![
            s.student_id.clone(),
            s.name.clone(),
            s.email.clone().unwrap_or_else(|| "-".into()),
        ]);
    }
    println!("{table}");

    Ok(())
}

pub async fn flags(console: &Console) -> Result<()> {
    let flags = console.fetcher.flags().await?;
    if flags.is_empty() {
        println!("No flags found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Student", "Test", "Attempt ID", "Reason", "Created"]);
    for f in &flags {
        table.add_row(vec![
            f.student_name.clone(),
            f.test_name.clone(),
            f.attempt_id.clone(),
            f.reason.clone(),
            f.created_at
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".into()),
        ]);
    }
    println!("{table}");

    Ok(())
}
