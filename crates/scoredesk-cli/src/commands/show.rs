//! The `scoredesk show` command.

use anyhow::Result;

use super::Console;

pub async fn execute(console: &Console, attempt_id: &str, refresh: bool) -> Result<()> {
    let detail = match console.fetcher.attempt_detail(attempt_id, refresh).await {
        Ok(detail) => detail,
        Err(err) if err.is_not_found() => {
            println!("Attempt not found.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    println!("Attempt {}  [{}]", detail.attempt_id, detail.status);
    println!("Student: {}", detail.student_name);
    if let Some(email) = &detail.student_email {
        println!("Email:   {email}");
    }
    println!("Test:    {}", detail.test_name);
    if let Some(submitted) = detail.submitted_at {
        println!("Submitted: {submitted}");
    }
    println!();

    println!("Score       {}", fmt_opt(detail.score));
    println!("Accuracy    {}%", fmt_opt(detail.accuracy));
    println!("Net Correct {}", fmt_opt(detail.net_correct));
    println!(
        "Answers     {} correct / {} wrong / {} skipped",
        fmt_opt(detail.correct),
        fmt_opt(detail.wrong),
        fmt_opt(detail.skipped)
    );
    println!();

    match &detail.duplicate_of_attempt_id {
        Some(original) => println!("Duplicate of attempt {original}"),
        None => println!("Not a duplicate"),
    }

    if !detail.raw_payload.is_null() {
        println!();
        println!("Ingested payload:");
        println!("{}", serde_json::to_string_pretty(&detail.raw_payload)?);
    }

    Ok(())
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
