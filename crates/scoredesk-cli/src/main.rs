//! scoredesk CLI — the review console's command-line surface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::Console;

#[derive(Parser)]
#[command(name = "scoredesk", version, about = "Assessment review console")]
struct Cli {
    /// Base URL of the scoring service (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summary counts across students, tests, attempts, and flags
    Dashboard,

    /// List attempts, optionally filtered
    Attempts {
        /// Free-text search over student names
        #[arg(long)]
        search: Option<String>,

        /// Filter by status: INGESTED, SCORED, DEDUPED, FLAGGED
        #[arg(long)]
        status: Option<String>,

        /// Filter by test id
        #[arg(long)]
        test_id: Option<String>,

        /// true = duplicates only, false = unique only
        #[arg(long)]
        duplicates: Option<bool>,
    },

    /// Show the detail record for one attempt
    Show {
        attempt_id: String,

        /// Bypass the local cache
        #[arg(long)]
        refresh: bool,
    },

    /// Trigger server-side rescoring of an attempt
    Recompute { attempt_id: String },

    /// Flag an attempt for manual review
    Flag {
        attempt_id: String,

        /// Why the attempt is suspect
        #[arg(long)]
        reason: String,
    },

    /// Ranked results for one test
    Leaderboard { test_id: String },

    /// List all tests
    Tests,

    /// List all students
    Students,

    /// List all moderation flags
    Flags,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scoredesk=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let console = match Console::connect(cli.base_url, cli.config) {
        Ok(console) => console,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Dashboard => commands::dashboard::execute(&console).await,
        Commands::Attempts {
            search,
            status,
            test_id,
            duplicates,
        } => commands::attempts::execute(&console, search, status, test_id, duplicates).await,
        Commands::Show {
            attempt_id,
            refresh,
        } => commands::show::execute(&console, &attempt_id, refresh).await,
        Commands::Recompute { attempt_id } => {
            commands::recompute::execute(&console, &attempt_id).await
        }
        Commands::Flag { attempt_id, reason } => {
            commands::flag::execute(&console, &attempt_id, &reason).await
        }
        Commands::Leaderboard { test_id } => {
            commands::leaderboard::execute(&console, &test_id).await
        }
        Commands::Tests => commands::listings::tests(&console).await,
        Commands::Students => commands::listings::students(&console).await,
        Commands::Flags => commands::listings::flags(&console).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
