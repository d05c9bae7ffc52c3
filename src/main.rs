//! jirafeed - batch-create JIRA issues from structured user story files.
//!
//! Reads a JSON file of story records, connects to JIRA with the
//! configured credentials, and creates one issue per usable record,
//! reporting every per-entry outcome.

mod api;
mod batch;
mod config;
mod error;
mod input;
mod issue;
mod logging;
mod report;
mod retry;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use crate::api::JiraClient;
use crate::config::Credentials;
use crate::retry::RetryPolicy;

/// Create JIRA issues in bulk from a JSON file of user stories.
#[derive(Debug, Parser)]
#[command(name = "jirafeed", version, about)]
struct Args {
    /// Path to a JSON file containing a list of story records.
    input: PathBuf,

    /// Where to write the JSON audit of batch results.
    /// Defaults to `<input stem>.results.json` next to the input file.
    #[arg(long)]
    results: Option<PathBuf>,

    /// Maximum retries for connection and issue creation calls.
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    /// Initial backoff delay in milliseconds; doubles after each
    /// failed attempt.
    #[arg(long, default_value_t = 1000)]
    retry_delay_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    logging::init()?;

    let credentials = Credentials::from_env()?;
    let policy = RetryPolicy::new(args.max_retries, Duration::from_millis(args.retry_delay_ms));
    let client = JiraClient::connect(&credentials, policy).await?;

    if !client.test_connection().await {
        anyhow::bail!("could not reach JIRA; check your credentials and network");
    }
    if let Some(project) = client.get_project_info().await {
        println!("Connected to project: {} ({})", project.name, project.key);
        tracing::info!(
            lead = project.lead_name(),
            description = project.description_text(),
            "project details"
        );
    }

    let records = input::load_records(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    if input::preflight(&records) == 0 {
        println!(
            "No submittable records in {}; nothing to do.",
            args.input.display()
        );
        logging::shutdown();
        return Ok(());
    }

    println!(
        "Creating JIRA issues from {} ({} records)",
        args.input.display(),
        records.len()
    );

    let result = batch::process_batch(&records, |request| client.create_issue(request)).await;

    report::print_summary(&result);
    if result.has_submissions() {
        let audit_path = args
            .results
            .clone()
            .unwrap_or_else(|| report::default_audit_path(&args.input));
        report::write_audit(&result, &audit_path)?;
        println!();
        println!("Results saved to {}", audit_path.display());
    }

    logging::shutdown();
    Ok(())
}
