// Copyright 2026 Moodmail Contributors
// SPDX-License-Identifier: Apache-2.0

//! Binary entry point: wire the pipeline together and run it once.

use anyhow::Result;
use clap::Parser;
use moodmail::config::Config;
use moodmail::extract::extract_mood_record;
use moodmail::notify::{self, LogTransport, MailTransport};
use moodmail::session::SessionClient;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(
    name = "moodmail",
    about = "Fetch today's mood barometer entry from the Kigaroo portal and mail it",
    version
)]
struct Cli {
    /// Surface intermediate values (date, fields, remark) and errors
    #[arg(long, short)]
    verbose: bool,

    /// Fetch and extract, print the composed message, deliver nothing
    #[arg(long)]
    dry_run: bool,

    /// With --dry-run, print the extracted record as JSON instead
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let level = if cli.verbose || config.verbose {
        "moodmail=debug"
    } else {
        "moodmail=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.parse().unwrap()),
        )
        .init();

    if let Err(e) = run(&cli, &config).await {
        error!("{e:#}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let client = SessionClient::new(config.timeout_ms);
    let page = client
        .fetch_mood_page(&config.credentials, &config.urls)
        .await?;
    info!(bytes = page.len(), "fetched child page");

    let record = extract_mood_record(&page)?;
    debug!(
        date = %record.date,
        fields = record.fields.len(),
        remark = %record.remark,
        "extracted mood record"
    );

    let message = notify::compose(
        &record,
        &config.email_from,
        &config.email_to,
        &config.email_cc,
    );

    if cli.dry_run {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            println!("{}\n\n{}", message.subject, message.body);
        }
        return Ok(());
    }

    LogTransport.deliver(&message).await?;
    info!(subject = %message.subject, "mood notification delivered");
    Ok(())
}
