#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line bulk mailer

use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Duration};

use anyhow::Result;
use bulk_mailer::{
    domain::campaigns::{CampaignService, RunReport, TokioPacer},
    infrastructure::{
        config::{Config, SmtpSettings},
        email::smtp::SMTPConnector,
        logging,
        sources::{CsvRecipientSource, JsonTemplateSource},
    },
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::error;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(name = "bulk-mailer", version, about)]
pub struct Args {
    /// The SMTP configuration
    #[clap(flatten)]
    pub smtp: SmtpSettings,

    /// File that log events are appended to
    #[arg(long, env = "LOG_FILE", default_value = logging::DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// What to send
    #[command(subcommand)]
    pub command: Command,
}

/// Send modes
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a personalized template to every recipient in a CSV file
    Bulk(BulkArgs),

    /// Send one literal message
    Single(SingleArgs),
}

/// Arguments for a bulk send
#[derive(Debug, ClapArgs)]
pub struct BulkArgs {
    /// CSV file with a header row and a `Receiver_Mail` column
    #[arg(long, default_value = "recipients.csv")]
    pub recipients: PathBuf,

    /// JSON file with `subject` and `body` patterns
    #[arg(long, default_value = "email_template.json")]
    pub template: PathBuf,

    /// File to attach to every message; repeatable
    #[arg(long = "attachment")]
    pub attachments: Vec<PathBuf>,

    /// Seconds to wait after each successful send
    #[arg(long, default_value = "2")]
    pub delay: u64,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for a single send
#[derive(Debug, ClapArgs)]
pub struct SingleArgs {
    /// Recipient address
    #[arg(long)]
    pub to: String,

    /// Subject line
    #[arg(long)]
    pub subject: String,

    /// Plain text body
    #[arg(long)]
    pub body: String,

    /// File to attach; repeatable
    #[arg(long = "attachment")]
    pub attachments: Vec<PathBuf>,
}

#[mutants::skip]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv_override().ok();

    let args = Args::parse();

    logging::init(&args.log_file)?;

    let config = Config::try_from(args.smtp).inspect_err(|e| error!("{e}"))?;

    let service = CampaignService::new(
        Arc::new(SMTPConnector::new(config.clone())),
        Arc::new(TokioPacer),
        config.sender,
    );

    match args.command {
        Command::Bulk(bulk) => {
            if !bulk.json {
                println!("Sending bulk emails...");
            }

            let report = service
                .send_bulk(
                    &CsvRecipientSource::new(&bulk.recipients),
                    &JsonTemplateSource::new(&bulk.template),
                    &bulk.attachments,
                    Duration::from_secs(bulk.delay),
                )
                .await;

            if bulk.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }

            Ok(ExitCode::SUCCESS)
        }
        Command::Single(single) => {
            let sent =
                service.send_single(&single.to, &single.subject, &single.body, &single.attachments);

            Ok(if sent {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn print_report(report: &RunReport) {
    println!("Bulk email results:");
    println!("Success: {}", report.success_count);
    println!("Failed: {}", report.failed_count);

    if !report.errors.is_empty() {
        println!("Errors:");

        for error in &report.errors {
            println!("  - {error}");
        }
    }
}
