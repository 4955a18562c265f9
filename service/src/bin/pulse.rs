//! Command-line view of recent congressional activity.
//!
//! Reads the same configuration as the server (`config.yaml` and `PULSE_`
//! environment variables) and talks to congress.gov directly.

#![allow(clippy::print_stdout)]

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use congress_pulse_api::config::Config;
use congress_pulse_api::congress::{CongressApiClient, HttpCongressClient};
use cp_bills::{
    filter, journey, normalize_feed, sort_recent_first, BillId, ChamberFilter, FilterSpec,
    LegislativeStage,
};
use tracing_subscriber::EnvFilter;

/// Browse recently updated bills and their journeys
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List recently updated bills matching the given filters
    Bills {
        /// Earliest latest-action date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Latest latest-action date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// all, house or senate
        #[arg(long, default_value = "all")]
        chamber: ChamberFilter,

        /// Stage label, repeatable (e.g. --stage "Passed House")
        #[arg(long = "stage")]
        stages: Vec<LegislativeStage>,

        #[arg(long, default_value_t = 0)]
        min_cosponsors: u32,

        /// Congress to list (default: from configuration)
        #[arg(long)]
        congress: Option<u32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the milestones and actions of one bill
    Journey {
        /// Bill number as listed, e.g. "HR 2316"
        bill: String,

        /// Congress of the bill (default: from configuration)
        #[arg(long)]
        congress: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .with_writer(std::io::stderr)
        .init();

    let client = HttpCongressClient::new(&config.congress.base_url, &config.congress.api_key)
        .with_timeout(Duration::from_secs(config.congress.timeout_secs));

    match args.command {
        Command::Bills {
            from,
            to,
            chamber,
            stages,
            min_cosponsors,
            congress,
            json,
        } => {
            let spec = FilterSpec {
                start: from,
                end: to,
                chamber,
                stages,
                min_cosponsors,
            };
            let congress = congress.unwrap_or(config.congress.congress);
            let records = client
                .list_bills(congress, config.congress.page_size, spec.start)
                .await?;

            let mut report = normalize_feed(records);
            sort_recent_first(&mut report.bills);
            let bills = filter(&report.bills, &spec);

            if json {
                println!("{}", serde_json::to_string_pretty(&bills)?);
                return Ok(());
            }

            for active in spec.active_filters() {
                println!("# {active}");
            }
            println!(
                "{} of {} bills ({} skipped)",
                bills.len(),
                report.bills.len(),
                report.failures.len()
            );
            for bill in &bills {
                println!(
                    "{:<12} {:<7} {}  {:<24} {}",
                    bill.bill_number,
                    bill.origin_chamber,
                    bill.action_date,
                    bill.legislative_stage,
                    bill.title
                );
            }
        }
        Command::Journey {
            bill,
            congress,
            json,
        } => {
            let congress = congress.unwrap_or(config.congress.congress);
            let id = BillId::from_bill_number(&bill, congress)?;
            let records = client
                .list_actions(&id, config.congress.actions_limit)
                .await?;
            let actions = journey::normalize_actions(records);
            let summary = journey::summarize(&actions, Utc::now().date_naive());
            let milestones = journey::milestones(&actions);

            if json {
                let value = serde_json::json!({
                    "summary": summary,
                    "milestones": milestones,
                    "actions": actions,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("{id}");
            println!(
                "{} actions ({} floor, {} committee)",
                summary.total, summary.floor, summary.committee
            );
            if let Some(days) = summary.days_since_introduction {
                println!("{days} days since introduction");
            }
            for milestone in &milestones {
                println!(
                    "{}  {:<18} {}",
                    milestone.date,
                    milestone.event.label(),
                    milestone.description
                );
            }
        }
    }

    Ok(())
}
