mod commands;

use crate::commands::{candidate, closest, contests, dump, results, summary};
use clap::{Parser, Subcommand};
use colored::*;
use ncsbe_results::{source_url, AcquirerConfig, ElectionResults, HttpAcquirer};
use std::time::Duration;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// Election date in YYYY-MM-DD form (e.g. "2024-11-05")
    #[clap(long, env = "NCSBE_ELECTION_DATE")]
    date: String,
    /// Results archive URL; defaults to the published location for the date
    #[clap(long, env = "NCSBE_SOURCE_URL")]
    url: Option<String>,
    /// HTTP timeout for the archive download, in seconds
    #[clap(long, default_value = "120")]
    timeout_secs: u64,
    /// Turn on debug logging
    #[clap(long)]
    verbose: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every contest in the election.
    Contests,
    /// Show candidate totals for one contest.
    Results {
        /// Normalized contest name (e.g. "US_SENATE")
        contest: String,
        /// Also list precinct results for this county
        #[clap(long)]
        county: Option<String>,
        /// Print a JSON contest report instead of a table
        #[clap(long)]
        json: bool,
    },
    /// Show a candidate's results across every contest.
    Candidate {
        /// Candidate name as printed on the ballot
        name: String,
    },
    /// Show the contest with the smallest gap between its top two candidates.
    Closest,
    /// Write the whole dataset as JSON.
    Dump {
        #[clap(long)]
        pretty: bool,
    },
    /// Show where the data came from and how long loading took.
    Summary,
}

#[tokio::main]
async fn main() {
    let opts = Opts::parse();

    let level = if opts.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(opts).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(opts: Opts) -> Result<(), Box<dyn std::error::Error>> {
    let config = AcquirerConfig {
        timeout: Duration::from_secs(opts.timeout_secs),
        ..AcquirerConfig::default()
    };
    let acquirer = HttpAcquirer::new(&config)?;
    let url = opts.url.unwrap_or_else(|| source_url(&opts.date));
    let mut election = ElectionResults::with_source(&opts.date, &url, acquirer);

    eprintln!(
        "🚀 Loading results for {} from {}",
        opts.date.bright_cyan(),
        url.bright_cyan()
    );
    let loaded = election.initialize().await?;

    match opts.command {
        Command::Contests => contests(&election),
        Command::Results {
            contest,
            county,
            json,
        } => results(&election, &contest, county.as_deref(), json)?,
        Command::Candidate { name } => candidate(&election, &name),
        Command::Closest => closest(&election),
        Command::Dump { pretty } => dump(&election, pretty)?,
        Command::Summary => summary(&loaded),
    }

    Ok(())
}
