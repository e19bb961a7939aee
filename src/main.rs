mod cli;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use nutrilog::config::NutrilogConfig;

#[derive(Parser)]
#[command(name = "nutrilog", version, about = "Food journal with nutrition goal tracking")]
struct Cli {
    /// Config file (defaults to ~/.nutrilog/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (stdio transport)
    Serve,
    /// Log a food entry
    Log(cli::log::LogArgs),
    /// Show entries and totals for a day
    Day {
        /// ISO date (defaults to today)
        date: Option<String>,
        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Show progress against nutrition goals for a day
    Goals {
        /// ISO date (defaults to today)
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Analyze goal attainment and consistency over recent days
    Trend {
        /// Number of days ending today
        #[arg(long, default_value_t = 7)]
        days: u32,
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry by ID
    Delete {
        id: String,
        /// Day holding the entry; without it only the last 30 days are searched
        #[arg(long)]
        date: Option<String>,
    },
    /// Export entries and summaries as JSON to stdout
    Export {
        /// First day (defaults to 365 days before the end)
        #[arg(long)]
        start: Option<String>,
        /// Last day (defaults to today)
        #[arg(long)]
        end: Option<String>,
    },
    /// Import entries from a JSON file
    Import {
        /// Path to the JSON file (an export, or `{"entries": [...]}`)
        file: PathBuf,
    },
    /// List backup archives, newest first
    Backups,
    /// Replace a day's entries with a backup archive
    Restore {
        /// Archive file name as shown by `backups`
        name: String,
    },
    /// Delete all journal data (requires typing YES)
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = match &cli.config {
        Some(path) => NutrilogConfig::load_from(path)?,
        None => NutrilogConfig::load()?,
    };

    // Log to stderr so stdout stays clean for MCP JSON-RPC and JSON output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => server::serve_stdio(config).await?,
        Command::Log(args) => cli::log::log(&config, args).await?,
        Command::Day { date, json } => cli::day::day(&config, date.as_deref(), json).await?,
        Command::Goals { date, json } => cli::goals::goals(&config, date.as_deref(), json).await?,
        Command::Trend { days, json } => cli::trend::trend(&config, days, json).await?,
        Command::Delete { id, date } => cli::delete::delete(&config, &id, date.as_deref()).await?,
        Command::Export { start, end } => {
            cli::export::export(&config, start.as_deref(), end.as_deref()).await?
        }
        Command::Import { file } => cli::import::import(&config, &file).await?,
        Command::Backups => cli::backups::list(&config).await?,
        Command::Restore { name } => cli::backups::restore(&config, &name).await?,
        Command::Reset => cli::reset::reset(&config).await?,
    }

    Ok(())
}
