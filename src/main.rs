mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use econcal_core::settings::Settings;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::list::ListArgs;

#[derive(Parser)]
#[command(name = "econcal")]
#[command(about = "Browse scheduled macroeconomic announcements")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events grouped by day
    List(ListArgs),
    /// Show the week summary
    Stats {
        /// Display timezone (Asia/Tehran, UTC, America/New_York, Europe/London)
        #[arg(long)]
        tz: Option<String>,

        /// Load events from a JSON file instead of the sample calendar
        #[arg(long)]
        data: Option<std::path::PathBuf>,
    },
    /// List supported display timezones
    Timezones,
    /// List tracked countries and their currencies
    Countries,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List(args) => {
            let settings = Settings::load()?;
            commands::list::run(settings, args).await
        }
        Commands::Stats { tz, data } => {
            let settings = Settings::load()?;
            commands::stats::run(settings, tz.as_deref(), data)
        }
        Commands::Timezones => commands::timezones::run(),
        Commands::Countries => commands::countries::run(),
    }
}
