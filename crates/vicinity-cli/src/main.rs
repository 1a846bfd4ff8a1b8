mod lookup;
mod watch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "vicinity-cli")]
#[command(about = "Nearby-business discovery from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Track a position and stream nearby businesses as they are discovered.
    ///
    /// stdin is live user input: a plain line replaces the search term
    /// (debounced), `:loc <lat> <lng>` simulates a movement update, and
    /// `:quit` (or EOF / ctrl-c) stops the session.
    Watch {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Initial search term (defaults to an unfiltered search).
        #[arg(long)]
        term: Option<String>,
    },
    /// One-shot search: fetch and print every business around a position.
    Lookup {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        term: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = vicinity_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Watch { lat, lng, term } => watch::run(&config, lat, lng, term).await,
        Commands::Lookup { lat, lng, term } => lookup::run(&config, lat, lng, term).await,
    }
}
