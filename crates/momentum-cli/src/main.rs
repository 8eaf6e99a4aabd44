use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use momentum_core::ActivityKind;

mod commands;

#[derive(Parser)]
#[command(name = "momentum-cli", version, about = "Momentum CLI")]
struct Cli {
    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current momentum, reconciling drift for missed days
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log a tracked activity
    Log {
        /// Activity kind (chat/workout/mood/journal/meditate/recovery/other)
        #[arg(long, default_value = "other")]
        kind: ActivityKind,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recorded momentum events
    History {
        /// Number of most recent events to show
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start over with a fresh momentum record
    Reset {
        /// Delete the stored record and its history instead of recording a reset
        #[arg(long)]
        purge: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MOMENTUM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let today = cli.today.as_deref();
    let result = match cli.command {
        Commands::Status { json } => commands::momentum::status(today, json),
        Commands::Log { kind, json } => commands::momentum::log(today, kind, json),
        Commands::History { limit, json } => commands::momentum::history(limit, json),
        Commands::Reset { purge } => commands::momentum::reset(today, purge),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
