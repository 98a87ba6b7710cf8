use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "fitquest-cli", version, about = "FitQuest daily nutrition tracker")]
struct Cli {
    /// Act as if the app were opened at this moment (RFC 3339)
    #[arg(long, global = true)]
    at: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print today's totals, targets, entries and streak as JSON
    Status,
    /// Log, edit and delete entries
    Entry {
        #[command(subcommand)]
        action: commands::entry::EntryAction,
    },
    /// Daily targets
    Targets {
        #[command(subcommand)]
        action: commands::targets::TargetsAction,
    },
    /// Per-macro tracking switches
    Track {
        #[command(subcommand)]
        action: commands::track::TrackAction,
    },
    /// Print the current streak and level
    Streak,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FITQUEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::status::run(cli.at.as_deref()),
        Commands::Entry { action } => commands::entry::run(action, cli.at.as_deref()),
        Commands::Targets { action } => commands::targets::run(action, cli.at.as_deref()),
        Commands::Track { action } => commands::track::run(action, cli.at.as_deref()),
        Commands::Streak => commands::streak::run(cli.at.as_deref()),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
