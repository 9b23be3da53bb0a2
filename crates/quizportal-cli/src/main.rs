//! quizportal CLI — the interactive portal and its maintenance commands.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizportal", version, about = "Role-based educational quiz portal")]
struct Cli {
    /// Directory holding the record files (overrides config and QUIZPORTAL_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive portal (the default)
    Portal,

    /// Show quiz results per student and the class average
    Stats {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config and seed the default quiz bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizportal=warn")),
        )
        .init();

    let cli = Cli::parse();
    let options = commands::GlobalOptions {
        data_dir: cli.data_dir,
        config: cli.config,
    };

    let result = match cli.command.unwrap_or(Commands::Portal) {
        Commands::Portal => commands::portal::execute(&options),
        Commands::Stats { format } => commands::stats::execute(&options, format),
        Commands::Init => commands::init::execute(&options),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
