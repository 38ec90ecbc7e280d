use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod platform;

#[derive(Parser)]
#[command(name = "setflow", version, about = "Setflow workout timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the flattened activity plan for a workout file
    Plan {
        /// Workout JSON document
        file: PathBuf,
        /// Print the activity sequence as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run the guided workout timer
    Play {
        /// Workout JSON document
        file: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan { file, json } => commands::plan::run(&file, json),
        Commands::Play { file } => commands::play::run(&file),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
