mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::CalendarArgs;

#[derive(Parser)]
#[command(name = "millennial")]
#[command(about = "Browse months and pick dates from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the calendar once
    Show {
        #[command(flatten)]
        calendar: CalendarArgs,

        /// Print the month grids as JSON instead of drawing them
        #[arg(long)]
        json: bool,
    },
    /// Drive the calendar with one command per line on stdin
    Session {
        #[command(flatten)]
        calendar: CalendarArgs,
    },
    /// Show the config file location
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { calendar, json } => commands::show::run(calendar, json),
        Commands::Session { calendar } => commands::session::run(calendar),
        Commands::Config { init } => commands::config::run(init),
    }
}
