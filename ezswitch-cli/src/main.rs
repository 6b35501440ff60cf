mod run;
mod script;
mod sim;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io;

#[derive(Parser)]
#[command(name = "ezswitch-cli")]
#[command(about = "Replay switch scripts against a simulated board")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a switch script and print every event and output write
    Run {
        /// Path to the switch script
        script: String,
    },
    /// Parse a switch script without running it
    Check {
        /// Path to the switch script
        script: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { script } => {
            let script = load(&script)?;
            let summary = run::run_script(&script, &mut io::stdout().lock())?;

            match summary.last_switched {
                Some(id) => println!(
                    "{} transition(s), last switched: {}",
                    summary.transitions, id
                ),
                None => println!("{} transition(s)", summary.transitions),
            }
        }
        Command::Check { script: path } => {
            let script = load(&path)?;
            println!(
                "{}: {} command(s), capacity {}",
                path,
                script.commands.len(),
                script.capacity
            );
        }
    }

    Ok(())
}

fn load(path: &str) -> Result<script::Script> {
    let contents = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    script::parse_script(&contents).with_context(|| format!("parsing {}", path))
}
