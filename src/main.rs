//! Kowsim - Entry Point
//!
//! Headless console over the table: reads commands from stdin, feeds them
//! through the interaction state machine and prints status and log lines.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kowsim::battle::Battlefield;
use kowsim::command::{parse_command, ConsoleInput, Interaction, InteractionOutcome};
use kowsim::command::parser::HELP;
use kowsim::core::config::{load_config, EngineConfig};
use kowsim::core::error::Result;

/// Tabletop battlefield aid
#[derive(Parser, Debug)]
#[command(name = "kowsim")]
#[command(about = "Measure, classify arcs and move unit bases on a virtual table")]
struct Args {
    /// TOML file with table settings and unit deployment
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut field = Battlefield::from_config(&config)?;
    let mut interaction = Interaction::new();
    tracing::info!(
        "Table {}\" x {}\" with {} units",
        config.table.width,
        config.table.depth,
        field.len()
    );

    println!("\n=== KOWSIM ===");
    println!("{}", HELP);
    println!();
    list_units(&field);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(ConsoleInput::Table(command)) => {
                let outcome = interaction.dispatch(&mut field, command);
                print_outcome(&outcome);
            }
            Ok(ConsoleInput::ListUnits) => list_units(&field),
            Ok(ConsoleInput::ShowLog) => println!("{}", field.log.to_json()?),
            Ok(ConsoleInput::Help) => println!("{}", HELP),
            Ok(ConsoleInput::Quit) => break,
            Err(e) => println!("{}", e),
        }
    }

    println!("\nGoodbye! {} events logged.", field.log.len());
    Ok(())
}

fn print_outcome(outcome: &InteractionOutcome) {
    if let Some(reason) = &outcome.rejected {
        println!("  ignored: {}", reason);
    }
    for line in &outcome.log {
        println!("  {}", line);
    }
    if let Some(pose) = &outcome.preview {
        println!(
            "  preview: ({:.2}, {:.2}) facing {:.1}°",
            pose.x,
            pose.y,
            pose.rotation()
        );
    }
    match &outcome.counter {
        Some(counter) => println!("[{}] {}", counter, outcome.status),
        None => println!("{}", outcome.status),
    }
}

fn list_units(field: &Battlefield) {
    println!("Units:");
    for unit in field.units() {
        let pose = unit.pose();
        let footprint = unit.footprint();
        println!(
            "  {:<20} at ({:>6.2}, {:>6.2}) facing {:>5.1}°  base {:.2}\" x {:.2}\"",
            unit.name,
            pose.x,
            pose.y,
            pose.rotation(),
            footprint.width(),
            footprint.depth()
        );
    }
}
