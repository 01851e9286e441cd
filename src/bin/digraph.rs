//! digraph CLI: run graph queries over rule files.
//!
//! Usage:
//!   digraph bags <file> [--target name] [--verbose]

use clap::{Parser, Subcommand};
use digraph::bags::{self, DEFAULT_TARGET};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "digraph",
    version,
    about = "Directed graph queries over rule files"
)]
struct Cli {
    /// Log graph operations to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer bag containment questions for a rules file
    Bags {
        /// Rules file, one "X bags contain ..." rule per line
        input: PathBuf,
        /// Bag to ask about
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: String,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_bags(input: &Path, target: &str) -> i32 {
    let graph = match bags::load_rules(input) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error: cannot load '{}': {}", input.display(), e);
            return 1;
        }
    };

    let holders = match bags::containers(&graph, target) {
        Ok(holders) => holders,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let inside = match bags::contained_count(&graph, target) {
        Ok(count) => count,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    println!("Part 1: {}", holders.len());
    println!("Part 2: {}", inside);
    0
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Commands::Bags { input, target } => cmd_bags(&input, &target),
    };
    std::process::exit(code);
}
