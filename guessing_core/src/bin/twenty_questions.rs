//! Console twenty-questions against a catalog file.
//!
//! Answer each question with `yes`, `no` or `unknown` (`y`, `n`, `?`).
//! Lines starting with `#` are commands, see `#help`.

use anyhow::{Context, Result};
use clap::Parser;
use entity_catalog::Catalog;
use guessing_core::{EngineConfig, GameEngine, NextStep, Question, SessionId};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "twenty-questions")]
#[command(version, about = "Think of an entity and answer yes/no questions about it", long_about = None)]
struct Cli {
    /// Catalog file (TOML) to guess from
    #[arg(long)]
    catalog: PathBuf,

    /// Engine configuration file (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible question order
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(catalog, config, seed),
        None => GameEngine::new(catalog, config),
    };

    print_help();
    let mut game = new_game(&engine)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('#') {
            match command.trim() {
                "quit" | "exit" => break,
                "help" => print_help(),
                "new" => {
                    engine.end(&game);
                    game = new_game(&engine)?;
                }
                "candidates" => match engine.list_candidates(&game) {
                    Ok(candidates) => {
                        println!("[CANDIDATES] {} left", candidates.len());
                        for candidate in candidates {
                            println!("  {} ({})", candidate.label, candidate.entity);
                        }
                    }
                    Err(e) => println!("[ERROR] {e}"),
                },
                other => println!("[ERROR] Unknown command #{other}"),
            }
            continue;
        }

        match engine.answer_raw(&game.to_string(), Some(line)) {
            Ok(NextStep::NextQuestion {
                remaining_candidates,
                question,
            }) => {
                println!("[{remaining_candidates} candidates left]");
                ask(&question)?;
            }
            Ok(NextStep::Guess { label, .. }) => {
                println!("[GUESSED] It's {label}!");
                println!("Type #new to play again or #quit to leave.");
            }
            Ok(NextStep::NoCandidates) => {
                println!("[STUMPED] Nothing in the catalog matches those answers.");
                println!("Type #new to play again or #quit to leave.");
            }
            Err(e) => println!("[ERROR] {e}"),
        }
    }

    engine.end(&game);
    println!("Goodbye!");
    Ok(())
}

fn new_game(engine: &GameEngine<Catalog>) -> Result<SessionId> {
    let start = engine.start().context("starting a game")?;
    println!();
    ask(&start.question)?;
    Ok(start.session_id)
}

fn ask(question: &Question) -> Result<()> {
    print!("{} ", question.text);
    io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    println!("=== Twenty Questions ===");
    println!("Answers: yes / no / unknown (y, n, ?)");
    println!("Commands:");
    println!("  #candidates - List entities still matching your answers");
    println!("  #new        - Start over");
    println!("  #quit       - Exit");
    println!("  #help       - Show this help");
}
