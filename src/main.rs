//! Paging Simulator - Main Entry Point
//!
//! Usage: paging-simulator [OPTIONS]
//!
//! Asks for the memory geometry (unless given as options), then runs the
//! interactive menu: view physical memory, view a page table, create a
//! process, exit.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use paging_simulator::PagingSimulator;
use paging_simulator::content::{ContentGenerator, RandomContent};
use paging_simulator::io::{GeometryPreset, Shell};
use paging_simulator::logger::StderrLogger;

/// Command-line configuration
#[derive(Parser)]
#[command(name = "paging-simulator")]
#[command(about = "Interactive fixed-size paging and frame allocation simulator")]
struct Config {
    /// Physical memory size in bytes (power of 2)
    #[arg(long)]
    memory_size: Option<i64>,

    /// Page/frame size in bytes (power of 2, at most the memory size)
    #[arg(long)]
    page_size: Option<i64>,

    /// Maximum process size in bytes (power of 2, at most the memory size)
    #[arg(long)]
    max_process_size: Option<i64>,

    /// Seed for process contents, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Log more (repeat for debug/trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let config = Config::parse();

    StderrLogger::new(StderrLogger::level_for(config.verbose, config.quiet))
        .init()
        .context("Failed to install logger")?;

    run(&config)
}

/// Main logic separated from main() for cleaner error handling
fn run(config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout().lock());

    let preset = GeometryPreset {
        memory_size: config.memory_size,
        page_size: config.page_size,
        max_process_size: config.max_process_size,
    };
    let Some(geometry) = shell.configure(preset).context("Failed to read configuration")? else {
        info!("input closed before configuration finished");
        return Ok(());
    };

    let content: Box<dyn ContentGenerator> = match config.seed {
        Some(seed) => {
            info!("using content seed {}", seed);
            Box::new(RandomContent::seeded(seed))
        }
        None => Box::new(RandomContent::from_entropy()),
    };

    let mut sim = PagingSimulator::new(geometry, content);
    shell.run(&mut sim).context("Shell I/O failed")?;
    Ok(())
}
