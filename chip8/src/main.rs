use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use chip8_core::CLOCK_SPEED;

mod keymap;
mod run;

/// Runs a Chip-8 ROM in an SDL2 window
///
/// Space fast-forwards, Escape rewinds, Backspace resets.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// ROM file to load
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    clock_hz: u32,

    /// Screen pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=100))]
    scale: u32,

    /// Log more; repeat to trace every instruction
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG still wins over --verbose
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    run::run(&args)
}
