use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use chip8_core::constants::{CYCLES_PER_FRAME, FRAME_RATE};

mod audio;
mod keymap;
mod run;

/// Runs a Chip-8 program in an SDL2 window.
///
/// Keys 1-4, Q-R, A-F and Z-V form the keypad. Enter resets the program and
/// Escape quits.
#[derive(Parser, Debug)]
#[command(name = "chip8")]
pub struct Args {
    /// Path to a raw program image
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// Instructions executed per rendered frame; the timers tick once per frame.
    #[arg(long, default_value_t = CYCLES_PER_FRAME, value_parser = clap::value_parser!(u32).range(1..))]
    cycles_per_frame: u32,

    /// Frames per second.
    #[arg(long, default_value_t = FRAME_RATE, value_parser = clap::value_parser!(u32).range(1..=1000))]
    frame_rate: u32,

    /// Window pixels per Chip-8 pixel.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    scale: u32,

    /// Seed for the random number instruction, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Don't open an audio device.
    #[arg(long, default_value_t = false)]
    mute: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run::run(&args)
}
