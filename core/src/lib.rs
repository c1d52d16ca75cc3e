pub use chip8::Chip8;
pub use config::Config;
pub use display::FrameBuffer;
pub use error::{Error, Result};
pub use instruction::Instruction;

mod chip8;
mod config;
pub mod constants;
pub mod cpu;
pub mod display;
mod error;
mod instruction;
pub mod keypad;
pub mod memory;
pub mod opcode;
mod operations;
pub mod state;
