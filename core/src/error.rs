use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Faults raised while loading or executing a program.
///
/// None of these are recovered from inside the interpreter; they are returned
/// to the driver, which decides whether to halt, reset or report.
#[derive(Debug, Error)]
pub enum Error {
    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("write to read-only font memory at {address:#06X}")]
    ReadOnlyMemory { address: usize },

    #[error("program is too large ({size} bytes), max size is {max_size} bytes")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error("unimplemented instruction {0:#06X}")]
    UnknownOpcode(u16),

    #[error("call stack overflow at {pc:#06X}")]
    StackOverflow { pc: u16 },

    #[error("return with an empty call stack at {pc:#06X}")]
    StackUnderflow { pc: u16 },

    #[error("key {0:#04X} is not on the keypad")]
    InvalidKey(u8),

    #[error("unable to read program: {0}")]
    Io(#[from] std::io::Error),
}
