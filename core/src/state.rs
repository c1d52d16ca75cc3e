use crate::cpu::Cpu;
use crate::display::Display;
use crate::keypad::Keypad;
use crate::memory::Memory;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// - 16 8-bit registers, the index register, the program counter, the call
///   stack and the delay & sound timers (see `Cpu`)
///
/// ## Memory
/// - 4096 bytes of addressable memory holding the font, the program and scratch space
///
/// ## Display
/// - a 64x32 frame buffer of the next frame to be drawn plus its draw flag
///
/// ## Input
/// - the pressed status of keys 0..F
/// - emulation halts while a register is waiting on a key press
///
/// Every instance is fully independent; nothing here is shared between machines.
#[derive(Clone, Debug, Default)]
pub struct State {
    pub cpu: Cpu,
    pub memory: Memory,
    pub display: Display,
    pub keypad: Keypad,
}

impl State {
    /// Power-on state: zeroed registers, pc at the program start, blank
    /// display, no keys pressed and the font table in memory.
    pub fn new() -> Self {
        Self::default()
    }
}
