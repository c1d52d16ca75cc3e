/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Where program images are loaded and where the program counter starts.
pub const PROGRAM_START: u16 = 0x200;

/// The largest program image that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Where the hexadecimal font sprites live.
pub const FONT_BASE: u16 = 0x000;

/// Each font glyph is 8 pixels wide (one byte per row) and this many rows tall.
pub const FONT_GLYPH_SIZE: u16 = 5;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Sprites are always one byte, i.e. 8 pixels, wide.
pub const SPRITE_WIDTH: usize = 8;

/// The number of general purpose registers (V0..VF).
pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag.
pub const FLAG_REGISTER: usize = 0xF;

/// The number of return addresses the call stack can hold.
pub const STACK_DEPTH: usize = 16;

/// The number of keys on the hexadecimal keypad (0..F).
pub const KEY_COUNT: usize = 16;

/// Default number of completed cycles per delay/sound timer decrement.
/// A driver that runs N cycles per 60Hz frame should configure N here so that
/// the timers count down at 60Hz regardless of the instruction rate.
pub const CYCLES_PER_TIMER_TICK: u32 = 1;

/// Default number of cycles a driver runs between rendered frames.
pub const CYCLES_PER_FRAME: u32 = 10;

/// Default frame rate of a driver, which is also the nominal timer frequency.
pub const FRAME_RATE: u32 = 60;

/// # Sprite Sheet
/// Sprites for the hexadecimal digits 0..F, each of which is 5 bytes tall.
///
/// ```text
/// "0"   Binary   Hex
/// ****  11110000 0xF0
/// *  *  10010000 0x90
/// *  *  10010000 0x90
/// *  *  10010000 0x90
/// ****  11110000 0xF0
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
