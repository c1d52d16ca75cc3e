use crate::constants::{FONT_BASE, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Error, Result};

const FONT_START: usize = FONT_BASE as usize;
const FONT_END: usize = FONT_START + SPRITE_SHEET.len();

/// # Memory
/// 4096 bytes of flat, byte addressable memory.
///
/// ```text
/// 0x000..0x050  hexadecimal font sprites
/// 0x050..0x200  reserved for the interpreter
/// 0x200..0x1000 program image and scratch space
/// ```
///
/// Every access is bounds checked; an address past the end of memory is an
/// `Error::MemoryOutOfBounds` rather than a panic. The font table is only
/// written by `load_font_table`; any other write that touches it is an
/// `Error::ReadOnlyMemory`.
#[derive(Clone, Debug)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the font table already written.
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.load_font_table();
        memory
    }

    pub fn read(&self, addr: usize) -> Result<u8> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(Error::MemoryOutOfBounds { address: addr })
    }

    pub fn write(&mut self, addr: usize, byte: u8) -> Result<()> {
        self.slice_mut(addr, 1)?[0] = byte;
        Ok(())
    }

    /// Reads the big-endian word at `addr`, i.e. `mem[addr] << 8 | mem[addr + 1]`.
    pub fn read_word(&self, addr: usize) -> Result<u16> {
        let high = u16::from(self.read(addr)?);
        let low = u16::from(self.read(addr + 1)?);
        Ok(high << 8 | low)
    }

    /// Borrows `len` bytes starting at `addr`.
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        let end = Self::end_of(addr, len)?;
        Ok(&self.bytes[addr..end])
    }

    /// Mutably borrows `len` bytes starting at `addr`.
    /// The range may not overlap the font table.
    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        let end = Self::end_of(addr, len)?;
        if len > 0 && addr < FONT_END && end > FONT_START {
            return Err(Error::ReadOnlyMemory {
                address: addr.max(FONT_START),
            });
        }
        Ok(&mut self.bytes[addr..end])
    }

    /// Writes the hexadecimal digit sprites into the reserved low region.
    pub fn load_font_table(&mut self) {
        self.bytes[FONT_START..FONT_END].copy_from_slice(&SPRITE_SHEET);
    }

    /// Copies a program image to `PROGRAM_START`.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }
        self.slice_mut(PROGRAM_START as usize, program.len())?
            .copy_from_slice(program);
        Ok(())
    }

    fn end_of(addr: usize, len: usize) -> Result<usize> {
        match addr.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(end),
            // report the first byte that doesn't exist
            _ => Err(Error::MemoryOutOfBounds {
                address: addr.max(MEMORY_SIZE),
            }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed_after_font() {
        let memory = Memory::new();
        assert_eq!(memory.bytes[..80], SPRITE_SHEET);
        assert!(memory.bytes[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_read_write() {
        let mut memory = Memory::new();
        memory.write(0x300, 0xAB).unwrap();
        assert_eq!(memory.read(0x300).unwrap(), 0xAB);
    }

    #[test]
    fn test_read_out_of_bounds() {
        let memory = Memory::new();
        assert!(matches!(
            memory.read(0x1000),
            Err(Error::MemoryOutOfBounds { address: 0x1000 })
        ));
    }

    #[test]
    fn test_write_out_of_bounds() {
        let mut memory = Memory::new();
        assert!(memory.write(0x1234, 0x1).is_err());
    }

    #[test]
    fn test_font_table_is_read_only() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.write(0x0, 0xAA),
            Err(Error::ReadOnlyMemory { address: 0x0 })
        ));
        assert!(matches!(
            memory.slice_mut(0x4E, 4),
            Err(Error::ReadOnlyMemory { address: 0x4E })
        ));
        assert_eq!(memory.bytes[..80], SPRITE_SHEET);
        // the interpreter area right after the font is writable
        memory.write(0x50, 0xAA).unwrap();
        assert_eq!(memory.read(0x50).unwrap(), 0xAA);
    }

    #[test]
    fn test_read_word() {
        let mut memory = Memory::new();
        memory.slice_mut(0x200, 2).unwrap().copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(memory.read_word(0x200).unwrap(), 0xAABB);
    }

    #[test]
    fn test_read_word_straddling_end() {
        let memory = Memory::new();
        assert!(memory.read_word(0xFFF).is_err());
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let memory = Memory::new();
        assert!(memory.slice(0xFFE, 3).is_err());
        assert_eq!(memory.slice(0xFFE, 2).unwrap(), &[0, 0]);
    }

    #[test]
    fn test_program_load() {
        let mut memory = Memory::new();
        memory.load_program(&[0x00, 0xE0]).unwrap();
        assert_eq!(memory.slice(0x200, 2).unwrap(), &[0x00, 0xE0]);
    }

    #[test]
    fn test_program_load_fills_memory() {
        let mut memory = Memory::new();
        memory.load_program(&[0x1; MAX_PROGRAM_SIZE]).unwrap();
        assert_eq!(memory.read(0xFFF).unwrap(), 0x1);
    }

    #[test]
    fn test_program_too_large() {
        let mut memory = Memory::new();
        let program = vec![0; MAX_PROGRAM_SIZE + 1];
        assert!(matches!(
            memory.load_program(&program),
            Err(Error::ProgramTooLarge { size, max_size: MAX_PROGRAM_SIZE }) if size == MAX_PROGRAM_SIZE + 1
        ));
    }
}
