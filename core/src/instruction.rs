use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A decoded instruction: the operation plus its operands.
///
/// Decoding and execution are separate steps so that either can be tested
/// (and logged) on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipEqImm { x: usize, kk: u8 },
    /// 4xkk
    SkipNeqImm { x: usize, kk: u8 },
    /// 5xy0
    SkipEqReg { x: usize, y: usize },
    /// 6xkk
    LoadImm { x: usize, kk: u8 },
    /// 7xkk
    AddImm { x: usize, kk: u8 },
    /// 8xy0
    LoadReg { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    AddReg { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    Shr { x: usize },
    /// 8xy7
    Subn { x: usize, y: usize },
    /// 8xyE
    Shl { x: usize },
    /// 9xy0
    SkipNeqReg { x: usize, y: usize },
    /// Annn
    LoadIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxkk
    Rand { x: usize, kk: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    SkipKeyPressed { x: usize },
    /// ExA1
    SkipKeyNotPressed { x: usize },
    /// Fx07
    LoadDelay { x: usize },
    /// Fx0A
    WaitKey { x: usize },
    /// Fx15
    SetDelay { x: usize },
    /// Fx18
    SetSound { x: usize },
    /// Fx1E
    AddIndex { x: usize },
    /// Fx29
    LoadFont { x: usize },
    /// Fx33
    StoreBcd { x: usize },
    /// Fx55
    StoreRegs { x: usize },
    /// Fx65
    LoadRegs { x: usize },
}

impl Instruction {
    /// Selects the correct Instruction for a raw opcode.
    /// Anything that isn't in the instruction set (including 0nnn machine
    /// code calls) is an `Error::UnknownOpcode`.
    pub fn decode(op: u16) -> Result<Self> {
        use Instruction::*;

        let (x, y) = (op.x(), op.y());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Cls,
            (0x0, 0x0, 0xE, 0xE) => Ret,
            (0x1, ..) => Jump(op.addr()),
            (0x2, ..) => Call(op.addr()),
            (0x3, ..) => SkipEqImm { x, kk: op.kk() },
            (0x4, ..) => SkipNeqImm { x, kk: op.kk() },
            (0x5, .., 0x0) => SkipEqReg { x, y },
            (0x6, ..) => LoadImm { x, kk: op.kk() },
            (0x7, ..) => AddImm { x, kk: op.kk() },
            (0x8, .., 0x0) => LoadReg { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => Shr { x },
            (0x8, .., 0x7) => Subn { x, y },
            (0x8, .., 0xE) => Shl { x },
            (0x9, .., 0x0) => SkipNeqReg { x, y },
            (0xA, ..) => LoadIndex(op.addr()),
            (0xB, ..) => JumpOffset(op.addr()),
            (0xC, ..) => Rand { x, kk: op.kk() },
            (0xD, ..) => Draw { x, y, n: op.n() },
            (0xE, _, 0x9, 0xE) => SkipKeyPressed { x },
            (0xE, _, 0xA, 0x1) => SkipKeyNotPressed { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadFont { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegs { x },
            (0xF, _, 0x6, 0x5) => LoadRegs { x },
            _ => return Err(Error::UnknownOpcode(op)),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`. The pc must already point past it.
    /// Register operands are taken modulo 16, so a hand-built instruction
    /// can't index past VF.
    pub fn execute<R: Rng>(self, state: &mut State, rng: &mut R) -> Result<()> {
        use Instruction::*;

        match self {
            Cls => cls(state),
            Ret => ret(state),
            Jump(addr) => jump(state, addr),
            Call(addr) => call(state, addr),
            SkipEqImm { x, kk } => skip_eq_imm(state, x & 0xF, kk),
            SkipNeqImm { x, kk } => skip_neq_imm(state, x & 0xF, kk),
            SkipEqReg { x, y } => skip_eq_reg(state, x & 0xF, y & 0xF),
            LoadImm { x, kk } => load_imm(state, x & 0xF, kk),
            AddImm { x, kk } => add_imm(state, x & 0xF, kk),
            LoadReg { x, y } => load_reg(state, x & 0xF, y & 0xF),
            Or { x, y } => or(state, x & 0xF, y & 0xF),
            And { x, y } => and(state, x & 0xF, y & 0xF),
            Xor { x, y } => xor(state, x & 0xF, y & 0xF),
            AddReg { x, y } => add_reg(state, x & 0xF, y & 0xF),
            Sub { x, y } => sub(state, x & 0xF, y & 0xF),
            Shr { x } => shr(state, x & 0xF),
            Subn { x, y } => subn(state, x & 0xF, y & 0xF),
            Shl { x } => shl(state, x & 0xF),
            SkipNeqReg { x, y } => skip_neq_reg(state, x & 0xF, y & 0xF),
            LoadIndex(addr) => load_index(state, addr),
            JumpOffset(addr) => jump_offset(state, addr),
            Rand { x, kk } => rand(state, x & 0xF, kk, rng),
            Draw { x, y, n } => draw(state, x & 0xF, y & 0xF, n),
            SkipKeyPressed { x } => skip_key_pressed(state, x & 0xF),
            SkipKeyNotPressed { x } => skip_key_not_pressed(state, x & 0xF),
            LoadDelay { x } => load_delay(state, x & 0xF),
            WaitKey { x } => wait_key(state, x & 0xF),
            SetDelay { x } => set_delay(state, x & 0xF),
            SetSound { x } => set_sound(state, x & 0xF),
            AddIndex { x } => add_index(state, x & 0xF),
            LoadFont { x } => load_font(state, x & 0xF),
            StoreBcd { x } => store_bcd(state, x & 0xF),
            StoreRegs { x } => store_regs(state, x & 0xF),
            LoadRegs { x } => load_regs(state, x & 0xF),
        }
    }
}

/// Conventional assembler mnemonics, e.g. `LD V1, 0x22`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jump(addr) => write!(f, "JP {:#05X}", addr),
            Call(addr) => write!(f, "CALL {:#05X}", addr),
            SkipEqImm { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipNeqImm { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddImm { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            LoadReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x } => write!(f, "SHR V{:X}", x),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x } => write!(f, "SHL V{:X}", x),
            SkipNeqReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(addr) => write!(f, "LD I, {:#05X}", addr),
            JumpOffset(addr) => write!(f, "JP V0, {:#05X}", addr),
            Rand { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:#X}", x, y, n),
            SkipKeyPressed { x } => write!(f, "SKP V{:X}", x),
            SkipKeyNotPressed { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadFont { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegs { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegs { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
