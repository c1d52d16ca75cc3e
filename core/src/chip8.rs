use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::cpu::Cpu;
use crate::display::FrameBuffer;
use crate::error::Result;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the loaded `program` so the machine can be reset
///  - a `timer_counter` of cycles since the timers were last decremented
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys, and delivering a key to a waiting register
/// - advancing the CPU (which also advances its timers)
/// - inspecting its frame buffer for rendering by some display
/// - checking whether a tone should be playing
pub struct Chip8 {
    state: State,
    config: Config,
    program: Vec<u8>,
    rng: StdRng,
    timer_counter: u32,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        Chip8 {
            state: State::new(),
            rng: Self::rng_for(&config),
            config,
            program: Vec::new(),
            timer_counter: 0,
        }
    }

    /// A machine with `program` already loaded.
    pub fn with_program(program: &[u8], config: Config) -> Result<Self> {
        let mut chip8 = Self::new(config);
        chip8.load_program(program)?;
        Ok(chip8)
    }

    fn rng_for(config: &Config) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Copies a program image into memory at the program start.
    /// The machine is returned to its power-on state first so nothing from a
    /// previous program survives. A program that doesn't fit leaves the
    /// machine untouched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let mut state = State::new();
        state.memory.load_program(program)?;
        self.state = state;
        self.program = program.to_vec();
        self.rng = Self::rng_for(&self.config);
        self.timer_counter = 0;
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn std::io::Read) -> Result<()> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Returns the machine to its power-on state and reloads the last program.
    pub fn reset(&mut self) -> Result<()> {
        self.state = State::new();
        self.state.memory.load_program(&self.program)?;
        self.rng = Self::rng_for(&self.config);
        self.timer_counter = 0;
        debug!("reset");
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - does nothing while awaiting a keypress
    /// - fetches the next opcode and moves the pc past it
    /// - decodes and executes it
    /// - advances the timers
    pub fn emulate_cycle(&mut self) -> Result<()> {
        if self.state.keypad.is_waiting() {
            return Ok(());
        }

        let pc = self.state.cpu.pc;
        let op = self.get_op()?;
        self.state.cpu.pc = pc.wrapping_add(2);

        let instruction = Instruction::decode(op).map_err(|e| {
            warn!("{:04X}: {}", pc, e);
            e
        })?;
        trace!(
            "{:04X}: {:04X} {:<16} v{:02X?} i{:04X}",
            pc,
            op,
            instruction.to_string(),
            self.state.cpu.v,
            self.state.cpu.i
        );
        instruction
            .execute(&mut self.state, &mut self.rng)
            .map_err(|e| {
                warn!("{:04X}: {} failed: {}", pc, instruction, e);
                e
            })?;

        if self.state.keypad.is_waiting() {
            debug!("waiting for a key press");
        }
        self.advance_timers();
        Ok(())
    }

    /// Runs `cycles` cycles, stopping at the first fault.
    pub fn run_cycles(&mut self, cycles: u32) -> Result<()> {
        for _ in 0..cycles {
            self.emulate_cycle()?;
        }
        Ok(())
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16> {
        let pc = self.state.cpu.pc;
        self.state.memory.read_word(pc as usize).map_err(|e| {
            warn!("{:04X}: unable to fetch: {}", pc, e);
            e
        })
    }

    /// Counts completed cycles and decrements the timers once every
    /// `Config::cycles_per_timer_tick` of them.
    fn advance_timers(&mut self) {
        self.timer_counter += 1;
        if self.timer_counter >= self.config.timer_period() {
            self.timer_counter = 0;
            self.state.cpu.tick_timers();
        }
    }

    /// Records the polled pressed status of a key.
    pub fn update_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        self.state.keypad.update(key, pressed)
    }

    /// Delivers a freshly pressed key to the register waiting on it, resuming
    /// emulation. Does nothing if no register is waiting.
    pub fn deliver_key(&mut self, key: u8) -> Result<()> {
        if let Some(register) = self.state.keypad.deliver_key(key)? {
            self.state.cpu.v[register] = key;
            debug!("delivered key {:X} to V{:X}", key, register);
        }
        Ok(())
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.state.keypad.is_waiting()
    }

    /// Whether a tone should currently be playing.
    pub fn sound_active(&self) -> bool {
        self.state.cpu.sound_timer > 0
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.state.display.frame_buffer()
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        self.state.display.take_frame()
    }

    pub fn cpu(&self) -> &Cpu {
        &self.state.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn keypad(&self) -> &Keypad {
        &self.state.keypad
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PROGRAM_START;
    use crate::error::Error;

    fn chip8_with(program: &[u8]) -> Chip8 {
        Chip8::with_program(program, Config::default().with_seed(0x8)).unwrap()
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = chip8_with(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op().unwrap(), 0xAABB);
    }

    #[test]
    fn test_cycles_while_no_register_needs_key() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        chip8.emulate_cycle().unwrap();
        assert_eq!(chip8.cpu().pc, PROGRAM_START + 0x2);
    }

    #[test]
    fn test_doesnt_cycle_while_register_needs_key() {
        let mut chip8 = chip8_with(&[0xF1, 0x0A, 0x00, 0xE0]);
        chip8.emulate_cycle().unwrap();
        let waiting_pc = chip8.cpu().pc;
        chip8.emulate_cycle().unwrap();
        assert_eq!(chip8.cpu().pc, waiting_pc);
    }

    #[test]
    fn test_captures_key_presses() {
        let mut chip8 = chip8_with(&[0xF1, 0x0A]);
        chip8.emulate_cycle().unwrap();
        assert!(chip8.is_waiting_for_key());
        chip8.deliver_key(0xE).unwrap();
        assert!(!chip8.is_waiting_for_key());
        assert_eq!(chip8.cpu().v[0x1], 0xE);
    }

    #[test]
    fn test_deliver_key_without_wait_is_ignored() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        chip8.deliver_key(0xE).unwrap();
        assert_eq!(chip8.cpu().v, [0; 16]);
    }

    #[test]
    fn test_unknown_opcode() {
        let mut chip8 = chip8_with(&[0x01, 0x23]);
        assert!(matches!(
            chip8.emulate_cycle(),
            Err(Error::UnknownOpcode(0x0123))
        ));
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let mut chip8 = chip8_with(&[0x1F, 0xFF]);
        chip8.emulate_cycle().unwrap();
        assert!(matches!(
            chip8.emulate_cycle(),
            Err(Error::MemoryOutOfBounds { address: 0x1000 })
        ));
    }

    #[test]
    fn test_timers_tick_at_configured_rate() {
        // 0x200: JP 0x200
        let config = Config::default().with_seed(0x8).with_cycles_per_timer_tick(3);
        let mut chip8 = Chip8::with_program(&[0x12, 0x00], config).unwrap();
        chip8.state.cpu.delay_timer = 2;
        chip8.run_cycles(2).unwrap();
        assert_eq!(chip8.cpu().delay_timer, 2);
        chip8.emulate_cycle().unwrap();
        assert_eq!(chip8.cpu().delay_timer, 1);
        chip8.run_cycles(3).unwrap();
        assert_eq!(chip8.cpu().delay_timer, 0);
    }

    #[test]
    fn test_zero_cycles_per_tick_is_every_cycle() {
        let config = Config::default().with_cycles_per_timer_tick(0);
        let mut chip8 = Chip8::with_program(&[0x12, 0x00], config).unwrap();
        chip8.state.cpu.sound_timer = 1;
        assert!(chip8.sound_active());
        chip8.emulate_cycle().unwrap();
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut chip8 = Chip8::default();
        let mut rom: &[u8] = &[0x00, 0xE0];
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.memory().slice(0x200, 2).unwrap(), &[0x00, 0xE0]);
    }

    #[test]
    fn test_loading_a_program_replaces_the_last_one() {
        // LD V1, 0x22; CLS; CLS; CLS
        let mut chip8 = chip8_with(&[0x61, 0x22, 0x00, 0xE0, 0x00, 0xE0, 0x00, 0xE0]);
        chip8.emulate_cycle().unwrap();
        chip8.load_program(&[0x12, 0x00]).unwrap();
        assert_eq!(chip8.cpu(), &Cpu::new());
        assert_eq!(chip8.memory().slice(0x200, 4).unwrap(), &[0x12, 0x00, 0x0, 0x0]);
        chip8.reset().unwrap();
        assert_eq!(chip8.memory().read_word(0x200).unwrap(), 0x1200);
    }

    #[test]
    fn test_oversized_program_leaves_machine_alone() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        let program = vec![0; crate::constants::MAX_PROGRAM_SIZE + 1];
        assert!(matches!(
            chip8.load_program(&program),
            Err(Error::ProgramTooLarge { .. })
        ));
        assert_eq!(chip8.memory().read_word(0x200).unwrap(), 0x00E0);
    }

    #[test]
    fn test_reset_restores_power_on_state() {
        // LD V1, 0x22; LD [I], V1; LD V2, K
        let mut chip8 = chip8_with(&[0x61, 0x22, 0xA3, 0x00, 0xF1, 0x55, 0xF2, 0x0A]);
        chip8.run_cycles(4).unwrap();
        assert!(chip8.is_waiting_for_key());
        chip8.reset().unwrap();
        assert_eq!(chip8.cpu(), &Cpu::new());
        assert!(!chip8.is_waiting_for_key());
        assert_eq!(chip8.memory().read(0x301).unwrap(), 0x0);
        assert_eq!(chip8.memory().read_word(0x200).unwrap(), 0x6122);
    }
}
