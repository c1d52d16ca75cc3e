use rand::Rng;

use crate::constants::{FONT_BASE, FONT_GLYPH_SIZE};
use crate::error::Result;
use crate::state::State;

// Every operation runs after the pc has been moved past its own instruction,
// so skips add 2 to it and jumps overwrite it.

/// clear
pub fn cls(state: &mut State) -> Result<()> {
    state.display.clear();
    Ok(())
}

/// PC = STACK.pop()
pub fn ret(state: &mut State) -> Result<()> {
    state.cpu.ret()
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) -> Result<()> {
    state.cpu.pc = addr;
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<()> {
    state.cpu.call(addr)
}

/// if Vx == kk then pc += 2
pub fn skip_eq_imm(state: &mut State, x: usize, kk: u8) -> Result<()> {
    if state.cpu.v[x] == kk {
        state.cpu.skip();
    }
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skip_neq_imm(state: &mut State, x: usize, kk: u8) -> Result<()> {
    if state.cpu.v[x] != kk {
        state.cpu.skip();
    }
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skip_eq_reg(state: &mut State, x: usize, y: usize) -> Result<()> {
    if state.cpu.v[x] == state.cpu.v[y] {
        state.cpu.skip();
    }
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skip_neq_reg(state: &mut State, x: usize, y: usize) -> Result<()> {
    if state.cpu.v[x] != state.cpu.v[y] {
        state.cpu.skip();
    }
    Ok(())
}

/// Vx = kk
pub fn load_imm(state: &mut State, x: usize, kk: u8) -> Result<()> {
    state.cpu.v[x] = kk;
    Ok(())
}

/// Vx += kk
/// Wraps on overflow and leaves VF alone
pub fn add_imm(state: &mut State, x: usize, kk: u8) -> Result<()> {
    state.cpu.v[x] = state.cpu.v[x].wrapping_add(kk);
    Ok(())
}

/// Vx = Vy
pub fn load_reg(state: &mut State, x: usize, y: usize) -> Result<()> {
    state.cpu.v[x] = state.cpu.v[y];
    Ok(())
}

/// Vx |= Vy
pub fn or(state: &mut State, x: usize, y: usize) -> Result<()> {
    state.cpu.v[x] |= state.cpu.v[y];
    Ok(())
}

/// Vx &= Vy
pub fn and(state: &mut State, x: usize, y: usize) -> Result<()> {
    state.cpu.v[x] &= state.cpu.v[y];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: usize, y: usize) -> Result<()> {
    state.cpu.v[x] ^= state.cpu.v[y];
    Ok(())
}

// The flag is written before the result for the arithmetic below, so when x
// is VF the result wins.

/// Vx += Vy; VF = carry
pub fn add_reg(state: &mut State, x: usize, y: usize) -> Result<()> {
    let sum = u16::from(state.cpu.v[x]) + u16::from(state.cpu.v[y]);
    state.cpu.set_flag(sum > 0xFF);
    state.cpu.v[x] = (sum & 0xFF) as u8;
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: usize, y: usize) -> Result<()> {
    let (vx, vy) = (state.cpu.v[x], state.cpu.v[y]);
    state.cpu.set_flag(vx > vy);
    state.cpu.v[x] = vx.wrapping_sub(vy);
    Ok(())
}

/// Vx >>= 1; VF = lsb
pub fn shr(state: &mut State, x: usize) -> Result<()> {
    let vx = state.cpu.v[x];
    state.cpu.set_flag(vx & 0x1 == 0x1);
    state.cpu.v[x] = vx >> 1;
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: usize, y: usize) -> Result<()> {
    let (vx, vy) = (state.cpu.v[x], state.cpu.v[y]);
    state.cpu.set_flag(vy > vx);
    state.cpu.v[x] = vy.wrapping_sub(vx);
    Ok(())
}

/// Vx <<= 1; VF = msb
pub fn shl(state: &mut State, x: usize) -> Result<()> {
    let vx = state.cpu.v[x];
    state.cpu.set_flag(vx & 0x80 == 0x80);
    state.cpu.v[x] = vx << 1;
    Ok(())
}

/// I = addr
pub fn load_index(state: &mut State, addr: u16) -> Result<()> {
    state.cpu.i = addr;
    Ok(())
}

/// PC = V0 + addr
pub fn jump_offset(state: &mut State, addr: u16) -> Result<()> {
    state.cpu.pc = addr.wrapping_add(u16::from(state.cpu.v[0x0]));
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand<R: Rng>(state: &mut State, x: usize, kk: u8, rng: &mut R) -> Result<()> {
    let rand_byte: u8 = rng.gen();
    state.cpu.v[x] = rand_byte & kk;
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n byte sprite at mem[I..I+n] onto the display at Vx, Vy with wrapping.
/// VF = 1 if any pixel was erased
pub fn draw(state: &mut State, x: usize, y: usize, n: u8) -> Result<()> {
    // the whole sprite is fetched first so a bad read leaves VF and the display alone
    let sprite = state.memory.slice(state.cpu.i as usize, n as usize)?;
    // read the coordinates before VF is reset in case either of them is VF
    let (vx, vy) = (state.cpu.v[x] as usize, state.cpu.v[y] as usize);
    state.cpu.set_flag(false);

    let mut collided = false;
    for (row, &byte) in sprite.iter().enumerate() {
        collided |= state.display.draw_sprite(vx, vy + row, byte);
    }
    state.cpu.set_flag(collided);
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skip_key_pressed(state: &mut State, x: usize) -> Result<()> {
    if state.keypad.is_pressed(state.cpu.v[x]) {
        state.cpu.skip();
    }
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skip_key_not_pressed(state: &mut State, x: usize) -> Result<()> {
    if !state.keypad.is_pressed(state.cpu.v[x]) {
        state.cpu.skip();
    }
    Ok(())
}

/// Vx = DT
pub fn load_delay(state: &mut State, x: usize) -> Result<()> {
    state.cpu.v[x] = state.cpu.delay_timer;
    Ok(())
}

/// await keypress for Vx
pub fn wait_key(state: &mut State, x: usize) -> Result<()> {
    state.keypad.begin_wait(x);
    Ok(())
}

/// DT = Vx
pub fn set_delay(state: &mut State, x: usize) -> Result<()> {
    state.cpu.delay_timer = state.cpu.v[x];
    Ok(())
}

/// ST = Vx
pub fn set_sound(state: &mut State, x: usize) -> Result<()> {
    state.cpu.sound_timer = state.cpu.v[x];
    Ok(())
}

/// I += Vx
pub fn add_index(state: &mut State, x: usize) -> Result<()> {
    state.cpu.i = state.cpu.i.wrapping_add(u16::from(state.cpu.v[x]));
    Ok(())
}

/// I = address of the font sprite for the low nibble of Vx
/// See constants::SPRITE_SHEET for the sprites themselves
pub fn load_font(state: &mut State, x: usize) -> Result<()> {
    let digit = u16::from(state.cpu.v[x] & 0x0F);
    state.cpu.i = FONT_BASE + digit * FONT_GLYPH_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
pub fn store_bcd(state: &mut State, x: usize) -> Result<()> {
    let vx = state.cpu.v[x];
    let bcd = [vx / 100, vx / 10 % 10, vx % 10];
    state
        .memory
        .slice_mut(state.cpu.i as usize, bcd.len())?
        .copy_from_slice(&bcd);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn store_regs(state: &mut State, x: usize) -> Result<()> {
    state
        .memory
        .slice_mut(state.cpu.i as usize, x + 1)?
        .copy_from_slice(&state.cpu.v[..=x]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn load_regs(state: &mut State, x: usize) -> Result<()> {
    let bytes = state.memory.slice(state.cpu.i as usize, x + 1)?;
    state.cpu.v[..=x].copy_from_slice(bytes);
    Ok(())
}
