use crate::constants::KEY_COUNT;
use crate::error::{Error, Result};

/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// Tracks the pressed status of every key, and which register (if any) is
/// waiting on the next key press. Emulation halts while a register needs a key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed_keys: [bool; KEY_COUNT],
    register_needing_key: Option<usize>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys outside of 0..F are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed_keys
            .get(key as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Records the polled state of a physical key.
    pub fn update(&mut self, key: u8, pressed: bool) -> Result<()> {
        let slot = self
            .pressed_keys
            .get_mut(key as usize)
            .ok_or(Error::InvalidKey(key))?;
        *slot = pressed;
        Ok(())
    }

    /// Halts emulation until a key is delivered into `register`.
    pub fn begin_wait(&mut self, register: usize) {
        self.register_needing_key = Some(register);
    }

    pub fn is_waiting(&self) -> bool {
        self.register_needing_key.is_some()
    }

    /// Ends a wait, returning the register the key should be written to.
    /// Returns None if nothing was waiting on a key.
    pub fn deliver_key(&mut self, key: u8) -> Result<Option<usize>> {
        if key as usize >= KEY_COUNT {
            return Err(Error::InvalidKey(key));
        }
        Ok(self.register_needing_key.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_is_pressed() {
        let mut keypad = Keypad::new();
        keypad.update(0xE, true).unwrap();
        assert!(keypad.is_pressed(0xE));
        keypad.update(0xE, false).unwrap();
        assert!(!keypad.is_pressed(0xE));
    }

    #[test]
    fn test_off_pad_keys_never_pressed() {
        let keypad = Keypad::new();
        assert!(!keypad.is_pressed(0x10));
        assert!(!keypad.is_pressed(0xFF));
    }

    #[test]
    fn test_update_rejects_off_pad_key() {
        let mut keypad = Keypad::new();
        assert!(matches!(keypad.update(0x10, true), Err(Error::InvalidKey(0x10))));
    }

    #[test]
    fn test_captures_key_presses() {
        let mut keypad = Keypad::new();
        keypad.begin_wait(0x1);
        assert!(keypad.is_waiting());
        assert_eq!(keypad.deliver_key(0xE).unwrap(), Some(0x1));
        assert!(!keypad.is_waiting());
    }

    #[test]
    fn test_deliver_without_wait() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.deliver_key(0x3).unwrap(), None);
    }
}
