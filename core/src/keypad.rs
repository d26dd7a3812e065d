/// # Keypad
/// The 16 keys of the hexadecimal keypad (0x0..0xF).
///
/// Besides whether each key is currently held, the keypad remembers which keys went
/// down since `clear_presses` was last called. Waiting for a key only resolves on one
/// of those fresh presses, so a key that was already held does not count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    held: u16,
    presses: u16,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as held; keys outside 0x0..=0xF are ignored
    pub fn press(&mut self, key: u8) {
        if let Some(bit) = Self::bit(key) {
            if self.held & bit == 0 {
                self.presses |= bit;
            }
            self.held |= bit;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(bit) = Self::bit(key) {
            self.held &= !bit;
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        Self::bit(key).map_or(false, |bit| self.held & bit != 0)
    }

    /// Forgets every press seen so far without touching which keys are held
    pub fn clear_presses(&mut self) {
        self.presses = 0;
    }

    /// Takes the lowest numbered key pressed since the last `clear_presses`
    pub fn take_press(&mut self) -> Option<u8> {
        if self.presses == 0 {
            return None;
        }
        let key = self.presses.trailing_zeros() as u8;
        self.presses &= !(1 << key);
        Some(key)
    }

    fn bit(key: u8) -> Option<u16> {
        if key < 16 {
            Some(1 << key)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xE);
        assert!(keypad.is_pressed(0xE));
        assert!(!keypad.is_pressed(0x1));
        keypad.release(0xE);
        assert!(!keypad.is_pressed(0xE));
    }

    #[test]
    fn test_ignores_keys_out_of_range() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        assert_eq!(keypad, Keypad::new());
        assert!(!keypad.is_pressed(0x10));
    }

    #[test]
    fn test_takes_lowest_press_first() {
        let mut keypad = Keypad::new();
        keypad.press(0x9);
        keypad.press(0x3);
        assert_eq!(keypad.take_press(), Some(0x3));
        assert_eq!(keypad.take_press(), Some(0x9));
        assert_eq!(keypad.take_press(), None);
    }

    #[test]
    fn test_held_key_is_not_a_new_press() {
        let mut keypad = Keypad::new();
        keypad.press(0x5);
        keypad.clear_presses();
        keypad.press(0x5);
        assert_eq!(keypad.take_press(), None);
        assert!(keypad.is_pressed(0x5));

        keypad.release(0x5);
        keypad.press(0x5);
        assert_eq!(keypad.take_press(), Some(0x5));
    }

    #[test]
    fn test_press_survives_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xA);
        keypad.release(0xA);
        assert_eq!(keypad.take_press(), Some(0xA));
    }
}
