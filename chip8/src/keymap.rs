use sdl2::keyboard::Scancode;

use chip8_core::Keymap;

/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The COSMAC VIP hex layout is mapped to the left 4 alphanumeric columns.
/// Scancodes are used so the keys stay in place on non-QWERTY keyboards.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub const LAYOUT: [Scancode; 16] = [
    Scancode::X,    // 0
    Scancode::Num1, // 1
    Scancode::Num2, // 2
    Scancode::Num3, // 3
    Scancode::Q,    // 4
    Scancode::W,    // 5
    Scancode::E,    // 6
    Scancode::A,    // 7
    Scancode::S,    // 8
    Scancode::D,    // 9
    Scancode::Z,    // A
    Scancode::C,    // B
    Scancode::Num4, // C
    Scancode::R,    // D
    Scancode::F,    // E
    Scancode::V,    // F
];

pub fn keymap() -> Keymap<Scancode> {
    Keymap::new(LAYOUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_is_bound_once() {
        let keymap = keymap();
        for key in 0x0..=0xF {
            let scancode = keymap.host_key(key).unwrap();
            assert_eq!(keymap.key(scancode), Some(key));
        }
    }

    #[test]
    fn test_corners() {
        let keymap = keymap();
        assert_eq!(keymap.key(Scancode::Num1), Some(0x1));
        assert_eq!(keymap.key(Scancode::Num4), Some(0xC));
        assert_eq!(keymap.key(Scancode::Z), Some(0xA));
        assert_eq!(keymap.key(Scancode::V), Some(0xF));
        assert_eq!(keymap.key(Scancode::Space), None);
    }
}
