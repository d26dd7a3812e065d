use std::time::Duration;

/// Bytes of addressable memory (0x000..=0xFFF)
pub const MEMORY_SIZE: usize = 0x1000;

/// Where ROMs are loaded into memory and where the program counter starts
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const REGISTER_COUNT: usize = 16;

/// Maximum subroutine nesting
pub const STACK_DEPTH: usize = 16;

/// The stack pointer's value when nothing has been pushed
pub const EMPTY_STACK: u8 = 0xFF;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Every sprite row is a single byte
pub const SPRITE_WIDTH: usize = 8;

/// 0x000 - 0x050 is reserved for the sprite sheet
pub const FONT_ADDRESS: u16 = 0x000;

/// Bytes per glyph in the sprite sheet
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite sheet
/// The built-in hexadecimal font, one 5-byte glyph per digit 0..F.
/// Only the high nibble of each row is drawn.
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
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

/// The delay and sound timers count down at 60Hz regardless of the CPU's speed
pub const TIMER_FREQUENCY: u32 = 60;
pub const TIMER_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TIMER_FREQUENCY as u64);

/// Default number of instructions executed per second
pub const CLOCK_SPEED: u32 = 500;

/// How many past states are kept around for rewinding (about 4 seconds at `CLOCK_SPEED`)
pub const MAX_SAVED_STATES: usize = 2000;
