use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_WIDTH};

// A row of pixels is exactly one u64, which is what makes rotation a horizontal wrap.
const _: () = assert!(DISPLAY_WIDTH == u64::BITS as usize);

/// # FrameBuffer
/// The logical contents of the 64x32 monochrome display.
///
/// Each row is stored as a single `u64` with column 0 in the most significant bit,
/// so a pixel is set when its bit is 1. Converting this into something that can be
/// shown on screen is left to whichever display consumes it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: [u64; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            rows: [0; DISPLAY_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    pub fn clear(&mut self) {
        self.rows = [0; DISPLAY_HEIGHT];
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| *row == 0)
    }

    /// Whether the pixel at (x, y) is set; coordinates wrap around the display
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let row = self.rows[y % DISPLAY_HEIGHT];
        (row >> (DISPLAY_WIDTH - 1 - x % DISPLAY_WIDTH)) & 1 == 1
    }

    /// The raw bits of row `y`, column 0 first
    pub fn row(&self, y: usize) -> u64 {
        self.rows[y % DISPLAY_HEIGHT]
    }

    /// Every pixel in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = bool> + '_ {
        (0..DISPLAY_HEIGHT).flat_map(move |y| (0..DISPLAY_WIDTH).map(move |x| self.pixel(x, y)))
    }

    /// XORs a sprite onto the display with its top left corner at (x, y).
    ///
    /// Each byte of `sprite` is one 8 pixel row, most significant bit leftmost.
    /// The starting position is taken modulo the display size and any part of the
    /// sprite that runs off an edge wraps around to the opposite one.
    ///
    /// Returns whether any pixel that was set got erased.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let x = (x % DISPLAY_WIDTH) as u32;
        let y = y % DISPLAY_HEIGHT;
        let mut collision = false;

        for (offset, byte) in sprite.iter().enumerate() {
            let row = &mut self.rows[(y + offset) % DISPLAY_HEIGHT];
            let bits = (u64::from(*byte) << (DISPLAY_WIDTH - SPRITE_WIDTH)).rotate_right(x);
            collision |= *row & bits != 0;
            *row ^= bits;
        }

        collision
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
