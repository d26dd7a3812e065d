use std::ops::Range;

use crate::constants::{
    EMPTY_STACK, FONT_ADDRESS, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET,
    STACK_DEPTH,
};
use crate::error::{Error, Result};
use crate::frame_buffer::FrameBuffer;
use crate::timers::Timers;

/// Whether the CPU is fetching instructions or suspended by `Fx0A`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// Nothing is fetched until a key is pressed; it will be stored in V`register`
    WaitingForKey { register: usize },
}

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is also the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Pointer
/// - (sp) an 8-bit stack pointer, 0xFF while the stack is empty
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down at 60Hz
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - 0x200.. holds the ROM
/// - 64x32 bit frame buffer
///
/// ## Input
/// - Emulation halts in `Mode::WaitingForKey` until a key's value is written to some register
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub timers: Timers,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub mode: Mode,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_ADDRESS as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: EMPTY_STACK,
            stack: [0; STACK_DEPTH],
            timers: Timers::new(),
            memory,
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            mode: Mode::Running,
        }
    }

    /// Number of return addresses currently on the stack
    pub fn depth(&self) -> usize {
        usize::from(self.sp.wrapping_add(1))
    }

    /// The most recently pushed return address
    pub fn stack_top(&self) -> Option<u16> {
        if self.sp == EMPTY_STACK {
            None
        } else {
            Some(self.stack[usize::from(self.sp)])
        }
    }

    /// Pushes the current pc; fails without touching the stack if it is full
    pub fn push(&mut self) -> Result<()> {
        if self.depth() >= STACK_DEPTH {
            return Err(Error::StackOverflow { address: self.pc });
        }
        self.sp = self.sp.wrapping_add(1);
        self.stack[usize::from(self.sp)] = self.pc;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        let address = self
            .stack_top()
            .ok_or(Error::StackUnderflow { address: self.pc })?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(address)
    }

    /// Reads `len` bytes of memory starting at `start`
    pub fn read(&self, start: usize, len: usize) -> Result<&[u8]> {
        Ok(&self.memory[Self::bounds(start, len)?])
    }

    /// Writes `bytes` to memory starting at `start`; nothing is written if any of it would fall outside
    pub fn write(&mut self, start: usize, bytes: &[u8]) -> Result<()> {
        self.memory[Self::bounds(start, bytes.len())?].copy_from_slice(bytes);
        Ok(())
    }

    /// Gets the opcode currently pointed at by the pc.
    ///
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16> {
        let bytes = self.read(usize::from(self.pc), 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn bounds(start: usize, len: usize) -> Result<Range<usize>> {
        match start.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(start..end),
            _ => Err(Error::MemoryOutOfBounds { start, len }),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
