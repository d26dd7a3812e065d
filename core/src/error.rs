use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop the Chip-8.
///
/// Faults raised while executing an instruction leave the machine exactly as
/// it was before that instruction; the host is expected to stop ticking.
#[derive(Debug, Error)]
pub enum Error {
    #[error("stack overflow: call at {address:#05X} would nest deeper than 16 subroutines")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return at {address:#05X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("opcode {opcode:#06X} at {address:#05X} is not implemented")]
    NotImplemented { opcode: u16, address: u16 },

    #[error("memory access of {len} byte(s) at {start:#05X} is outside of 0x000..=0xFFF")]
    MemoryOutOfBounds { start: usize, len: usize },

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

