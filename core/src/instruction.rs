use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// Selects the correct Operation for a given Opcode.
///
/// The family picks the operation outright, except for families 0, 5, 8, 9, E and F
/// whose low nibble or byte narrows it down further. Returns `None` for bit patterns
/// that don't encode any instruction.
pub fn from_op(op: u16) -> Option<Operation> {
    let operation: Operation = match op.family() {
        0x0 => match op {
            0x00E0 => clr,
            0x00EE => rts,
            _ => return None,
        },
        0x1 => jump,
        0x2 => call,
        0x3 => ske,
        0x4 => skne,
        0x5 => match op.n() {
            0x0 => skre,
            _ => return None,
        },
        0x6 => load,
        0x7 => add,
        0x8 => match op.n() {
            0x0 => mv,
            0x1 => or,
            0x2 => and,
            0x3 => xor,
            0x4 => addr,
            0x5 => sub,
            0x6 => shr,
            0x7 => subn,
            0xE => shl,
            _ => return None,
        },
        0x9 => match op.n() {
            0x0 => skrne,
            _ => return None,
        },
        0xA => loadi,
        0xB => jumpi,
        0xC => rand,
        0xD => draw,
        0xE => match op.kk() {
            0x9E => skpr,
            0xA1 => skup,
            _ => return None,
        },
        0xF => match op.kk() {
            0x07 => moved,
            0x0A => keyd,
            0x15 => loads,
            0x18 => ld,
            0x1E => addi,
            0x29 => ldspr,
            0x33 => bcd,
            0x55 => stor,
            0x65 => read,
            _ => return None,
        },
        _ => return None,
    };
    Some(operation)
}

/// Decodes and applies `op` to `state`, which is left untouched.
pub fn execute(op: u16, state: &State, io: &mut Io) -> Result<(State, Flow)> {
    let operation = from_op(op).ok_or(Error::NotImplemented {
        opcode: op,
        address: state.pc,
    })?;
    operation(op, state, io)
}
