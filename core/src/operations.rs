use rand::{Rng, RngCore};

use crate::constants::{FONT_ADDRESS, GLYPH_SIZE};
use crate::error::Result;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::State;

/// What happens to the program counter after an operation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// The operation already set the pc
    Jump,
    /// Suspend until a key is pressed and store it in V`register`; the pc stays on this instruction
    WaitForKey(usize),
}

/// The next state and how to move on from it, or the fault that stopped the operation
pub type Outcome = Result<(State, Flow)>;

/// Whatever an operation can observe besides the machine's own state
pub struct Io<'a> {
    pub keypad: &'a Keypad,
    pub rng: &'a mut dyn RngCore,
}

/// An operation computes the next state from the current one; it never mutates the current state
pub type Operation = fn(op: u16, state: &State, io: &mut Io) -> Outcome;

fn skip_if(condition: bool) -> Flow {
    if condition {
        Flow::Skip
    } else {
        Flow::Next
    }
}

/// clear
pub fn clr(_op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut frame_buffer = state.frame_buffer;
    frame_buffer.clear();
    let state = State {
        frame_buffer,
        draw_flag: true,
        ..*state
    };
    Ok((state, Flow::Next))
}

/// PC = STACK.pop() + 2
/// The stack holds the address of the call itself, so step over it
pub fn rts(_op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut state = *state;
    state.pc = state.pop()? + 0x2;
    Ok((state, Flow::Jump))
}

/// PC = addr
pub fn jump(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let state = State {
        pc: op.addr(),
        ..*state
    };
    Ok((state, Flow::Jump))
}

/// STACK.push(PC); PC = addr
pub fn call(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut state = *state;
    state.push()?;
    state.pc = op.addr();
    Ok((state, Flow::Jump))
}

/// if Vx == kk then skip
pub fn ske(op: u16, state: &State, _io: &mut Io) -> Outcome {
    Ok((*state, skip_if(state.v[op.x()] == op.kk())))
}

/// if Vx != kk then skip
pub fn skne(op: u16, state: &State, _io: &mut Io) -> Outcome {
    Ok((*state, skip_if(state.v[op.x()] != op.kk())))
}

/// if Vx == Vy then skip
pub fn skre(op: u16, state: &State, _io: &mut Io) -> Outcome {
    Ok((*state, skip_if(state.v[op.x()] == state.v[op.y()])))
}

/// Vx = kk
pub fn load(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut v = state.v;
    v[op.x()] = op.kk();
    Ok((State { v, ..*state }, Flow::Next))
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut v = state.v;
    v[op.x()] = v[op.x()].wrapping_add(op.kk());
    Ok((State { v, ..*state }, Flow::Next))
}

/// Vx = Vy
pub fn mv(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut v = state.v;
    v[op.x()] = v[op.y()];
    Ok((State { v, ..*state }, Flow::Next))
}

/// Vx |= Vy
pub fn or(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut v = state.v;
    v[op.x()] |= v[op.y()];
    Ok((State { v, ..*state }, Flow::Next))
}

/// Vx &= Vy
pub fn and(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut v = state.v;
    v[op.x()] &= v[op.y()];
    Ok((State { v, ..*state }, Flow::Next))
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut v = state.v;
    v[op.x()] ^= v[op.y()];
    Ok((State { v, ..*state }, Flow::Next))
}

// The flag operations below write VF last so that the flag wins when x is F.

/// Vx += Vy; VF = overflow
pub fn addr(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let (res, over) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    let mut v = state.v;
    v[op.x()] = res;
    v[0xF] = u8::from(over);
    Ok((State { v, ..*state }, Flow::Next))
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let (res, under) = state.v[op.x()].overflowing_sub(state.v[op.y()]);
    let mut v = state.v;
    v[op.x()] = res;
    v[0xF] = u8::from(!under);
    Ok((State { v, ..*state }, Flow::Next))
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let vx = state.v[op.x()];
    let mut v = state.v;
    v[op.x()] = vx >> 1;
    v[0xF] = vx & 0x1;
    Ok((State { v, ..*state }, Flow::Next))
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let (res, under) = state.v[op.y()].overflowing_sub(state.v[op.x()]);
    let mut v = state.v;
    v[op.x()] = res;
    v[0xF] = u8::from(!under);
    Ok((State { v, ..*state }, Flow::Next))
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let vx = state.v[op.x()];
    let mut v = state.v;
    v[op.x()] = vx << 1;
    v[0xF] = vx >> 7;
    Ok((State { v, ..*state }, Flow::Next))
}

/// if Vx != Vy then skip
pub fn skrne(op: u16, state: &State, _io: &mut Io) -> Outcome {
    Ok((*state, skip_if(state.v[op.x()] != state.v[op.y()])))
}

/// I = addr
pub fn loadi(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let state = State {
        i: op.addr(),
        ..*state
    };
    Ok((state, Flow::Next))
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let state = State {
        pc: u16::from(state.v[0x0]) + op.addr(),
        ..*state
    };
    Ok((state, Flow::Jump))
}

/// Vx = rand_byte & kk
pub fn rand(op: u16, state: &State, io: &mut Io) -> Outcome {
    let rand_byte: u8 = io.rng.gen();
    let mut v = state.v;
    v[op.x()] = rand_byte & op.kk();
    Ok((State { v, ..*state }, Flow::Next))
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased and clears it otherwise
pub fn draw(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let sprite = state.read(usize::from(state.i), usize::from(op.n()))?;
    let mut frame_buffer = state.frame_buffer;
    let collision = frame_buffer.draw_sprite(
        usize::from(state.v[op.x()]),
        usize::from(state.v[op.y()]),
        sprite,
    );

    let mut v = state.v;
    v[0xF] = u8::from(collision);
    let state = State {
        v,
        frame_buffer,
        draw_flag: true,
        ..*state
    };
    Ok((state, Flow::Next))
}

/// if Vx.pressed then skip
pub fn skpr(op: u16, state: &State, io: &mut Io) -> Outcome {
    Ok((*state, skip_if(io.keypad.is_pressed(state.v[op.x()]))))
}

/// if !Vx.pressed then skip
pub fn skup(op: u16, state: &State, io: &mut Io) -> Outcome {
    Ok((*state, skip_if(!io.keypad.is_pressed(state.v[op.x()]))))
}

/// Vx = DT
pub fn moved(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut v = state.v;
    v[op.x()] = state.timers.delay;
    Ok((State { v, ..*state }, Flow::Next))
}

/// await keypress for Vx
pub fn keyd(op: u16, state: &State, _io: &mut Io) -> Outcome {
    Ok((*state, Flow::WaitForKey(op.x())))
}

/// DT = Vx
pub fn loads(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut state = *state;
    state.timers.delay = state.v[op.x()];
    Ok((state, Flow::Next))
}

/// ST = Vx
pub fn ld(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut state = *state;
    state.timers.sound = state.v[op.x()];
    Ok((state, Flow::Next))
}

/// I += Vx
pub fn addi(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let state = State {
        i: state.i.wrapping_add(u16::from(state.v[op.x()])),
        ..*state
    };
    Ok((state, Flow::Next))
}

/// I = address of the glyph for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let digit = u16::from(state.v[op.x()] & 0xF);
    let state = State {
        i: FONT_ADDRESS + digit * GLYPH_SIZE,
        ..*state
    };
    Ok((state, Flow::Next))
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let vx = state.v[op.x()];
    let mut state = *state;
    state.write(usize::from(state.i), &[vx / 100, vx / 10 % 10, vx % 10])?;
    Ok((state, Flow::Next))
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let mut next = *state;
    next.write(usize::from(state.i), &state.v[..=op.x()])?;
    Ok((next, Flow::Next))
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &State, _io: &mut Io) -> Outcome {
    let bytes = state.read(usize::from(state.i), op.x() + 1)?;
    let mut v = state.v;
    v[..=op.x()].copy_from_slice(bytes);
    Ok((State { v, ..*state }, Flow::Next))
}
