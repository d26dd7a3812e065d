use std::collections::VecDeque;
use std::io::Read;
use std::time::Duration;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{MAX_ROM_SIZE, MAX_SAVED_STATES, PROGRAM_START};
use crate::error::{Error, Result};
use crate::frame_buffer::FrameBuffer;
use crate::instruction;
use crate::keypad::Keypad;
use crate::operations::{Flow, Io};
use crate::state::{Mode, State};

/// What a single call to `Chip8::tick` accomplished
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// `opcode` was fetched and executed
    Executed { opcode: u16 },
    /// Suspended by `Fx0A` and no key has been pressed yet; nothing changed
    Waiting,
    /// A key press completed the pending `Fx0A`
    Resumed { key: u8 },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - the `keypad` with public interfaces for pressing and releasing keys
///  - the loaded `rom` so the machine can be reset
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - advancing its timers by elapsed wall-clock time
/// - inspecting its frame buffer for rendering by some display
/// - inspecting its sound timer for playback by some speaker
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    keypad: Keypad,
    rng: Box<dyn RngCore>,
    rom: Vec<u8>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a Chip-8 whose `Cxkk` draws its random bytes from `rng`
    pub fn with_rng(rng: impl RngCore + 'static) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
            keypad: Keypad::new(),
            rng: Box::new(rng),
            rom: Vec::new(),
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        // One byte past the limit is enough for load_bytes to reject it
        let mut rom = Vec::new();
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        self.load_bytes(&rom)
    }

    /// Copies `rom` into memory at 0x200 and resets the machine to run it
    pub fn load_bytes(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        debug!("loaded {} byte ROM", rom.len());
        self.rom = rom.to_vec();
        self.reset();
        Ok(())
    }

    /// Loads a ROM given as 16-bit words, each laid out in memory low byte first
    pub fn load_words(&mut self, words: &[u16]) -> Result<()> {
        let rom: Vec<u8> = words.iter().flat_map(|word| word.to_le_bytes()).collect();
        self.load_bytes(&rom)
    }

    /// Puts the machine back in its power-on state with the last loaded ROM in memory
    pub fn reset(&mut self) {
        let mut state = State::new();
        let start = usize::from(PROGRAM_START);
        state.memory[start..start + self.rom.len()].copy_from_slice(&self.rom);
        // Render the blank screen
        state.draw_flag = true;

        self.state = state;
        self.previous_states.clear();
        self.keypad.clear_presses();
    }

    /// Returns the FrameBuffer if the display should be redrawn, and marks it as drawn
    pub fn get_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// Advances the CPU by a single instruction
    /// - while awaiting a keypress, either completes the wait or does nothing
    /// - otherwise gets and executes the next opcode
    ///
    /// Any error is fatal: the state is left as it was before the failing
    /// instruction and the caller should stop ticking.
    pub fn tick(&mut self) -> Result<Tick> {
        if let Mode::WaitingForKey { register } = self.state.mode {
            return Ok(self.poll_key(register));
        }

        let opcode = self.state.fetch()?;
        trace!(
            "{:04X} pc{:03X} v{:02X?} i{:04X}",
            opcode,
            self.state.pc,
            self.state.v,
            self.state.i
        );

        let mut io = Io {
            keypad: &self.keypad,
            rng: self.rng.as_mut(),
        };
        let (mut next, flow) = instruction::execute(opcode, &self.state, &mut io)?;
        match flow {
            Flow::Next => next.pc += 0x2,
            Flow::Skip => next.pc += 0x4,
            Flow::Jump => {}
            Flow::WaitForKey(register) => {
                debug!("waiting for a key to store in v{:X}", register);
                next.mode = Mode::WaitingForKey { register };
                self.keypad.clear_presses();
            }
        }

        self.save_state();
        self.state = next;
        Ok(Tick::Executed { opcode })
    }

    /// Completes a pending `Fx0A` if a key has been pressed since it executed
    fn poll_key(&mut self, register: usize) -> Tick {
        match self.keypad.take_press() {
            None => Tick::Waiting,
            Some(key) => {
                debug!("got key {:X} for v{:X}", key, register);
                self.save_state();
                self.state.v[register] = key;
                self.state.pc += 0x2;
                self.state.mode = Mode::Running;
                Tick::Resumed { key }
            }
        }
    }

    /// Reverses the CPU by a single instruction if possible
    /// - if there are previous_states, pops the last one and restores it
    /// - key presses made before the rewind can't complete a restored `Fx0A`
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                debug!("rewound to pc {:03X}", state.pc);
                self.state = State {
                    draw_flag: true,
                    ..state
                };
                self.keypad.clear_presses();
                true
            }
            None => false,
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state);
    }

    /// Counts the delay and sound timers down by however many 60Hz periods fit in `elapsed`
    pub fn advance_timers(&mut self, elapsed: Duration) {
        self.state.timers.advance(elapsed);
    }

    /// Whether a tone should be playing
    pub fn is_beeping(&self) -> bool {
        self.state.timers.sound > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn sp(&self) -> u8 {
        self.state.sp
    }

    pub fn stack_top(&self) -> Option<u16> {
        self.state.stack_top()
    }

    /// The opcode the pc points at, i.e. the one the next tick will execute
    pub fn current_opcode(&self) -> Result<u16> {
        self.state.fetch()
    }

    /// # Panics
    /// If `index` isn't a register (0x0..=0xF)
    pub fn register(&self, index: usize) -> u8 {
        self.state.v[index]
    }

    pub fn i(&self) -> u16 {
        self.state.i
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound
    }

    pub fn memory(&self, address: usize) -> Option<u8> {
        self.state.memory.get(address).copied()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn width(&self) -> usize {
        self.state.frame_buffer.width()
    }

    pub fn height(&self) -> usize {
        self.state.frame_buffer.height()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
