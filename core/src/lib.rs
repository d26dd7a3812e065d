pub use chip8::{Chip8, Tick};
pub use constants::{CLOCK_SPEED, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use error::{Error, Result};
pub use frame_buffer::FrameBuffer;
pub use keymap::Keymap;
pub use keypad::Keypad;
pub use state::{Mode, State};
pub use timers::Timers;

mod chip8;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
mod keymap;
mod keypad;
mod opcode;
mod operations;
pub mod state;
mod timers;
