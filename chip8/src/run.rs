use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use chip8_core::Chip8;
use chip8_display::Display;

use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut chip8: Chip8 = Chip8::new();

    // Load ROM
    let file = File::open(&args.rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;
    info!("successfully loaded {}", args.rom.display());

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()?;
    let mut display: Display = Display::new(&sdl, args.scale as usize)?;
    let mut events = sdl.event_pump()?;
    let keymap = keymap();

    // Set initial timing
    let cycle_time: Duration = Duration::from_secs(1) / args.clock_hz;
    let mut last_cycle: Instant = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward: bool = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind: bool = false;
    // Stands in for a speaker
    let mut beeping: bool = false;

    'event: loop {
        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.get_frame() {
            display.render(&frame)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    scancode: Some(code),
                    repeat: false,
                    ..
                } => match (code, keymap.key(code)) {
                    (_, Some(key)) => chip8.key_press(key),
                    (Scancode::Space, _) => fast_forward = true,
                    (Scancode::Escape, _) => rewind = true,
                    (Scancode::Backspace, _) => {
                        info!("reset");
                        chip8.reset();
                    }
                    _ => continue,
                },
                Event::KeyUp {
                    scancode: Some(code),
                    ..
                } => match (code, keymap.key(code)) {
                    (_, Some(key)) => chip8.key_release(key),
                    (Scancode::Space, _) => fast_forward = false,
                    (Scancode::Escape, _) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Timers run off the wall clock, not off how many instructions ran
        let current_time = Instant::now();
        let elapsed = current_time - last_cycle;
        last_cycle = current_time;

        // Update state
        if rewind {
            if !chip8.rewind() {
                debug!("nothing left to rewind");
            }
        } else {
            chip8.advance_timers(elapsed);
            if let Err(e) = chip8.tick() {
                error!("stopping at pc {:#05X}: {}", chip8.pc(), e);
                return Err(e.into());
            }
        }

        if chip8.is_beeping() != beeping {
            beeping = chip8.is_beeping();
            debug!("sound {}", if beeping { "on" } else { "off" });
        }

        // Handle timing
        let busy = last_cycle.elapsed();
        if !fast_forward && cycle_time > busy {
            std::thread::sleep(cycle_time - busy);
        }
    }

    Ok(())
}
