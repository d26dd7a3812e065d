use log::debug;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{TextureValueError, WindowCanvas};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use chip8_core::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Bytes per pixel in an RGB24 texture
const CHANNELS: usize = 3;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl2: {0}")]
    Sdl(String),

    #[error(transparent)]
    Window(#[from] WindowBuildError),

    #[error(transparent)]
    Canvas(#[from] IntegerOrSdlError),

    #[error(transparent)]
    Texture(#[from] TextureValueError),

    #[error("a {0}x scaled window is too large")]
    Scale(usize),
}

impl From<String> for DisplayError {
    fn from(message: String) -> Self {
        DisplayError::Sdl(message)
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The Chip-8 hands over its FrameBuffer, one bit per pixel, whenever it changes;
/// the display only gets a call to `render` then.
pub struct Display {
    canvas: WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: usize) -> Result<Self, DisplayError> {
        let (window_width, window_height) = Display::window_size(scale)?;
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window("Chip-8", window_width, window_height)
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;
        debug!("opened {}x{} window", window_width, window_height);

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Window dimensions in screen pixels for a given `scale`
    fn window_size(scale: usize) -> Result<(u32, u32), DisplayError> {
        let side = |pixels: usize| {
            pixels
                .checked_mul(scale)
                .and_then(|size| u32::try_from(size).ok())
                .ok_or(DisplayError::Scale(scale))
        };
        Ok((side(DISPLAY_WIDTH)?, side(DISPLAY_HEIGHT)?))
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Walking the frame buffer's pixels row by row
    /// - Triplicating each pixel to represent its RGB values
    /// - Mapping set pixels to full 255 intensity and unset ones to 0
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .pixels()
            .map(|lit| if lit { 0xFF } else { 0x00 })
            .flat_map(|intensity| std::iter::repeat(intensity).take(CHANNELS))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            self.width as u32,
            self.height as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        let row_size = self.width * CHANNELS;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // Rows may be padded out to `pitch` bytes
            for (y, row) in pixels.chunks(row_size).enumerate() {
                buffer[y * pitch..y * pitch + row_size].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
