use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_WIDTH};

/// The FrameBuffer is indexed as [y][x]; each pixel is 0 (off) or 1 (on).
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Sprites are XORed onto the frame buffer and wrap around both edges.
/// `draw_flag` is raised whenever the frame buffer changes so a renderer only
/// has to redraw when something happened.
#[derive(Clone, Debug)]
pub struct Display {
    frame_buffer: FrameBuffer,
    draw_flag: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    /// XORs one 8 pixel row of a sprite onto the frame buffer, most significant bit first.
    /// Column `x + bit` and row `y` both wrap around the edges of the display.
    ///
    /// Returns true if any pixel was switched from on to off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, row: u8) -> bool {
        let y = y % DISPLAY_HEIGHT;
        let mut erased = false;
        for bit in 0..SPRITE_WIDTH {
            let x = (x + bit) % DISPLAY_WIDTH;
            let pixel = (row >> (SPRITE_WIDTH - 1 - bit)) & 1;
            let pixel_before = self.frame_buffer[y][x];
            self.frame_buffer[y][x] ^= pixel;
            erased |= pixel_before == 1 && self.frame_buffer[y][x] == 0;
        }
        self.draw_flag = true;
        erased
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame_buffer[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn needs_redraw(&self) -> bool {
        self.draw_flag
    }

    /// Returns a copy of the FrameBuffer if the display should be redrawn and lowers the draw flag.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.draw_flag {
            self.draw_flag = false;
            Some(self.frame_buffer)
        } else {
            None
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
