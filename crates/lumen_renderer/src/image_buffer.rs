//! Output images.
//!
//! The renderer writes unclamped colors into an [`ImageSink`]; clamping and
//! encoding happen here, at the boundary.

use std::path::Path;

use lumen_math::{Color, Interval};

/// Destination for rendered pixels.
pub trait ImageSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Store the final color of pixel (x, y). Called once per pixel.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Convert a color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f32| (255.0 * Interval::UNIT.clamp(c)).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Encode the image to `path`. The format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}

impl ImageSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }
}
