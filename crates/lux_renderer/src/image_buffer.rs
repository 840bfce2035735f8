//! Image buffer and writers.
//!
//! Pixels hold clamped linear color. Writers apply gamma 2.2 and quantize
//! to 8 bits.

use crate::error::RenderResult;
use crate::Color;
use lux_math::Interval;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Display gamma applied on output.
pub const GAMMA: f64 = 2.2;

/// Convert a linear channel value to a gamma-corrected byte.
#[inline]
pub fn to_gamma_u8(linear: f64) -> u8 {
    (Interval::UNIT.clamp(linear).powf(1.0 / GAMMA) * 255.0 + 0.5) as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        to_gamma_u8(color.x),
        to_gamma_u8(color.y),
        to_gamma_u8(color.z),
    ]
}

/// Rendered image, rows stored top to bottom.
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
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y), y = 0 being the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = color;
    }

    /// Convert to packed RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb(*c)).collect()
    }

    /// Write the image as a plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> RenderResult<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for row in self.pixels.chunks(self.width.max(1) as usize) {
            for color in row {
                let [r, g, b] = color_to_rgb(*color);
                writeln!(writer, "{} {} {}", r, g, b)?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Save as a plain-text PPM file.
    pub fn save_ppm(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_ppm(&mut writer)
    }

    /// Save as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        image::save_buffer(
            path.as_ref(),
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        Ok(())
    }

    /// Save choosing the format from the extension: `.png` gives PNG,
    /// anything else plain PPM.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

        if is_png {
            self.save_png(path)
        } else {
            self.save_ppm(path)
        }
    }
}
