//! Explicit figure lifecycle: create a canvas, draw into it, save, release.
//!
//! Each plot operation owns its own [`Canvas`] for the duration of one chart, so
//! no rendering state can leak between charts. The pixels live in an in-memory
//! RGB buffer; nothing touches the output path until [`Canvas::save`], which
//! consumes the canvas, so a failed draw never leaves a partial artifact.

use crate::Result;

use anyhow::{Context, anyhow};
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct Canvas {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![255u8; width as usize * height as usize * 3],
        }
    }

    /// Acquire the drawing area for this canvas, filled with the background.
    ///
    /// The area borrows the pixel buffer; drop it (end the drawing scope)
    /// before calling [`Canvas::save`].
    pub fn drawing_area(&mut self) -> Result<DrawingArea<BitMapBackend<'_>, Shift>> {
        let area = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
            .into_drawing_area();
        area.fill(&WHITE)
            .map_err(|err| anyhow!("background fill error: {:?}", err))?;
        Ok(area)
    }

    /// Encode the buffer as PNG and write it, overwriting any existing file.
    pub fn save(self, path: &Path) -> Result<()> {
        let image = RgbImage::from_raw(self.width, self.height, self.buffer)
            .ok_or_else(|| anyhow!("image buffer conversion failed"))?;

        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        DynamicImage::ImageRgb8(image)
            .write_to(&mut writer, ImageFormat::Png)
            .with_context(|| format!("encode {}", path.display()))?;
        Ok(())
    }
}
