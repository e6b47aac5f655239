use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{ChromergeError, ChromergeResult};

/// One rendered frame: opaque RGBA8, row-major, top-left origin.
///
/// Frames are never modified once built; sequences share repeated frames behind `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameRGBA {
    /// Wrap an RGBA8 buffer, checking its length against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> ChromergeResult<Self> {
        let expected = Canvas { width, height }.rgba_len();
        if data.len() != expected {
            return Err(ChromergeError::validation(format!(
                "frame data length {} does not match {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Color at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some(Rgb8::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Write the frame as a PNG, creating the parent directory if needed.
    pub fn save_png(&self, path: &Path) -> ChromergeResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| ChromergeError::render(format!("write png '{}': {e}", path.display())))
    }
}

/// Mutable pixel buffer used while a frame is being composed.
pub(crate) struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub(crate) fn filled(canvas: Canvas, color: Rgb8) -> Self {
        let px = color.to_rgba();
        let mut data = Vec::with_capacity(canvas.rgba_len());
        for _ in 0..(canvas.width as usize) * (canvas.height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    pub(crate) fn put(&mut self, x: u32, y: u32, color: Rgb8) {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[i..i + 4].copy_from_slice(&color.to_rgba());
    }

    pub(crate) fn finish(self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.data,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
