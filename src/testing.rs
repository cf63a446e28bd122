//! A deterministic font backend that needs no font files.
//!
//! Every character is a solid block of the same size, which makes layout and
//! pixel output predictable on any host. Useful for golden-image tests.

use image::{GenericImage, Rgba};

use crate::error::FontLoadError;
use crate::font::{FontBackend, FontHandle};
use crate::style::{FontRef, Rgb};

#[derive(Debug, Clone)]
pub struct FixedAdvanceBackend {
    advance: u32,
    line_height: u32,
}

impl FixedAdvanceBackend {
    /// Each character is `advance` pixels wide; every non-empty line is `line_height` tall.
    pub fn new(advance: u32, line_height: u32) -> Self {
        Self { advance, line_height }
    }
}

impl FontBackend for FixedAdvanceBackend {
    /// Only paths whose file name starts with `block` are accepted.
    fn load(&mut self, font: &FontRef, size: u32) -> Result<FontHandle, FontLoadError> {
        let FontRef::Path(path) = font else {
            return Err(FontLoadError::EmptyReference);
        };

        let name = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or_default();
        if name.starts_with("block") {
            Ok(FontHandle::named(name, size))
        } else {
            Err(FontLoadError::InvalidFont { path: path.clone() })
        }
    }

    fn measure(&mut self, _font: &FontHandle, text: &str) -> (u32, u32) {
        if text.is_empty() {
            return (0, 0);
        }

        (text.chars().count() as u32 * self.advance, self.line_height)
    }

    fn draw_line<I: GenericImage<Pixel = Rgba<u8>>>(
        &mut self,
        _font: &FontHandle,
        image: &mut I,
        text: &str,
        x: i64,
        y: i64,
        color: Rgb,
    ) {
        let (width, height) = image.dimensions();
        let pixel = color.to_rgba();

        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }

            let left = x + i as i64 * self.advance as i64;
            let top = y;

            for py in top.max(0)..(top + self.line_height as i64).min(height as i64) {
                for px in left.max(0)..(left + self.advance as i64).min(width as i64) {
                    image.put_pixel(px as u32, py as u32, pixel);
                }
            }
        }
    }
}
