use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::align::DrawInstruction;
use crate::error::Result;
use crate::font::{FontBackend, FontHandle};
use crate::style::Rgb;

/// A pixel buffer that text gets painted onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// A `width`×`height` canvas filled with `background`. Either side may be zero.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, background.to_rgba()) }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Write the canvas to `path`. The format comes from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        // The background is opaque, so nothing is lost by dropping alpha, and
        // formats without an alpha channel (JPEG) can be written too.
        let rgb = DynamicImage::ImageRgba8(self.image.clone()).into_rgb8();
        rgb.save(path)?;

        log::debug!("saved {}x{} canvas to {}", rgb.width(), rgb.height(), path.display());
        Ok(())
    }
}

/// Paint every instruction, in order, onto a fresh canvas.
pub fn rasterize<B: FontBackend>(
    backend: &mut B,
    font: &FontHandle,
    canvas_size: (u32, u32),
    background: Rgb,
    instructions: &[DrawInstruction],
    text_color: Rgb,
) -> Canvas {
    let (width, height) = canvas_size;
    let mut canvas = Canvas::new(width, height, background);

    for instruction in instructions {
        backend.draw_line(
            font,
            canvas.image_mut(),
            &instruction.text,
            instruction.x,
            instruction.y,
            text_color,
        );
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedAdvanceBackend;
    use image::Rgba;

    const RED: Rgb = Rgb(255, 0, 0);

    fn instruction(text: &str, x: i64, y: i64) -> DrawInstruction {
        DrawInstruction { text: text.to_string(), x, y }
    }

    #[test]
    fn background_fills_the_canvas() {
        let canvas = Canvas::new(4, 3, Rgb(1, 2, 3));
        assert_eq!(canvas.dimensions(), (4, 3));
        assert!(canvas.image().pixels().all(|p| *p == Rgba([1, 2, 3, 255])));
    }

    #[test]
    fn zero_sized_canvas_is_fine() {
        let mut backend = FixedAdvanceBackend::new(5, 5);
        let font = FontHandle::fallback(20);
        let canvas =
            rasterize(&mut backend, &font, (0, 0), Rgb::WHITE, &[instruction("a", 0, 0)], RED);
        assert_eq!(canvas.dimensions(), (0, 0));
    }

    #[test]
    fn paints_lines_at_their_origins() {
        let mut backend = FixedAdvanceBackend::new(2, 2);
        let font = FontHandle::fallback(20);
        let canvas = rasterize(
            &mut backend,
            &font,
            (10, 10),
            Rgb::WHITE,
            &[instruction("a b", 1, 1), instruction("c", 6, 6)],
            RED,
        );
        let image = canvas.image();

        assert_eq!(*image.get_pixel(1, 1), RED.to_rgba());
        assert_eq!(*image.get_pixel(2, 2), RED.to_rgba());
        // The space is left blank.
        assert_eq!(*image.get_pixel(3, 1), Rgb::WHITE.to_rgba());
        assert_eq!(*image.get_pixel(5, 2), RED.to_rgba());
        assert_eq!(*image.get_pixel(7, 7), RED.to_rgba());
        assert_eq!(*image.get_pixel(0, 0), Rgb::WHITE.to_rgba());
    }

    #[test]
    fn off_canvas_lines_are_clipped() {
        let mut backend = FixedAdvanceBackend::new(4, 4);
        let font = FontHandle::fallback(20);
        let canvas = rasterize(
            &mut backend,
            &font,
            (8, 8),
            Rgb::WHITE,
            &[instruction("ab", -6, -2), instruction("far away", 100, 100)],
            RED,
        );
        let image = canvas.image();

        // Only the right half of "b" is visible, and only its bottom two rows.
        let painted: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == RED.to_rgba())
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(painted, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");
        let canvas = Canvas::new(3, 2, Rgb(10, 20, 30));
        canvas.save(&path).unwrap();

        let loaded = image::open(&path).unwrap().into_rgb8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1).0, [10, 20, 30]);
    }

    #[test]
    fn save_to_unknown_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.unknown-format");
        let canvas = Canvas::new(3, 2, Rgb::WHITE);
        assert!(canvas.save(&path).is_err());
    }
}
