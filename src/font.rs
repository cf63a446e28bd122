use std::sync::Arc;

use cosmic_text::{
    Attrs, Buffer, FontSystem, Metrics, Shaping, SwashCache, SwashContent, SwashImage,
};
use fontdb::{Family, Style, Weight};
use image::{GenericImage, ImageBuffer, Luma, Rgba};

use crate::error::FontLoadError;
use crate::style::{FontRef, Rgb};

/// Character whose width stands in for the width of an average glyph.
const REPRESENTATIVE_GLYPH: &str = "x";

/// A font loaded at a fixed pixel size, ready to measure and draw with.
#[derive(Debug, Clone, PartialEq)]
pub struct FontHandle {
    pub(crate) family: FontFamily,
    pub(crate) weight: Weight,
    pub(crate) style: Style,
    size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FontFamily {
    Fallback,
    Named(String),
}

impl FontHandle {
    pub fn fallback(size: u32) -> Self {
        Self { family: FontFamily::Fallback, weight: Weight::NORMAL, style: Style::Normal, size }
    }

    pub fn named(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: FontFamily::Named(family.into()),
            weight: Weight::NORMAL,
            style: Style::Normal,
            size,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_fallback(&self) -> bool {
        self.family == FontFamily::Fallback
    }

    /// The family name, or `None` for the fallback font.
    pub fn family_name(&self) -> Option<&str> {
        match &self.family {
            FontFamily::Fallback => None,
            FontFamily::Named(name) => Some(name),
        }
    }
}

/// Font loading, measuring and glyph drawing.
///
/// All extents are in whole pixels. Implementations must be deterministic:
/// identical (font, text) pairs always measure and draw the same way.
pub trait FontBackend {
    /// Load the font named by `font` at `size` pixels.
    fn load(&mut self, font: &FontRef, size: u32) -> Result<FontHandle, FontLoadError>;

    /// The built-in font used whenever loading fails.
    fn fallback(&mut self, size: u32) -> FontHandle {
        FontHandle::fallback(size)
    }

    /// Tight pixel bounding box of `text` laid out on a single line with no
    /// wrapping. Empty or blank text measures `(0, 0)`.
    fn measure(&mut self, font: &FontHandle, text: &str) -> (u32, u32);

    /// Width of one representative character. Only good for estimating how
    /// many characters fit in a line.
    fn average_glyph_width(&mut self, font: &FontHandle) -> u32 {
        self.measure(font, REPRESENTATIVE_GLYPH).0
    }

    /// Paint `text` so the top-left corner of its measured box sits at `(x, y)`.
    /// Coordinates outside the image are allowed; whatever falls outside is dropped.
    fn draw_line<I: GenericImage<Pixel = Rgba<u8>>>(
        &mut self,
        font: &FontHandle,
        image: &mut I,
        text: &str,
        x: i64,
        y: i64,
        color: Rgb,
    );
}

/// Load `font`, or fall back to the built-in font if it can't be used.
pub fn load_or_fallback<B: FontBackend>(backend: &mut B, font: &FontRef, size: u32) -> FontHandle {
    if *font == FontRef::Default {
        return backend.fallback(size);
    }

    match backend.load(font, size) {
        Ok(handle) => handle,
        Err(err) => {
            log::warn!("{err}; using the default font");
            backend.fallback(size)
        },
    }
}

/// [`FontBackend`] over cosmic-text, with fonts from a fontdb database.
pub struct TextPainter {
    font_system: FontSystem,
    swash_cache: SwashCache,
    has_fonts: bool,
}

impl Default for TextPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPainter {
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        Self::new_with_font_db(db)
    }

    pub fn new_with_font_db(font_database: fontdb::Database) -> Self {
        let has_fonts = !font_database.is_empty();
        if !has_fonts {
            log::warn!("no fonts available; text will not be drawn unless a font file is given");
        }

        let locale = sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string());
        let font_system = FontSystem::new_with_locale_and_db(locale, font_database);

        let swash_cache = SwashCache::new();

        Self { font_system, swash_cache, has_fonts }
    }

    fn shape_line(&mut self, font: &FontHandle, text: &str) -> Buffer {
        let font_size = font.size() as f32;
        let mut buffer = Buffer::new_empty(Metrics::relative(font_size, 1.0));

        let family = match &font.family {
            FontFamily::Fallback => Family::SansSerif,
            FontFamily::Named(name) => Family::Name(name.as_str()),
        };
        let attrs = Attrs::new().family(family).weight(font.weight).style(font.style);

        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);

        // Unbounded so the line never wraps.
        buffer.set_size(&mut self.font_system, None, None);

        let prune = true;
        buffer.shape_until_scroll(&mut self.font_system, prune);

        buffer
    }

    /// Calls `f` with the top-left pixel of every rasterized glyph, relative
    /// to the pen origin of the line.
    fn for_each_glyph_image(
        &mut self,
        buffer: &Buffer,
        mut f: impl FnMut(i32, i32, &SwashImage),
    ) {
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let scale = 1.0;
                let physical_glyph = glyph.physical((0.0, 0.0), scale);

                let Some(glyph_image) =
                    self.swash_cache.get_image(&mut self.font_system, physical_glyph.cache_key)
                else {
                    continue;
                };

                let glyph_x = physical_glyph.x + glyph_image.placement.left;
                let glyph_y =
                    run.line_y.round() as i32 + physical_glyph.y - glyph_image.placement.top;

                f(glyph_x, glyph_y, glyph_image);
            }
        }
    }

    /// Tight box around every painted pixel, or `None` when nothing is painted
    /// (blank text such as spaces).
    fn ink_bounds(&mut self, buffer: &Buffer) -> Option<InkBox> {
        let mut ink: Option<InkBox> = None;

        self.for_each_glyph_image(buffer, |glyph_x, glyph_y, glyph_image| {
            let (width, height) = (glyph_image.placement.width, glyph_image.placement.height);
            if width == 0 || height == 0 {
                return;
            }

            let glyph = InkBox::new(glyph_x as i64, glyph_y as i64, width, height);
            ink = Some(ink.map_or(glyph, |ink| ink.union(glyph)));
        });

        ink
    }
}

impl FontBackend for TextPainter {
    fn load(&mut self, font: &FontRef, size: u32) -> Result<FontHandle, FontLoadError> {
        let path = match font {
            FontRef::Default => return Err(FontLoadError::EmptyReference),
            FontRef::Path(path) if path.as_os_str().is_empty() => {
                return Err(FontLoadError::EmptyReference)
            },
            FontRef::Path(path) => path,
        };

        let data = std::fs::read(path)
            .map_err(|source| FontLoadError::Missing { path: path.clone(), source })?;

        let source = fontdb::Source::Binary(Arc::new(data));
        let ids = self.font_system.db_mut().load_font_source(source);

        let db = self.font_system.db();
        let face = ids
            .iter()
            .find_map(|id| db.face(*id))
            .ok_or_else(|| FontLoadError::InvalidFont { path: path.clone() })?;
        let (family, _language) = face
            .families
            .first()
            .ok_or_else(|| FontLoadError::InvalidFont { path: path.clone() })?;

        let handle = FontHandle {
            family: FontFamily::Named(family.clone()),
            weight: face.weight,
            style: face.style,
            size,
        };

        log::debug!("loaded font {:?} from {}", family, path.display());
        self.has_fonts = true;

        Ok(handle)
    }

    fn measure(&mut self, font: &FontHandle, text: &str) -> (u32, u32) {
        if !self.has_fonts || text.is_empty() {
            return (0, 0);
        }

        let buffer = self.shape_line(font, text);
        self.ink_bounds(&buffer).map(|ink| ink.size()).unwrap_or((0, 0))
    }

    fn draw_line<I: GenericImage<Pixel = Rgba<u8>>>(
        &mut self,
        font: &FontHandle,
        image: &mut I,
        text: &str,
        x: i64,
        y: i64,
        color: Rgb,
    ) {
        if !self.has_fonts || text.is_empty() {
            return;
        }

        let buffer = self.shape_line(font, text);
        let Some(ink) = self.ink_bounds(&buffer) else {
            return;
        };
        let Rgb(r, g, b) = color;

        // Shift so the ink box, not the pen origin, lands on (x, y).
        let offset_x = x - ink.left;
        let offset_y = y - ink.top;

        self.for_each_glyph_image(&buffer, |glyph_x, glyph_y, glyph_image| {
            let glyph_x = offset_x + glyph_x as i64;
            let glyph_y = offset_y + glyph_y as i64;

            let glyph_width = glyph_image.placement.width;
            let glyph_height = glyph_image.placement.height;

            match glyph_image.content {
                SwashContent::Mask | SwashContent::SubpixelMask => {
                    let Some(glyph_luma_image) = ImageBuffer::<Luma<u8>, &[u8]>::from_raw(
                        glyph_width,
                        glyph_height,
                        &glyph_image.data[..],
                    ) else {
                        return;
                    };

                    let glyph_rgba_image: ImageBuffer<Rgba<u8>, Vec<u8>> =
                        ImageBuffer::from_fn(glyph_width, glyph_height, |x, y| {
                            let glyph_alpha = glyph_luma_image.get_pixel(x, y)[0];
                            Rgba([r, g, b, glyph_alpha])
                        });

                    image::imageops::overlay(image, &glyph_rgba_image, glyph_x, glyph_y);
                },
                SwashContent::Color => {
                    // Emoji and other color glyphs keep their own colors.
                    let Some(glyph_rgba_image) = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
                        glyph_width,
                        glyph_height,
                        &glyph_image.data[..],
                    ) else {
                        return;
                    };

                    image::imageops::overlay(image, &glyph_rgba_image, glyph_x, glyph_y);
                },
            }
        });
    }
}

/// Pixel bounds of the painted part of a line, relative to its pen origin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct InkBox {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl InkBox {
    fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { left: x, top: y, right: x + width as i64, bottom: y + height as i64 }
    }

    fn union(self, other: InkBox) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    fn size(&self) -> (u32, u32) {
        ((self.right - self.left) as u32, (self.bottom - self.top) as u32)
    }
}
