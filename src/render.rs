use crate::align::resolve_origins;
use crate::error::Result;
use crate::font::{load_or_fallback, FontBackend, TextPainter};
use crate::layout::layout_lines;
use crate::raster::{rasterize, Canvas};
use crate::style::{CanvasSpec, StyleConfig};
use crate::wrap::{max_chars_per_line, wrap_text};

/// A finished render.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub canvas: Canvas,
    pub width: u32,
    pub height: u32,
}

/// Render `text` with a fresh [`TextPainter`] over the system fonts.
pub fn render(text: &str, style: &StyleConfig, canvas: CanvasSpec) -> Result<Rendered> {
    let mut painter = TextPainter::new();
    render_with(&mut painter, text, style, canvas)
}

/// Render `text` using `backend` for fonts and glyphs.
///
/// Runs wrap, layout, alignment and rasterization once each. A font that can't
/// be loaded is replaced with the backend's fallback font.
pub fn render_with<B: FontBackend>(
    backend: &mut B,
    text: &str,
    style: &StyleConfig,
    canvas: CanvasSpec,
) -> Result<Rendered> {
    style.validate()?;
    canvas.validate()?;

    let font = load_or_fallback(backend, &style.font, style.font_size);
    log::debug!("rendering with font {}", font.family_name().unwrap_or("<default>"));

    let average_glyph_width = backend.average_glyph_width(&font);
    let max_chars = max_chars_per_line(canvas.wrap_width(), style.padding, average_glyph_width);
    let lines = wrap_text(text, max_chars);
    log::debug!("wrapped text into {} lines of at most {} chars", lines.len(), max_chars);

    let layout = layout_lines(backend, &font, lines, canvas, style.padding)?;
    let instructions =
        resolve_origins(&layout, style.padding, style.horizontal_align, style.vertical_align);

    let canvas = rasterize(
        backend,
        &font,
        layout.canvas_size(),
        style.background,
        &instructions,
        style.text_color,
    );
    let (width, height) = canvas.dimensions();

    Ok(Rendered { canvas, width, height })
}
