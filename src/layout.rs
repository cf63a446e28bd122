use crate::error::{Error, Result};
use crate::font::{FontBackend, FontHandle};
use crate::style::{CanvasSpec, MAX_AUTO_WIDTH};

/// Vertical gap between consecutive lines for a given font size.
pub fn line_spacing(font_size: u32) -> u32 {
    font_size / 4
}

fn to_pixels(value: u64, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::Render(format!("{what} of {value}px is too large")))
}

/// One wrapped row of text and its measured size in pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub width: u32,
    pub height: u32,
}

/// Measured lines plus the canvas they will be drawn on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    pub lines: Vec<Line>,
    /// Width of the widest line.
    pub total_width: u32,
    /// Line heights plus one `line_spacing` between each pair of lines.
    pub total_height: u32,
    pub line_spacing: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl LayoutResult {
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }
}

/// Measure `lines` and settle the canvas size.
///
/// Explicit canvas dimensions are used as-is even if the text doesn't fit.
/// A missing width becomes the text width plus padding, capped at
/// [`MAX_AUTO_WIDTH`]; a missing height becomes the text height plus padding.
/// Fails when the text block or an auto-sized height can't be expressed in
/// 32-bit pixels.
pub fn layout_lines<B: FontBackend>(
    backend: &mut B,
    font: &FontHandle,
    lines: Vec<String>,
    canvas: CanvasSpec,
    padding: u32,
) -> Result<LayoutResult> {
    let lines: Vec<Line> = lines
        .into_iter()
        .map(|text| {
            let (width, height) = backend.measure(font, &text);
            Line { text, width, height }
        })
        .collect();

    let line_spacing = line_spacing(font.size());
    let total_width = lines.iter().map(|line| line.width).max().unwrap_or(0);
    let gaps = lines.len().saturating_sub(1) as u64;
    let total_height = lines.iter().map(|line| line.height as u64).sum::<u64>()
        + gaps * line_spacing as u64;
    let total_height = to_pixels(total_height, "text height")?;

    let padding = padding as u64;
    let canvas_width = match canvas.width {
        Some(width) => width,
        None => (total_width as u64 + 2 * padding).min(MAX_AUTO_WIDTH as u64) as u32,
    };
    let canvas_height = match canvas.height {
        Some(height) => height,
        None => to_pixels(total_height as u64 + 2 * padding, "canvas height")?,
    };

    log::debug!(
        "laid out {} lines, text {}x{}, canvas {}x{}",
        lines.len(),
        total_width,
        total_height,
        canvas_width,
        canvas_height
    );

    Ok(LayoutResult { lines, total_width, total_height, line_spacing, canvas_width, canvas_height })
}
