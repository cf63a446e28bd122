use crate::layout::LayoutResult;
use crate::style::{HorizontalAlign, VerticalAlign};

/// Where to draw one line. Coordinates can be negative or past the canvas
/// edge when the text doesn't fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawInstruction {
    pub text: String,
    pub x: i64,
    pub y: i64,
}

/// Top edge of the text block.
pub fn block_top(align: VerticalAlign, canvas_height: u32, text_height: u32, padding: u32) -> i64 {
    let (canvas_height, text_height, padding) =
        (canvas_height as i64, text_height as i64, padding as i64);

    match align {
        VerticalAlign::Top => padding,
        VerticalAlign::Center => (canvas_height - text_height).div_euclid(2),
        VerticalAlign::Bottom => canvas_height - padding - text_height,
    }
}

/// Left edge of a single line.
pub fn line_left(align: HorizontalAlign, canvas_width: u32, line_width: u32, padding: u32) -> i64 {
    let (canvas_width, line_width, padding) =
        (canvas_width as i64, line_width as i64, padding as i64);

    match align {
        HorizontalAlign::Left => padding,
        HorizontalAlign::Center => (canvas_width - line_width).div_euclid(2),
        HorizontalAlign::Right => canvas_width - padding - line_width,
    }
}

/// Origins for every line, top to bottom.
///
/// Lines share one vertical block but are aligned horizontally one at a time,
/// so centered or right-aligned text has a ragged edge.
pub fn resolve_origins(
    layout: &LayoutResult,
    padding: u32,
    horizontal: HorizontalAlign,
    vertical: VerticalAlign,
) -> Vec<DrawInstruction> {
    let mut y = block_top(vertical, layout.canvas_height, layout.total_height, padding);

    layout
        .lines
        .iter()
        .map(|line| {
            let x = line_left(horizontal, layout.canvas_width, line.width, padding);
            let instruction = DrawInstruction { text: line.text.clone(), x, y };
            y += line.height as i64 + layout.line_spacing as i64;
            instruction
        })
        .collect()
}
