use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_FONT_SIZE: u32 = 40;
pub const DEFAULT_PADDING: u32 = 20;

/// Widest canvas produced when the caller leaves the width unspecified.
/// Also the wrap width in that case.
pub const MAX_AUTO_WIDTH: u32 = 800;

/// An opaque RGB color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.0, self.1, self.2, 255])
    }
}

/// Where the font comes from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum FontRef {
    /// Use the built-in fallback font.
    #[default]
    Default,
    /// Load a `.ttf`/`.otf` file from disk.
    Path(PathBuf),
}

impl FontRef {
    /// An empty string means "use the fallback font".
    pub fn from_arg(value: &str) -> Self {
        if value.is_empty() {
            FontRef::Default
        } else {
            FontRef::Path(PathBuf::from(value))
        }
    }
}

/// Horizontal placement of each line inside the canvas.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement of the whole text block inside the canvas.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Everything about how the text looks, for one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub font: FontRef,
    /// Font size in pixels.
    pub font_size: u32,
    pub text_color: Rgb,
    pub background: Rgb,
    /// Gap between the text block and the canvas edges, in pixels.
    pub padding: u32,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleConfig {
    pub fn new() -> Self {
        Self {
            font: FontRef::Default,
            font_size: DEFAULT_FONT_SIZE,
            text_color: Rgb::BLACK,
            background: Rgb::WHITE,
            padding: DEFAULT_PADDING,
            horizontal_align: HorizontalAlign::default(),
            vertical_align: VerticalAlign::default(),
        }
    }

    pub fn with_font(mut self, font: FontRef) -> Self {
        self.font = font;
        self
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_text_color(mut self, color: Rgb) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_alignment(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        self.horizontal_align = horizontal;
        self.vertical_align = vertical;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.font_size == 0 {
            return Err(Error::Render("font size must be positive".to_string()));
        }

        Ok(())
    }
}

/// Requested canvas dimensions. `None` on an axis means "fit the text".
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl CanvasSpec {
    pub fn auto() -> Self {
        Self::default()
    }

    pub fn fixed(width: u32, height: u32) -> Self {
        Self { width: Some(width), height: Some(height) }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Width used to decide wrap points.
    pub fn wrap_width(&self) -> u32 {
        self.width.unwrap_or(MAX_AUTO_WIDTH)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == Some(0) {
            return Err(Error::Render("canvas width must be positive".to_string()));
        }
        if self.height == Some(0) {
            return Err(Error::Render("canvas height must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_cli_defaults() {
        let style = StyleConfig::default();
        assert_eq!(style.font, FontRef::Default);
        assert_eq!(style.font_size, 40);
        assert_eq!(style.text_color, Rgb::BLACK);
        assert_eq!(style.background, Rgb::WHITE);
        assert_eq!(style.padding, 20);
        assert_eq!(style.horizontal_align, HorizontalAlign::Center);
        assert_eq!(style.vertical_align, VerticalAlign::Center);
    }

    #[test]
    fn empty_font_argument_means_fallback() {
        assert_eq!(FontRef::from_arg(""), FontRef::Default);
        assert_eq!(FontRef::from_arg("a.ttf"), FontRef::Path(PathBuf::from("a.ttf")));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(StyleConfig::new().with_font_size(0).validate().is_err());
        assert!(CanvasSpec::auto().with_width(0).validate().is_err());
        assert!(CanvasSpec::auto().with_height(0).validate().is_err());
        assert!(CanvasSpec::fixed(1, 1).validate().is_ok());
    }

    #[test]
    fn wrap_width_defaults_to_max_auto_width() {
        assert_eq!(CanvasSpec::auto().wrap_width(), MAX_AUTO_WIDTH);
        assert_eq!(CanvasSpec::auto().with_width(300).wrap_width(), 300);
    }
}
