//! Render plain text into an image.
//!
//! ```no_run
//! use text_image::{render, CanvasSpec, StyleConfig};
//!
//! let style = StyleConfig::new().with_font_size(48);
//! let rendered = render("hello world\nhere is a new line", &style, CanvasSpec::auto())?;
//! rendered.canvas.save("output.png")?;
//! # Ok::<(), text_image::Error>(())
//! ```

pub mod align;
pub mod error;
pub mod font;
pub mod layout;
pub mod raster;
pub mod render;
pub mod style;
#[doc(hidden)]
pub mod testing;
pub mod wrap;

pub use align::DrawInstruction;
pub use error::{Error, FontLoadError, Result};
pub use font::{load_or_fallback, FontBackend, FontHandle, TextPainter};
pub use layout::{LayoutResult, Line};
pub use raster::Canvas;
pub use render::{render, render_with, Rendered};
pub use style::{CanvasSpec, FontRef, HorizontalAlign, Rgb, StyleConfig, VerticalAlign};
