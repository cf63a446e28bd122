use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The inputs to a render call break an invariant (zero font size, zero-sized canvas).
    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Reasons a font reference could not be turned into a usable face.
/// Callers recover from all of these by switching to the fallback font.
#[derive(Error, Debug)]
pub enum FontLoadError {
    #[error("no font file given")]
    EmptyReference,

    #[error("could not read font file {}: {source}", path.display())]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not contain a usable font face", path.display())]
    InvalidFont { path: PathBuf },
}
