//! Errors surfaced by the render driver and the image writers.

use thiserror::Error;

/// Errors that can occur while rendering or saving an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Samples per subpixel must be at least 1")]
    NoSamples,

    #[error("Render cancelled after {rows_done} of {rows} rows")]
    Cancelled { rows_done: usize, rows: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
