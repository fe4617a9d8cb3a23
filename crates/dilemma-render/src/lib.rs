//! Raster output for spatial dilemma boards.
//!
//! Draws boards as images (one colored square per agent) and encodes whole
//! generation sequences as animated GIFs.

pub mod animation;
pub mod renderer;

pub use animation::{encode_gif, write_gif};
pub use renderer::{write_png, BoardRenderer, RenderOptions};

use std::path::PathBuf;
use thiserror::Error;

/// Common color definitions
pub mod colors {
    use image::Rgb;

    pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
}

/// Errors raised while drawing or encoding images.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("image of {rows}x{cols} cells at {cell_size}px per cell is too large")]
    TooLarge {
        rows: usize,
        cols: usize,
        cell_size: u32,
    },

    #[error("no generations to render")]
    NoFrames,

    #[error("frame {index} is {found}, expected {expected}")]
    FrameSizeMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}
