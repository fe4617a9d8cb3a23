//! Board renderer
//!
//! Each agent becomes a `cell_size` square: cooperators blue, defectors red.
//! Columns run along the x axis and rows along the y axis.

use dilemma_core::config::RenderConfig;
use dilemma_core::{Board, Strategy};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;
use tracing::debug;

use crate::{colors, RenderError};

/// Drawing options.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Side of one cell in pixels
    pub cell_size: u32,
    pub cooperate_color: Rgb<u8>,
    pub defect_color: Rgb<u8>,
    /// Delay between animation frames
    pub frame_delay_ms: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 1,
            cooperate_color: colors::BLUE,
            defect_color: colors::RED,
            frame_delay_ms: 100,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            cell_size: config.cell_size,
            frame_delay_ms: config.frame_delay_ms,
            ..Self::default()
        }
    }
}

/// Turns boards into images.
#[derive(Debug, Clone, Default)]
pub struct BoardRenderer {
    options: RenderOptions,
}

impl BoardRenderer {
    pub fn new(options: RenderOptions) -> Result<Self, RenderError> {
        if options.cell_size == 0 {
            return Err(RenderError::ZeroCellSize);
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Pixel dimensions `(width, height)` of a rendered board.
    pub fn image_size(&self, board: &Board) -> Result<(u32, u32), RenderError> {
        let cell = self.options.cell_size;
        let too_large = || RenderError::TooLarge {
            rows: board.rows(),
            cols: board.cols(),
            cell_size: cell,
        };
        let width = u32::try_from(board.cols())
            .ok()
            .and_then(|cols| cols.checked_mul(cell))
            .ok_or_else(too_large)?;
        let height = u32::try_from(board.rows())
            .ok()
            .and_then(|rows| rows.checked_mul(cell))
            .ok_or_else(too_large)?;
        Ok((width, height))
    }

    fn color(&self, strategy: Strategy) -> Rgb<u8> {
        match strategy {
            Strategy::Cooperate => self.options.cooperate_color,
            Strategy::Defect => self.options.defect_color,
        }
    }

    /// Draws one board.
    pub fn render(&self, board: &Board) -> Result<RgbImage, RenderError> {
        let (width, height) = self.image_size(board)?;
        let cell = self.options.cell_size;

        let image = RgbImage::from_fn(width, height, |x, y| {
            let row = (y / cell) as usize;
            let col = (x / cell) as usize;
            self.color(board.row(row)[col].strategy)
        });
        Ok(image)
    }
}

/// Renders `board` and writes it as a PNG file.
pub fn write_png(renderer: &BoardRenderer, board: &Board, path: &Path) -> Result<(), RenderError> {
    let image = renderer.render(board)?;
    image.save_with_format(path, ImageFormat::Png)?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "wrote png");
    Ok(())
}
