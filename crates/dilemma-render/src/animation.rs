//! Animated GIF output
//!
//! One frame per generation, looping forever. The animation is encoded in
//! memory and written to disk in one call.

use dilemma_core::Board;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::renderer::BoardRenderer;
use crate::RenderError;

/// Encodes every generation in `boards` as an animated GIF.
pub fn encode_gif(renderer: &BoardRenderer, boards: &[Board]) -> Result<Vec<u8>, RenderError> {
    let first = boards.first().ok_or(RenderError::NoFrames)?;
    let expected = renderer.image_size(first)?;
    let delay = Delay::from_numer_denom_ms(renderer.options().frame_delay_ms, 1);

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder.set_repeat(Repeat::Infinite)?;

        for (index, board) in boards.iter().enumerate() {
            let image = renderer.render(board)?;
            let found = image.dimensions();
            if found != expected {
                return Err(RenderError::FrameSizeMismatch {
                    index,
                    expected: format!("{}x{}", expected.0, expected.1),
                    found: format!("{}x{}", found.0, found.1),
                });
            }

            let rgba = DynamicImage::ImageRgb8(image).into_rgba8();
            encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;
        }
        // Dropping the encoder writes the trailer
    }
    Ok(bytes)
}

/// Writes every generation in `boards` into an animated GIF at `path`.
///
/// Returns the number of frames written.
pub fn write_gif(
    renderer: &BoardRenderer,
    boards: &[Board],
    path: &Path,
) -> Result<usize, RenderError> {
    let bytes = encode_gif(renderer, boards)?;
    fs::write(path, &bytes).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), frames = boards.len(), bytes = bytes.len(), "wrote animation");
    Ok(boards.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilemma_core::setup::parse_board;

    #[test]
    fn test_encode_gif_header_and_trailer() {
        let board = parse_board("2 2\nCD\nDC\n").unwrap();
        let bytes = encode_gif(&BoardRenderer::default(), &[board.clone(), board]).unwrap();

        assert!(bytes.starts_with(b"GIF89a"));
        assert_eq!(bytes.last(), Some(&0x3B));
    }

    #[test]
    fn test_encode_gif_needs_frames() {
        assert!(matches!(
            encode_gif(&BoardRenderer::default(), &[]),
            Err(RenderError::NoFrames)
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_is_reported() {
        let board = parse_board("2 2\nCD\nDC\n").unwrap();
        let err = write_gif(
            &BoardRenderer::default(),
            &[board.clone(), board],
            Path::new("/dev/full"),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
