use forstner_image::{Image, ImageError, ImageSize};
use serde::{Deserialize, Serialize};

use super::WindowSize;
use crate::{color::rgb_from_gray, parallel};

/// The color used to mark the detected points.
pub const MARKER_COLOR: [u8; 3] = [255, 0, 0];

/// Lower bounds (exclusive) that a pixel must exceed to be marked.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkThresholds {
    /// Minimum corner response.
    pub response: f64,
    /// Minimum roundness.
    pub roundness: f64,
}

impl Default for MarkThresholds {
    fn default() -> Self {
        Self {
            response: 800.0,
            roundness: 0.5,
        }
    }
}

impl MarkThresholds {
    /// Whether a pair of scores pass both thresholds.
    #[inline]
    pub fn accepts(&self, response: f64, roundness: f64) -> bool {
        response > self.response && roundness > self.roundness
    }
}

/// A marked pixel and its scores.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    /// The x-coordinate (column) of the pixel.
    pub x: usize,
    /// The y-coordinate (row) of the pixel.
    pub y: usize,
    /// The corner response at the pixel.
    pub response: f64,
    /// The roundness at the pixel.
    pub roundness: f64,
}

fn check_scores(
    size: ImageSize,
    response: &Image<f64, 1>,
    roundness: &Image<f64, 1>,
) -> Result<(), ImageError> {
    for other in [response.size(), roundness.size()] {
        if other != size {
            return Err(ImageError::InvalidImageSize(
                size.width,
                size.height,
                other.width,
                other.height,
            ));
        }
    }
    Ok(())
}

/// Overlay the detected points on a color copy of a grayscale image.
///
/// Every pixel inside the window interior whose response and roundness both exceed
/// the thresholds is painted with [`MARKER_COLOR`]; the remaining pixels keep the
/// source intensity replicated over three channels. Pixels outside the interior are
/// never marked.
///
/// # Arguments
///
/// * `src` - The grayscale image with shape (H, W).
/// * `response` - The corner response with shape (H, W).
/// * `roundness` - The roundness with shape (H, W).
/// * `window` - The window used to compute the scores.
/// * `thresholds` - The response and roundness thresholds.
/// * `dst` - The annotated color image with shape (H, W, 3).
pub fn mark_points(
    src: &Image<u8, 1>,
    response: &Image<f64, 1>,
    roundness: &Image<f64, 1>,
    window: WindowSize,
    thresholds: MarkThresholds,
    dst: &mut Image<u8, 3>,
) -> Result<(), ImageError> {
    check_scores(src.size(), response, roundness)?;

    rgb_from_gray(src, dst)?;

    let size = src.size();
    let (response_data, roundness_data) = (response.as_slice(), roundness.as_slice());

    parallel::par_iter_rows_indexed(dst, |row_idx, row| {
        row.chunks_exact_mut(3)
            .enumerate()
            .for_each(|(col_idx, pixel)| {
                let idx = row_idx * size.width + col_idx;
                if window.contains(size, col_idx, row_idx)
                    && thresholds.accepts(response_data[idx], roundness_data[idx])
                {
                    pixel.copy_from_slice(&MARKER_COLOR);
                }
            });
    });

    Ok(())
}

/// Collect the pixels that [`mark_points`] would mark, in row-major order.
///
/// # Arguments
///
/// * `response` - The corner response with shape (H, W).
/// * `roundness` - The roundness with shape (H, W).
/// * `window` - The window used to compute the scores.
/// * `thresholds` - The response and roundness thresholds.
pub fn corner_points(
    response: &Image<f64, 1>,
    roundness: &Image<f64, 1>,
    window: WindowSize,
    thresholds: MarkThresholds,
) -> Result<Vec<Corner>, ImageError> {
    let size = response.size();
    check_scores(size, response, roundness)?;

    let corners = response
        .as_slice()
        .iter()
        .zip(roundness.as_slice().iter())
        .enumerate()
        .filter_map(|(idx, (&r, &q))| {
            let (x, y) = (idx % size.width, idx / size.width);
            (window.contains(size, x, y) && thresholds.accepts(r, q)).then_some(Corner {
                x,
                y,
                response: r,
                roundness: q,
            })
        })
        .collect();

    Ok(corners)
}
