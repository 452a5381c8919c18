use forstner_image::{Image, ImageError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::kernels::sobel_3x3;

/// Values written to the outermost ring of pixels of the gradient images.
///
/// The 3x3 kernel does not fit at the border, so these pixels carry no true gradient
/// under `Intensity` and `Zero`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientBorder {
    /// Keep the raw intensity: `dx = dy = I` and `dxdy = I * I`.
    #[default]
    Intensity,
    /// Write zero to `dx`, `dy` and `dxdy`.
    Zero,
    /// Compute the gradient reading edge-replicated neighbors.
    Replicate,
}

impl std::fmt::Display for GradientBorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Intensity => write!(f, "intensity"),
            Self::Zero => write!(f, "zero"),
            Self::Replicate => write!(f, "replicate"),
        }
    }
}

impl std::str::FromStr for GradientBorder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intensity" => Ok(Self::Intensity),
            "zero" => Ok(Self::Zero),
            "replicate" => Ok(Self::Replicate),
            _ => Err(format!("Invalid gradient border: {s}")),
        }
    }
}

/// Compute the spatial gradient of an image with the 3x3 Sobel operator.
///
/// For every interior pixel the horizontal and vertical derivatives are written to
/// `dx` and `dy`, and their product to `dxdy`. The outermost ring of pixels is filled
/// according to `border`.
///
/// # Arguments
///
/// * `src` - The source intensity image with shape (H, W).
/// * `dx` - The horizontal derivative with shape (H, W).
/// * `dy` - The vertical derivative with shape (H, W).
/// * `dxdy` - The product of both derivatives with shape (H, W).
/// * `border` - The policy for the border pixels.
///
/// # Errors
///
/// * [`ImageError::ImageTooSmall`] if the image is smaller than 3x3.
/// * [`ImageError::InvalidImageSize`] if any output size differs from the input size.
///
/// # Example
///
/// ```
/// use forstner_image::Image;
/// use forstner_imgproc::filter::{spatial_gradient_sobel, GradientBorder};
///
/// let src = Image::<f64, 1>::from_size_val([4, 4].into(), 10.0).unwrap();
/// let mut dx = Image::from_size_val(src.size(), 0.0).unwrap();
/// let mut dy = Image::from_size_val(src.size(), 0.0).unwrap();
/// let mut dxdy = Image::from_size_val(src.size(), 0.0).unwrap();
///
/// spatial_gradient_sobel(&src, &mut dx, &mut dy, &mut dxdy, GradientBorder::Zero).unwrap();
/// assert!(dx.as_slice().iter().all(|&v| v == 0.0));
/// ```
pub fn spatial_gradient_sobel(
    src: &Image<f64, 1>,
    dx: &mut Image<f64, 1>,
    dy: &mut Image<f64, 1>,
    dxdy: &mut Image<f64, 1>,
    border: GradientBorder,
) -> Result<(), ImageError> {
    for dst_size in [dx.size(), dy.size(), dxdy.size()] {
        if src.size() != dst_size {
            return Err(ImageError::InvalidImageSize(
                src.cols(),
                src.rows(),
                dst_size.width,
                dst_size.height,
            ));
        }
    }

    let (cols, rows) = (src.cols(), src.rows());
    if cols < 3 || rows < 3 {
        return Err(ImageError::ImageTooSmall(cols, rows, 3, 3));
    }

    let src_data = src.as_slice();

    dx.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .zip(dy.as_slice_mut().par_chunks_exact_mut(cols))
        .zip(dxdy.as_slice_mut().par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(row_idx, ((dx_row, dy_row), dxdy_row))| {
            let border_row = row_idx == 0 || row_idx == rows - 1;

            for col_idx in 0..cols {
                let (gx, gy, gxy) = if !border_row && col_idx > 0 && col_idx < cols - 1 {
                    let (gx, gy) = sobel_3x3(|ky, kx| {
                        src_data[(row_idx + ky - 1) * cols + col_idx + kx - 1]
                    });
                    (gx, gy, gx * gy)
                } else {
                    match border {
                        GradientBorder::Intensity => {
                            let v = src_data[row_idx * cols + col_idx];
                            (v, v, v * v)
                        }
                        GradientBorder::Zero => (0.0, 0.0, 0.0),
                        GradientBorder::Replicate => {
                            let (gx, gy) = sobel_3x3(|ky, kx| {
                                let y = (row_idx + ky).saturating_sub(1).min(rows - 1);
                                let x = (col_idx + kx).saturating_sub(1).min(cols - 1);
                                src_data[y * cols + x]
                            });
                            (gx, gy, gx * gy)
                        }
                    }
                };

                dx_row[col_idx] = gx;
                dy_row[col_idx] = gy;
                dxdy_row[col_idx] = gxy;
            }
        });

    Ok(())
}
