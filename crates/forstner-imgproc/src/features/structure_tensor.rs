use forstner_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Side length of the square aggregation window.
///
/// The size is always odd so that the window has a single center pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WindowSize(usize);

impl WindowSize {
    /// Create a new window size.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidWindowSize`] if `size` is zero or even.
    pub fn new(size: usize) -> Result<Self, ImageError> {
        if size == 0 || size % 2 == 0 {
            return Err(ImageError::InvalidWindowSize(size));
        }
        Ok(Self(size))
    }

    /// The side length of the window.
    pub fn size(&self) -> usize {
        self.0
    }

    /// The half-width of the window, `(size - 1) / 2`.
    pub fn offset(&self) -> usize {
        self.0 / 2
    }

    /// Whether the window centered at `(x, y)` lies fully inside an image of `image_size`.
    pub fn contains(&self, image_size: ImageSize, x: usize, y: usize) -> bool {
        let offset = self.offset();
        x >= offset
            && y >= offset
            && x + offset < image_size.width
            && y + offset < image_size.height
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = ImageError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<WindowSize> for usize {
    fn from(window: WindowSize) -> Self {
        window.0
    }
}

/// Second-moment matrix of the image gradient summed over a window.
///
/// ```text
/// | sxx sxy |
/// | sxy syy |
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StructureTensor {
    /// Sum of the squared horizontal derivatives.
    pub sxx: f64,
    /// Sum of the squared vertical derivatives.
    pub syy: f64,
    /// Sum of the derivative products.
    pub sxy: f64,
}

impl StructureTensor {
    /// Determinant of the tensor.
    pub fn det(&self) -> f64 {
        self.sxx * self.syy - self.sxy * self.sxy
    }

    /// Trace of the tensor.
    pub fn trace(&self) -> f64 {
        self.sxx + self.syy
    }

    /// Corner strength `det / trace`.
    ///
    /// A window without any gradient has a zero trace; its response is `0.0`.
    pub fn response(&self) -> f64 {
        finite_or_zero(self.det() / self.trace())
    }

    /// Isotropy `4 * det / trace^2`, from `0.0` on a straight edge to `1.0` on an
    /// isotropic corner.
    ///
    /// A window without any gradient has a zero trace; its roundness is `0.0`.
    pub fn roundness(&self) -> f64 {
        let trace = self.trace();
        finite_or_zero(4.0 * self.det() / (trace * trace))
    }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Compute the Förstner response and roundness of an image from its gradients.
///
/// For every pixel whose window fits inside the image, the structure tensor is
/// accumulated from `dx`, `dy` and `dxdy` over the window and reduced to
///
/// * `response = det / trace`
/// * `roundness = 4 * det / trace^2`
///
/// All other pixels are set to zero. If the window does not fit in the image at all,
/// both outputs are zero everywhere.
///
/// # Arguments
///
/// * `dx` - The horizontal derivative with shape (H, W).
/// * `dy` - The vertical derivative with shape (H, W).
/// * `dxdy` - The product of both derivatives with shape (H, W).
/// * `response` - The destination response with shape (H, W).
/// * `roundness` - The destination roundness with shape (H, W).
/// * `window` - The aggregation window.
///
/// PRECONDITION: all the images must have the same size.
pub fn forstner_response(
    dx: &Image<f64, 1>,
    dy: &Image<f64, 1>,
    dxdy: &Image<f64, 1>,
    response: &mut Image<f64, 1>,
    roundness: &mut Image<f64, 1>,
    window: WindowSize,
) -> Result<(), ImageError> {
    let size = dx.size();
    for other in [dy.size(), dxdy.size(), response.size(), roundness.size()] {
        if other != size {
            return Err(ImageError::InvalidImageSize(
                size.width,
                size.height,
                other.width,
                other.height,
            ));
        }
    }

    let cols = size.width;
    if cols == 0 {
        return Ok(());
    }

    let offset = window.offset();
    let (dx_data, dy_data, dxdy_data) = (dx.as_slice(), dy.as_slice(), dxdy.as_slice());

    response
        .as_slice_mut()
        .par_chunks_exact_mut(cols)
        .zip(roundness.as_slice_mut().par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(row_idx, (response_row, roundness_row))| {
            for col_idx in 0..cols {
                if !window.contains(size, col_idx, row_idx) {
                    response_row[col_idx] = 0.0;
                    roundness_row[col_idx] = 0.0;
                    continue;
                }

                let mut tensor = StructureTensor::default();
                for wy in row_idx - offset..=row_idx + offset {
                    let wrow = wy * cols;
                    for wx in col_idx - offset..=col_idx + offset {
                        let gx = dx_data[wrow + wx];
                        let gy = dy_data[wrow + wx];
                        tensor.sxx += gx * gx;
                        tensor.syy += gy * gy;
                        tensor.sxy += dxdy_data[wrow + wx];
                    }
                }

                response_row[col_idx] = tensor.response();
                roundness_row[col_idx] = tensor.roundness();
            }
        });

    Ok(())
}
