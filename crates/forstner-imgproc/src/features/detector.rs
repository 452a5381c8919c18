use std::time::Instant;

use forstner_image::{ops, Image, ImageError};

use super::{corner_points, forstner_response, mark_points, Corner, ForstnerConfig};
use super::{MarkThresholds, WindowSize};
use crate::{
    color::gray_from_rgb_u8,
    filter::{spatial_gradient_sobel, GradientBorder},
};

/// Every product of one detection run.
#[derive(Clone, Debug)]
pub struct ForstnerOutput {
    /// The grayscale intensity of the input.
    pub gray: Image<u8, 1>,
    /// The horizontal derivative.
    pub dx: Image<f64, 1>,
    /// The vertical derivative.
    pub dy: Image<f64, 1>,
    /// The product of both derivatives.
    pub dxdy: Image<f64, 1>,
    /// The corner response.
    pub response: Image<f64, 1>,
    /// The roundness.
    pub roundness: Image<f64, 1>,
    /// The grayscale input as color with the detected points in red.
    pub marked: Image<u8, 3>,
    /// The detected points in row-major order.
    pub corners: Vec<Corner>,
}

/// Förstner corner detector.
///
/// # Example
///
/// ```
/// use forstner_image::Image;
/// use forstner_imgproc::features::{ForstnerConfig, ForstnerDetector};
///
/// let detector = ForstnerDetector::new(ForstnerConfig::default()).unwrap();
/// let image = Image::<u8, 3>::from_size_val([16, 16].into(), 128).unwrap();
///
/// let output = detector.detect(&image).unwrap();
/// assert!(output.corners.is_empty());
/// assert_eq!(output.marked.size(), image.size());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ForstnerDetector {
    window: WindowSize,
    thresholds: MarkThresholds,
    border: GradientBorder,
}

impl ForstnerDetector {
    /// Create a new detector.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidWindowSize`] if the configured window is zero or even.
    pub fn new(config: ForstnerConfig) -> Result<Self, ImageError> {
        Ok(Self {
            window: config.validate()?,
            thresholds: config.thresholds(),
            border: config.border,
        })
    }

    /// The aggregation window.
    pub fn window(&self) -> WindowSize {
        self.window
    }

    /// The marking thresholds.
    pub fn thresholds(&self) -> MarkThresholds {
        self.thresholds
    }

    /// Detect the corners of an RGB image.
    ///
    /// # Errors
    ///
    /// [`ImageError::ImageTooSmall`] if the image is smaller than 3x3.
    pub fn detect(&self, src: &Image<u8, 3>) -> Result<ForstnerOutput, ImageError> {
        let now = Instant::now();
        let mut gray = Image::from_size_val(src.size(), 0u8)?;
        gray_from_rgb_u8(src, &mut gray)?;
        log::debug!("grayscale conversion: {:?}", now.elapsed());

        self.run(gray)
    }

    /// Detect the corners of a grayscale image.
    ///
    /// # Errors
    ///
    /// [`ImageError::ImageTooSmall`] if the image is smaller than 3x3.
    pub fn detect_gray(&self, src: &Image<u8, 1>) -> Result<ForstnerOutput, ImageError> {
        self.run(src.clone())
    }

    fn run(&self, gray: Image<u8, 1>) -> Result<ForstnerOutput, ImageError> {
        let size = gray.size();
        if size.width < self.window.size() || size.height < self.window.size() {
            log::warn!(
                "window of size {} does not fit in {}, no point will be detected",
                self.window.size(),
                size
            );
        }

        let mut intensity = Image::from_size_val(size, 0.0f64)?;
        ops::cast_and_scale(&gray, &mut intensity, 1.0)?;

        let now = Instant::now();
        let mut dx = Image::from_size_val(size, 0.0)?;
        let mut dy = Image::from_size_val(size, 0.0)?;
        let mut dxdy = Image::from_size_val(size, 0.0)?;
        spatial_gradient_sobel(&intensity, &mut dx, &mut dy, &mut dxdy, self.border)?;
        log::debug!("gradient estimation: {:?}", now.elapsed());

        let now = Instant::now();
        let mut response = Image::from_size_val(size, 0.0)?;
        let mut roundness = Image::from_size_val(size, 0.0)?;
        forstner_response(
            &dx,
            &dy,
            &dxdy,
            &mut response,
            &mut roundness,
            self.window,
        )?;
        log::debug!("structure tensor scoring: {:?}", now.elapsed());

        let now = Instant::now();
        let mut marked = Image::from_size_val(size, 0u8)?;
        mark_points(
            &gray,
            &response,
            &roundness,
            self.window,
            self.thresholds,
            &mut marked,
        )?;
        let corners = corner_points(&response, &roundness, self.window, self.thresholds)?;
        log::debug!("point marking: {:?}", now.elapsed());

        log::info!("detected {} points in {}", corners.len(), size);

        Ok(ForstnerOutput {
            gray,
            dx,
            dy,
            dxdy,
            response,
            roundness,
            marked,
            corners,
        })
    }
}
