use forstner_image::ImageError;
use serde::{Deserialize, Serialize};

use super::{MarkThresholds, WindowSize};
use crate::filter::GradientBorder;

/// Parameters of the Förstner detector.
///
/// Missing fields take their default value when deserializing.
///
/// # Example
///
/// ```
/// use forstner_imgproc::features::ForstnerConfig;
///
/// let config = ForstnerConfig::new()
///     .with_window_size(7)
///     .with_response_threshold(1000.0);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.window_size, 7);
/// assert_eq!(config.roundness_threshold, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForstnerConfig {
    /// Side length of the aggregation window, a positive odd number.
    pub window_size: usize,
    /// Minimum response of a marked pixel.
    pub response_threshold: f64,
    /// Minimum roundness of a marked pixel.
    pub roundness_threshold: f64,
    /// Policy for the gradient at the image border.
    pub border: GradientBorder,
}

impl Default for ForstnerConfig {
    fn default() -> Self {
        let thresholds = MarkThresholds::default();
        Self {
            window_size: WindowSize::default().size(),
            response_threshold: thresholds.response,
            roundness_threshold: thresholds.roundness,
            border: GradientBorder::default(),
        }
    }
}

impl ForstnerConfig {
    /// Create a configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the response threshold.
    pub fn with_response_threshold(mut self, threshold: f64) -> Self {
        self.response_threshold = threshold;
        self
    }

    /// Set the roundness threshold.
    pub fn with_roundness_threshold(mut self, threshold: f64) -> Self {
        self.roundness_threshold = threshold;
        self
    }

    /// Set the gradient border policy.
    pub fn with_border(mut self, border: GradientBorder) -> Self {
        self.border = border;
        self
    }

    /// Check the parameters and return the validated window.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidWindowSize`] if the window size is zero or even.
    pub fn validate(&self) -> Result<WindowSize, ImageError> {
        WindowSize::new(self.window_size)
    }

    /// The marking thresholds.
    pub fn thresholds(&self) -> MarkThresholds {
        MarkThresholds {
            response: self.response_threshold,
            roundness: self.roundness_threshold,
        }
    }
}
