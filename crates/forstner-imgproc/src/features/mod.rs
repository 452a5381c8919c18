//! Förstner interest point detection.
//!
//! The detection runs as a strict pipeline:
//!
//! 1. grayscale conversion ([`crate::color::gray_from_rgb_u8`])
//! 2. Sobel gradients ([`crate::filter::spatial_gradient_sobel`])
//! 3. structure tensor scoring ([`forstner_response`])
//! 4. thresholded marking ([`mark_points`], [`corner_points`])
//!
//! [`ForstnerDetector`] chains the four stages.

mod config;
mod detector;
mod marker;
mod structure_tensor;

pub use config::ForstnerConfig;
pub use detector::{ForstnerDetector, ForstnerOutput};
pub use marker::{corner_points, mark_points, Corner, MarkThresholds, MARKER_COLOR};
pub use structure_tensor::{forstner_response, StructureTensor, WindowSize};
