mod gradient;
pub use gradient::{spatial_gradient_sobel, GradientBorder};

/// Fixed convolution kernels.
pub mod kernels;
