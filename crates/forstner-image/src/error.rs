/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image size is not valid.
    #[error("Invalid image size ({0}, {1}) mismatch ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the image is too small for the requested operation.
    #[error("Image of size ({0}, {1}) is smaller than the required ({2}, {3})")]
    ImageTooSmall(usize, usize, usize, usize),

    /// Error when the aggregation window is not a positive odd number.
    #[error("Window size must be a positive odd number, got {0}")]
    InvalidWindowSize(usize),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds {1}")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the pixel data cannot be cast.
    #[error("Failed to cast image data to {0}")]
    CastError(String),
}
