use std::path::Path;

use forstner_image::{Image, ImageSize};

use crate::error::IoError;

/// A generic image type that can be any of the supported image formats.
#[derive(Clone, Debug)]
pub enum GenericImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit grayscale image with alpha channel
    La8(Image<u8, 2>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
    /// 16-bit grayscale image
    L16(Image<u16, 1>),
    /// 16-bit grayscale image with alpha channel
    La16(Image<u16, 2>),
    /// 16-bit RGB image
    Rgb16(Image<u16, 3>),
    /// 16-bit RGB image with alpha channel
    Rgba16(Image<u16, 4>),
    /// 32-bit float RGB image
    Rgb32F(Image<f32, 3>),
    /// 32-bit float RGB image with alpha channel
    Rgba32F(Image<f32, 4>),
}

impl GenericImage {
    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::L8(img) => img.size(),
            GenericImage::La8(img) => img.size(),
            GenericImage::Rgb8(img) => img.size(),
            GenericImage::Rgba8(img) => img.size(),
            GenericImage::L16(img) => img.size(),
            GenericImage::La16(img) => img.size(),
            GenericImage::Rgb16(img) => img.size(),
            GenericImage::Rgba16(img) => img.size(),
            GenericImage::Rgb32F(img) => img.size(),
            GenericImage::Rgba32F(img) => img.size(),
        }
    }

    /// The number of channels per pixel.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::L8(_) | GenericImage::L16(_) => 1,
            GenericImage::La8(_) | GenericImage::La16(_) => 2,
            GenericImage::Rgb8(_) | GenericImage::Rgb16(_) | GenericImage::Rgb32F(_) => 3,
            GenericImage::Rgba8(_) | GenericImage::Rgba16(_) | GenericImage::Rgba32F(_) => 4,
        }
    }
}

fn decode(file_path: &Path) -> Result<image::DynamicImage, IoError> {
    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    #[allow(deprecated)]
    let img = image::io::Reader::new(std::io::Cursor::new(&mmap))
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {} as {:?} ({}x{})",
        file_path.display(),
        img.color(),
        img.width(),
        img.height()
    );

    Ok(img)
}

fn image_size(img: &image::DynamicImage) -> ImageSize {
    ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    }
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate and keeps
/// the pixel format of the file.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] if there is no file at the given path.
/// * [`IoError::ImageDecodeError`] if the file content cannot be decoded.
/// * [`IoError::UnsupportedImageFormat`] if the pixel format has no matching variant.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let img = decode(file_path.as_ref())?;
    let size = image_size(&img);

    let image = match img.color() {
        image::ColorType::L8 => GenericImage::L8(Image::new(size, img.into_luma8().into_raw())?),
        image::ColorType::La8 => {
            GenericImage::La8(Image::new(size, img.into_luma_alpha8().into_raw())?)
        }
        image::ColorType::Rgb8 => GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
        image::ColorType::Rgba8 => {
            GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?)
        }
        image::ColorType::L16 => GenericImage::L16(Image::new(size, img.into_luma16().into_raw())?),
        image::ColorType::La16 => {
            GenericImage::La16(Image::new(size, img.into_luma_alpha16().into_raw())?)
        }
        image::ColorType::Rgb16 => {
            GenericImage::Rgb16(Image::new(size, img.into_rgb16().into_raw())?)
        }
        image::ColorType::Rgba16 => {
            GenericImage::Rgba16(Image::new(size, img.into_rgba16().into_raw())?)
        }
        image::ColorType::Rgb32F => {
            GenericImage::Rgb32F(Image::new(size, img.into_rgb32f().into_raw())?)
        }
        image::ColorType::Rgba32F => {
            GenericImage::Rgba32F(Image::new(size, img.into_rgba32f().into_raw())?)
        }
        other => return Err(IoError::UnsupportedImageFormat(other)),
    };

    Ok(image)
}

/// Reads an image from the given file path as 8-bit RGB.
///
/// Grayscale files are replicated over the three channels, the alpha channel is dropped and
/// deeper formats are scaled down to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] if there is no file at the given path.
/// * [`IoError::ImageDecodeError`] if the file content cannot be decoded.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let img = decode(file_path.as_ref())?;
    let size = image_size(&img);

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}
