#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use forstner_image as image;

#[doc(inline)]
pub use forstner_imgproc as imgproc;

#[doc(inline)]
pub use forstner_io as io;
