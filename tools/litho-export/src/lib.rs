//! litho-export library
//!
//! Image decoding, configuration and file output around `litho-common`.

pub mod config;
pub mod convert;
pub mod error;
pub mod image_source;

pub use config::{ExportConfig, load_config};
pub use convert::{ConvertOptions, ConvertSummary, convert_image, write_lithophane};
pub use error::ExportError;
pub use image_source::{FlatImage, FramedImage, LoadedImage, load_pixel_source};
