//! Decoded images as pixel sources (PNG/JPEG/GIF -> RGBA8 grid)

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageError, RgbaImage};
use litho_common::PixelSource;

use crate::error::ExportError;

/// Single raster, shape `[width, height, 4]`
pub struct FlatImage {
    shape: [usize; 3],
    image: RgbaImage,
}

impl FlatImage {
    pub fn new(image: RgbaImage) -> Self {
        let shape = [image.width() as usize, image.height() as usize, 4];
        Self { shape, image }
    }
}

impl PixelSource for FlatImage {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn sample(&self, index: &[usize]) -> u8 {
        self.image.get_pixel(index[0] as u32, index[1] as u32)[index[2]]
    }
}

/// Animation frames sharing one canvas, shape `[frames, width, height, 4]`
pub struct FramedImage {
    shape: [usize; 4],
    frames: Vec<RgbaImage>,
}

impl FramedImage {
    /// Returns `None` when there are no frames
    pub fn new(frames: Vec<RgbaImage>) -> Option<Self> {
        let first = frames.first()?;
        let shape = [
            frames.len(),
            first.width() as usize,
            first.height() as usize,
            4,
        ];
        Some(Self { shape, frames })
    }
}

impl PixelSource for FramedImage {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn sample(&self, index: &[usize]) -> u8 {
        self.frames[index[0]].get_pixel(index[1] as u32, index[2] as u32)[index[3]]
    }
}

/// Decoded input image
pub enum LoadedImage {
    Flat(FlatImage),
    Framed(FramedImage),
}

impl LoadedImage {
    pub fn as_source(&self) -> &dyn PixelSource {
        match self {
            LoadedImage::Flat(image) => image,
            LoadedImage::Framed(image) => image,
        }
    }
}

/// Decode `path`; GIFs keep their frame axis, everything else is flat
pub fn load_pixel_source(path: &Path) -> Result<LoadedImage, ExportError> {
    let is_gif = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"));

    let unreadable = |source: ImageError| ExportError::ImageUnreadable {
        path: path.to_path_buf(),
        source,
    };

    if is_gif {
        let file = File::open(path).map_err(|e| unreadable(ImageError::IoError(e)))?;
        let decoder = GifDecoder::new(BufReader::new(file)).map_err(unreadable)?;
        let frames: Vec<RgbaImage> = decoder
            .into_frames()
            .collect_frames()
            .map_err(unreadable)?
            .into_iter()
            .map(|frame| frame.into_buffer())
            .collect();

        tracing::debug!("Decoded {} GIF frame(s) from {:?}", frames.len(), path);

        let framed = FramedImage::new(frames).ok_or_else(|| ExportError::NoFrames {
            path: path.to_path_buf(),
        })?;
        Ok(LoadedImage::Framed(framed))
    } else {
        let image = image::open(path).map_err(unreadable)?;
        Ok(LoadedImage::Flat(FlatImage::new(image.to_rgba8())))
    }
}
