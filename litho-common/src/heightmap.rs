//! Heightmap construction from pixel sources
//!
//! A pixel source describes its layout through a shape descriptor:
//!
//! ```text
//! [width, height, channels]          flat image, sample(&[x, y, c])
//! [frames, width, height, channels]  framed image, sample(&[0, x, y, c])
//! ```
//!
//! Framed sources (animated images) only contribute their first frame.

use crate::quantize::{Level, Quantizer};

/// Channel-addressable pixel grid (decoded image)
pub trait PixelSource {
    /// Dimension sizes; the length is the dimension count
    fn shape(&self) -> &[usize];

    /// Channel value at `index` (same length as [`PixelSource::shape`])
    fn sample(&self, index: &[usize]) -> u8;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HeightmapError {
    #[error("Unsupported pixel shape: expected 3 or 4 dimensions, got {dimensions}")]
    UnsupportedPixelShape { dimensions: usize },

    #[error("Image is empty ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    #[error("Framed image has no frames")]
    NoFrames,

    #[error("Column {column} has {found} levels, expected {expected}")]
    RaggedColumns {
        column: usize,
        expected: usize,
        found: usize,
    },

    #[error("Image needs at least 3 channels (RGB), got {channels}")]
    TooFewChannels { channels: usize },
}

/// Pixel layout recognized from a shape descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Flat,
    Framed,
}

/// Grid of quantized levels, indexed by (w, h)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    width: usize,
    height: usize,
    /// Column-major: `levels[w * height + h]`
    levels: Vec<Level>,
}

impl Heightmap {
    /// Build a heightmap from columns of levels (`columns[w][h]`)
    ///
    /// All columns must have the same, non-zero length.
    /// Columns of differing length are reported as [`HeightmapError::RaggedColumns`].
    pub fn from_columns(columns: &[Vec<Level>]) -> Result<Self, HeightmapError> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(HeightmapError::EmptyImage { width, height });
        }
        if let Some((column, c)) = columns.iter().enumerate().find(|(_, c)| c.len() != height) {
            return Err(HeightmapError::RaggedColumns {
                column,
                expected: height,
                found: c.len(),
            });
        }

        Ok(Self {
            width,
            height,
            levels: columns.concat(),
        })
    }

    /// Heightmap where every cell has the same level
    pub fn uniform(width: usize, height: usize, level: Level) -> Result<Self, HeightmapError> {
        if width == 0 || height == 0 {
            return Err(HeightmapError::EmptyImage { width, height });
        }
        Ok(Self {
            width,
            height,
            levels: vec![level; width * height],
        })
    }

    /// Quantize every pixel of `source`
    pub fn from_pixels<S: PixelSource + ?Sized>(
        source: &S,
        quantizer: &Quantizer,
    ) -> Result<Self, HeightmapError> {
        let shape = source.shape();
        let (layout, width, height, channels) = match *shape {
            [width, height, channels] => (Layout::Flat, width, height, channels),
            [0, _, _, _] => return Err(HeightmapError::NoFrames),
            [_, width, height, channels] => (Layout::Framed, width, height, channels),
            _ => {
                return Err(HeightmapError::UnsupportedPixelShape {
                    dimensions: shape.len(),
                });
            }
        };

        if width == 0 || height == 0 {
            return Err(HeightmapError::EmptyImage { width, height });
        }
        if channels < 3 {
            return Err(HeightmapError::TooFewChannels { channels });
        }

        let mut levels = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                let [r, g, b] = match layout {
                    Layout::Flat => [0, 1, 2].map(|c| source.sample(&[x, y, c])),
                    Layout::Framed => [0, 1, 2].map(|c| source.sample(&[0, x, y, c])),
                };
                levels.push(quantizer.level(r, g, b));
            }
        }

        tracing::debug!(
            "Quantized {}x{} pixels into {} levels ({:?} layout)",
            width,
            height,
            quantizer.levels,
            layout
        );

        Ok(Self {
            width,
            height,
            levels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Level of cell (w, h)
    ///
    /// # Panics
    /// If `w >= width` or `h >= height`.
    pub fn level(&self, w: usize, h: usize) -> Level {
        assert!(w < self.width && h < self.height, "cell ({w}, {h}) out of bounds");
        self.levels[w * self.height + h]
    }

    /// Highest level present in the map
    pub fn max_level(&self) -> Level {
        self.levels.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense in-memory pixel grid, row-major over the shape
    struct Grid {
        shape: Vec<usize>,
        data: Vec<u8>,
    }

    impl Grid {
        fn new(shape: Vec<usize>, fill: impl Fn(&[usize]) -> u8) -> Self {
            let total: usize = shape.iter().product();
            let mut data = Vec::with_capacity(total);
            let mut index = vec![0; shape.len()];
            for _ in 0..total {
                data.push(fill(&index));
                for d in (0..shape.len()).rev() {
                    index[d] += 1;
                    if index[d] < shape[d] {
                        break;
                    }
                    index[d] = 0;
                }
            }
            Self { shape, data }
        }
    }

    impl PixelSource for Grid {
        fn shape(&self) -> &[usize] {
            &self.shape
        }

        fn sample(&self, index: &[usize]) -> u8 {
            let offset = index
                .iter()
                .zip(&self.shape)
                .fold(0, |acc, (i, dim)| acc * dim + i);
            self.data[offset]
        }
    }

    #[test]
    fn test_flat_layout() {
        // black at x == 0, white elsewhere
        let grid = Grid::new(vec![3, 2, 3], |i| if i[0] == 0 { 0 } else { 255 });
        let map = Heightmap::from_pixels(&grid, &Quantizer::default()).unwrap();

        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.level(0, 0), 15);
        assert_eq!(map.level(0, 1), 15);
        assert_eq!(map.level(1, 0), 0);
        assert_eq!(map.level(2, 1), 0);
    }

    #[test]
    fn test_framed_layout_uses_first_frame() {
        // frame 0 is white, frame 1 is black
        let grid = Grid::new(vec![2, 2, 2, 4], |i| if i[0] == 0 { 255 } else { 0 });
        let map = Heightmap::from_pixels(&grid, &Quantizer::default()).unwrap();

        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
        assert_eq!(map.max_level(), 0);
    }

    #[test]
    fn test_channels_map_to_rgb() {
        // pure green pixel: luminance 149.685 -> floor(9.355) = 9 -> level 6
        let grid = Grid::new(vec![1, 1, 3], |i| if i[2] == 1 { 255 } else { 0 });
        let map = Heightmap::from_pixels(&grid, &Quantizer::default()).unwrap();
        assert_eq!(map.level(0, 0), 6);
    }

    #[test]
    fn test_unsupported_shape() {
        let grid = Grid::new(vec![4, 4], |_| 0);
        assert_eq!(
            Heightmap::from_pixels(&grid, &Quantizer::default()),
            Err(HeightmapError::UnsupportedPixelShape { dimensions: 2 })
        );

        let grid = Grid::new(vec![1, 1, 1, 1, 3], |_| 0);
        assert_eq!(
            Heightmap::from_pixels(&grid, &Quantizer::default()),
            Err(HeightmapError::UnsupportedPixelShape { dimensions: 5 })
        );
    }

    #[test]
    fn test_empty_and_grayscale_sources_rejected() {
        let grid = Grid::new(vec![0, 4, 3], |_| 0);
        assert_eq!(
            Heightmap::from_pixels(&grid, &Quantizer::default()),
            Err(HeightmapError::EmptyImage {
                width: 0,
                height: 4
            })
        );

        let grid = Grid::new(vec![2, 2, 1], |_| 0);
        assert_eq!(
            Heightmap::from_pixels(&grid, &Quantizer::default()),
            Err(HeightmapError::TooFewChannels { channels: 1 })
        );
    }

    #[test]
    fn test_zero_frame_source_rejected() {
        let grid = Grid::new(vec![0, 2, 2, 4], |_| 0);
        assert_eq!(
            Heightmap::from_pixels(&grid, &Quantizer::default()),
            Err(HeightmapError::NoFrames)
        );
    }

    #[test]
    fn test_from_columns() {
        let map = Heightmap::from_columns(&[vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.level(1, 0), 3);
        assert_eq!(map.level(2, 1), 6);
        assert_eq!(map.max_level(), 6);

        assert_eq!(
            Heightmap::from_columns(&[vec![1, 2], vec![3]]),
            Err(HeightmapError::RaggedColumns {
                column: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Heightmap::from_columns(&[]),
            Err(HeightmapError::EmptyImage {
                width: 0,
                height: 0
            })
        );
    }
}
