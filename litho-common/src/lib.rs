//! Shared lithophane geometry and formats
//!
//! Pipeline, each stage feeding the next:
//!
//! ```text
//! pixels -> levels -> faces -> triangles -> STL bytes
//! ```
//!
//! # Modules
//!
//! - [`quantize`] - RGB to discrete relief level
//! - [`heightmap`] - Pixel source abstraction and level grid
//! - [`relief`] - Solid relief faces from a heightmap
//! - [`triangulate`] - Arity-indexed face triangulation
//! - [`mesh`] - Materialized triangle list
//! - [`formats`] - Binary and ASCII STL

pub mod formats;
pub mod heightmap;
pub mod mesh;
pub mod quantize;
pub mod relief;
pub mod triangulate;

pub use formats::{StlError, StlFormat, StlHeader, StlTriangleRecord, write_stl};
pub use heightmap::{Heightmap, HeightmapError, PixelSource};
pub use mesh::Mesh;
pub use quantize::{Level, QuantizeError, Quantizer};
pub use relief::{Area, Point3, ReliefConfig, ReliefError, ReliefGenerator};
pub use triangulate::{Triangle, triangulate};
