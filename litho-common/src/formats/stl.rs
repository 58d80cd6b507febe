//! STL (stereolithography) output
//!
//! # Binary layout
//! ```text
//! 0x00: comment [u8; 80] (ignored by readers)
//! 0x50: triangle_count u32
//! 0x54: triangle records, 50 bytes each:
//!       normal   [f32; 3]
//!       vertices [[f32; 3]; 3]
//!       attribute_byte_count u16
//! ```
//!
//! All values are little-endian. A file with N triangles is `84 + 50 * N`
//! bytes long.
//!
//! # ASCII layout
//! ```text
//! solid lithograph
//!   facet normal 0.0 0.0 0.0
//!     outer loop
//!       vertex x y z
//!       vertex x y z
//!       vertex x y z
//!     endloop
//!   endfacet
//! endsolid
//! ```
//!
//! Normals are always written as zero; readers recompute them from winding.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::triangulate::Triangle;

/// Text placed at the start of the binary comment block
pub const STL_COMMENT: &[u8] = b"litho-export binary STL";

/// Solid name used by the ASCII writer
pub const SOLID_NAME: &str = "lithograph";

#[derive(Debug, thiserror::Error)]
pub enum StlError {
    #[error("Failed to write STL data: {0}")]
    Io(#[from] io::Error),

    #[error("Binary STL holds at most 4294967295 triangles, got {count}")]
    TooManyTriangles { count: usize },

    #[error("Header declares {declared} triangles but {written} were supplied")]
    TriangleCountMismatch { declared: u32, written: u64 },
}

/// STL variant to write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    Ascii,
    #[default]
    Binary,
}

/// Binary STL header (84 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StlHeader {
    pub comment: [u8; 80],
    pub triangle_count: u32,
}

impl StlHeader {
    pub const SIZE: usize = 84;

    /// Header with the default comment, zero padded
    pub fn new(triangle_count: u32) -> Self {
        let mut comment = [0u8; 80];
        comment[..STL_COMMENT.len()].copy_from_slice(STL_COMMENT);
        Self {
            comment,
            triangle_count,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..80].copy_from_slice(&self.comment);
        bytes[80..84].copy_from_slice(&self.triangle_count.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let mut comment = [0u8; 80];
        comment.copy_from_slice(&bytes[0..80]);
        Some(Self {
            comment,
            triangle_count: u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]),
        })
    }
}

/// One binary STL facet (50 bytes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlTriangleRecord {
    pub normal: [f32; 3],
    pub vertices: [[f32; 3]; 3],
    pub attribute_byte_count: u16,
}

impl StlTriangleRecord {
    pub const SIZE: usize = 50;

    /// Write record to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        let floats = self.normal.iter().chain(self.vertices.iter().flatten());
        for (chunk, value) in bytes[..48].chunks_exact_mut(4).zip(floats) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        bytes[48..50].copy_from_slice(&self.attribute_byte_count.to_le_bytes());
        bytes
    }

    /// Read record from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let f = |i: usize| {
            let o = i * 4;
            f32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]])
        };
        Some(Self {
            normal: [f(0), f(1), f(2)],
            vertices: [[f(3), f(4), f(5)], [f(6), f(7), f(8)], [f(9), f(10), f(11)]],
            attribute_byte_count: u16::from_le_bytes([bytes[48], bytes[49]]),
        })
    }
}

impl From<&Triangle> for StlTriangleRecord {
    fn from(triangle: &Triangle) -> Self {
        Self {
            normal: [0.0; 3],
            vertices: triangle.vertices.map(|v| v.as_vec3().to_array()),
            attribute_byte_count: 0,
        }
    }
}

/// Write `triangles` in the requested format
///
/// `triangle_count` must match the number of triangles supplied; the binary
/// header is written before the first record.
pub fn write_stl<W, I>(
    w: &mut W,
    format: StlFormat,
    triangle_count: usize,
    triangles: I,
) -> Result<(), StlError>
where
    W: Write,
    I: IntoIterator<Item = Triangle>,
{
    match format {
        StlFormat::Ascii => write_ascii_stl(w, triangles),
        StlFormat::Binary => write_binary_stl(w, triangle_count, triangles),
    }
}

/// Write a binary STL
pub fn write_binary_stl<W, I>(w: &mut W, triangle_count: usize, triangles: I) -> Result<(), StlError>
where
    W: Write,
    I: IntoIterator<Item = Triangle>,
{
    let declared = u32::try_from(triangle_count).map_err(|_| StlError::TooManyTriangles {
        count: triangle_count,
    })?;

    w.write_all(&StlHeader::new(declared).to_bytes())?;

    let mut written: u64 = 0;
    for triangle in triangles {
        if written == u64::from(declared) {
            return Err(StlError::TriangleCountMismatch {
                declared,
                written: written + 1,
            });
        }
        w.write_all(&StlTriangleRecord::from(&triangle).to_bytes())?;
        written += 1;
    }

    if written != u64::from(declared) {
        return Err(StlError::TriangleCountMismatch { declared, written });
    }

    Ok(())
}

/// Write an ASCII STL (no trailing newline after `endsolid`)
pub fn write_ascii_stl<W, I>(w: &mut W, triangles: I) -> Result<(), StlError>
where
    W: Write,
    I: IntoIterator<Item = Triangle>,
{
    writeln!(w, "solid {SOLID_NAME}")?;
    for triangle in triangles {
        writeln!(w, "  facet normal 0.0 0.0 0.0")?;
        writeln!(w, "    outer loop")?;
        for v in &triangle.vertices {
            writeln!(w, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(w, "    endloop")?;
        writeln!(w, "  endfacet")?;
    }
    write!(w, "endsolid")?;
    Ok(())
}
