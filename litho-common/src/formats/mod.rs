//! Output file formats
//!
//! Binary records are fixed-size and little-endian, with `to_bytes` and
//! `from_bytes` on each record type.

pub mod stl;

pub use stl::*;
