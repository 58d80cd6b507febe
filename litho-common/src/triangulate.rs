//! Polygon triangulation by vertex count
//!
//! Relief faces are small convex-ish polygons with a known vertex layout, so a
//! fixed index table per arity is enough:
//!
//! ```text
//! 3: (0,1,2)
//! 4: (0,1,2) (0,2,3)
//! 5: (0,1,4) (1,2,4) (2,3,4)
//! 6: (0,1,2) (2,3,5) (3,4,5) (5,0,2)
//! ```
//!
//! Polygons with fewer than 3 or more than 6 points have no table entry and
//! produce no triangles.

use smallvec::SmallVec;

use crate::relief::{Area, Point3};

/// Triangle with an implicit zero normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3; 3],
}

impl Triangle {
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }
}

/// Index table for polygons with `arity` points
pub fn fan_for(arity: usize) -> Option<&'static [[usize; 3]]> {
    match arity {
        3 => Some(&[[0, 1, 2]]),
        4 => Some(&[[0, 1, 2], [0, 2, 3]]),
        5 => Some(&[[0, 1, 4], [1, 2, 4], [2, 3, 4]]),
        6 => Some(&[[0, 1, 2], [2, 3, 5], [3, 4, 5], [5, 0, 2]]),
        _ => None,
    }
}

/// Split a face into triangles (empty for unsupported arities)
pub fn triangulate(area: &[Point3]) -> SmallVec<[Triangle; 4]> {
    fan_for(area.len())
        .unwrap_or_default()
        .iter()
        .map(|&[a, b, c]| Triangle::new(area[a], area[b], area[c]))
        .collect()
}

/// Append the triangles of `area` to `out`, returning how many were added
pub fn triangulate_into(area: &Area, out: &mut Vec<Triangle>) -> usize {
    let triangles = triangulate(area);
    out.extend_from_slice(&triangles);
    triangles.len()
}

/// Number of triangles `area` will produce
pub fn triangle_count(area: &[Point3]) -> usize {
    fan_for(area.len()).map_or(0, <[_]>::len)
}
