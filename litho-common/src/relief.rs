//! Relief mesh generation (heightmap -> planar faces)
//!
//! Each heightmap cell is a column standing on the z = 0 plane. Instead of
//! building one box per cell and unioning them, faces are emitted directly:
//!
//! - base and top face for every cell
//! - full-height walls on the grid perimeter, stepped where a neighbour on the
//!   same boundary row/column is shorter so the shared edge stays conformant
//! - a riser between two neighbouring cells only when their levels differ
//!
//! Cells are visited column-major (w outer, h inner). Per cell the order is:
//! base, top, top wall, left wall, bottom wall or row riser, right wall or
//! column riser.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::heightmap::Heightmap;
use crate::mesh::Mesh;
use crate::quantize::Level;
use crate::triangulate::{self, Triangle};

/// Point in millimetres
pub type Point3 = DVec3;

/// Ordered boundary of a planar face (3-7 points in practice)
pub type Area = SmallVec<[Point3; 7]>;

/// Minimum solid thickness under the shortest point (mm)
pub const DEFAULT_BASE: f64 = 0.4;

/// Height of one level and footprint of one pixel (mm)
pub const DEFAULT_SCALE: f64 = 0.2;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ReliefError {
    #[error("Base thickness must be finite and non-negative, got {0}")]
    InvalidBase(f64),

    #[error("Scale must be finite and positive, got {0}")]
    InvalidScale(f64),
}

/// Physical dimensions of the relief block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefConfig {
    /// Solid thickness under level 0 (mm)
    pub base: f64,
    /// Size of one level in z and of one cell in x/y (mm)
    pub scale: f64,
}

impl Default for ReliefConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            scale: DEFAULT_SCALE,
        }
    }
}

impl ReliefConfig {
    pub fn validate(&self) -> Result<(), ReliefError> {
        if !self.base.is_finite() || self.base < 0.0 {
            return Err(ReliefError::InvalidBase(self.base));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ReliefError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Top surface height for `level`, rounded to 0.1 mm
    ///
    /// Rounding keeps faces that meet at the same level on identical
    /// coordinates, so stitching seams do not drift apart.
    pub fn level_height(&self, level: Level) -> f64 {
        round_tenth(self.base + self.scale * f64::from(level))
    }
}

/// Round half away from zero at one decimal place
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Emits the faces of a relief block for a heightmap
pub struct ReliefGenerator<'a> {
    heightmap: &'a Heightmap,
    config: ReliefConfig,
}

impl<'a> ReliefGenerator<'a> {
    pub fn new(heightmap: &'a Heightmap, config: ReliefConfig) -> Self {
        Self { heightmap, config }
    }

    /// Lazily yield every face, cell by cell
    pub fn areas(&self) -> impl Iterator<Item = Area> + '_ {
        let height = self.heightmap.height();
        (0..self.heightmap.width())
            .flat_map(move |w| (0..height).map(move |h| (w, h)))
            .flat_map(move |(w, h)| self.cell_areas(w, h))
    }

    /// Lazily triangulate every face, preserving face order
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.areas().flat_map(|area| triangulate::triangulate(&area))
    }

    /// Number of triangles [`ReliefGenerator::triangles`] yields
    pub fn triangle_count(&self) -> usize {
        self.areas()
            .map(|area| triangulate::triangle_count(&area))
            .sum()
    }

    /// Materialize the whole triangle list
    pub fn mesh(&self) -> Mesh {
        let mut triangles = Vec::new();
        for area in self.areas() {
            triangulate::triangulate_into(&area, &mut triangles);
        }

        tracing::debug!("Relief mesh: {} triangles", triangles.len());

        Mesh { triangles }
    }

    /// Faces contributed by cell (w, h), in emission order
    pub fn cell_areas(&self, w: usize, h: usize) -> SmallVec<[Area; 6]> {
        let map = self.heightmap;
        let last_w = map.width() - 1;
        let last_h = map.height() - 1;
        let scale = self.config.scale;
        let level = map.level(w, h);

        let x0 = w as f64 * scale;
        let x1 = x0 + scale;
        let y0 = h as f64 * scale;
        let y1 = y0 + scale;
        let z0 = 0.0;
        let z1 = self.config.level_height(level);

        // Step height where the neighbour at (nw, nh) is shorter than this cell
        let step = |nw: usize, nh: usize| {
            let neighbour = map.level(nw, nh);
            (level > neighbour).then(|| self.config.level_height(neighbour))
        };

        let p = DVec3::new;
        let mut areas: SmallVec<[Area; 6]> = SmallVec::new();

        // base (faces down)
        areas.push(Area::from_slice(&[
            p(x0, y0, z0),
            p(x1, y0, z0),
            p(x1, y1, z0),
            p(x0, y1, z0),
        ]));

        // top (faces up)
        areas.push(Area::from_slice(&[
            p(x0, y0, z1),
            p(x0, y1, z1),
            p(x1, y1, z1),
            p(x1, y0, z1),
        ]));

        if h == 0 {
            let mut wall = Area::new();
            wall.push(p(x1, y0, z0));
            wall.push(p(x0, y0, z0));
            if let Some(z) = (w > 0).then(|| step(w - 1, h)).flatten() {
                wall.push(p(x0, y0, z));
            }
            wall.push(p(x0, y0, z1));
            wall.push(p(x1, y0, z1));
            if let Some(z) = (w < last_w).then(|| step(w + 1, h)).flatten() {
                wall.push(p(x1, y0, z));
            }
            areas.push(wall);
        }

        if w == 0 {
            let mut wall = Area::new();
            wall.push(p(x0, y1, z1));
            wall.push(p(x0, y0, z1));
            if let Some(z) = (h > 0).then(|| step(w, h - 1)).flatten() {
                wall.push(p(x0, y0, z));
            }
            wall.push(p(x0, y0, z0));
            wall.push(p(x0, y1, z0));
            if let Some(z) = (h < last_h).then(|| step(w, h + 1)).flatten() {
                wall.push(p(x0, y1, z));
            }
            areas.push(wall);
        }

        if h == last_h {
            let mut wall = Area::new();
            wall.push(p(x1, y1, z1));
            wall.push(p(x0, y1, z1));
            if let Some(z) = (w > 0).then(|| step(w - 1, h)).flatten() {
                wall.push(p(x0, y1, z));
            }
            wall.push(p(x0, y1, z0));
            wall.push(p(x1, y1, z0));
            if let Some(z) = (w < last_w).then(|| step(w + 1, h)).flatten() {
                wall.push(p(x1, y1, z));
            }
            areas.push(wall);
        } else {
            let next = map.level(w, h + 1);
            if level != next {
                let z2 = self.config.level_height(next);
                areas.push(Area::from_slice(&[
                    p(x1, y1, z1),
                    p(x0, y1, z1),
                    p(x0, y1, z2),
                    p(x1, y1, z2),
                ]));
            }
        }

        if w == last_w {
            let mut wall = Area::new();
            wall.push(p(x1, y1, z0));
            wall.push(p(x1, y0, z0));
            if let Some(z) = (h > 0).then(|| step(w, h - 1)).flatten() {
                wall.push(p(x1, y0, z));
            }
            wall.push(p(x1, y0, z1));
            wall.push(p(x1, y1, z1));
            if let Some(z) = (h < last_h).then(|| step(w, h + 1)).flatten() {
                wall.push(p(x1, y1, z));
            }
            areas.push(wall);
        } else {
            let next = map.level(w + 1, h);
            if level != next {
                let z2 = self.config.level_height(next);
                areas.push(Area::from_slice(&[
                    p(x1, y0, z1),
                    p(x1, y1, z1),
                    p(x1, y1, z2),
                    p(x1, y0, z2),
                ]));
            }
        }

        areas
    }
}
