//! Materialized triangle soup

use crate::formats::{write_ascii_stl, write_binary_stl, StlError, StlFormat};
use crate::triangulate::Triangle;

/// Triangle list without shared-vertex indexing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Encode as STL in memory
    pub fn to_stl(&self, format: StlFormat) -> Result<Vec<u8>, StlError> {
        let mut out = Vec::new();
        match format {
            StlFormat::Ascii => write_ascii_stl(&mut out, self.triangles.iter().copied())?,
            StlFormat::Binary => {
                out.reserve(84 + 50 * self.len());
                write_binary_stl(&mut out, self.len(), self.triangles.iter().copied())?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::Heightmap;
    use crate::relief::{ReliefConfig, ReliefGenerator};

    #[test]
    fn test_mesh_matches_streamed_triangles() {
        let map = Heightmap::from_columns(&[vec![0, 4, 9], vec![15, 4, 2]]).unwrap();
        let generator = ReliefGenerator::new(&map, ReliefConfig::default());

        let mesh = generator.mesh();
        let streamed: Vec<Triangle> = generator.triangles().collect();
        assert_eq!(mesh.triangles, streamed);
        assert_eq!(generator.triangle_count(), mesh.len());
    }

    #[test]
    fn test_uniform_block_triangles() {
        let map = Heightmap::uniform(2, 2, 3).unwrap();
        let mesh = ReliefGenerator::new(&map, ReliefConfig::default()).mesh();
        // 16 quads
        assert_eq!(mesh.len(), 32);
    }

    #[test]
    fn test_binary_size_for_generated_mesh() {
        let map = Heightmap::from_columns(&[vec![1, 7, 3], vec![12, 0, 5], vec![9, 9, 14]]).unwrap();
        let mesh = ReliefGenerator::new(&map, ReliefConfig::default()).mesh();
        let bytes = mesh.to_stl(StlFormat::Binary).unwrap();
        assert_eq!(bytes.len(), 84 + 50 * mesh.len());
    }

    #[test]
    fn test_ascii_framing_for_generated_mesh() {
        let map = Heightmap::uniform(1, 1, 15).unwrap();
        let mesh = ReliefGenerator::new(&map, ReliefConfig::default()).mesh();
        let text = String::from_utf8(mesh.to_stl(StlFormat::Ascii).unwrap()).unwrap();

        assert!(text.starts_with("solid lithograph\n"));
        assert!(text.ends_with("endfacet\nendsolid"));
        assert_eq!(text.matches("facet normal").count(), mesh.len());
        assert_eq!(mesh.len(), 12);
    }
}
