/// Cross-section geometry handed over by the slicing algorithm
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// One polygon where a horizontal plane cuts a tetrahedron.
///
/// The vertices keep their height in `z`, but only `x` and `y` are used
/// once the polygon is flattened. A well-formed polygon has 3 or 4 vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionPolygon {
    pub vertices: Vec<Point3<f64>>,
    pub tet_id: i64,
    pub tissue_id: i64,
    pub weight: f64,
}

impl CrossSectionPolygon {
    pub fn new(vertices: Vec<Point3<f64>>, tet_id: i64, tissue_id: i64, weight: f64) -> Self {
        Self {
            vertices,
            tet_id,
            tissue_id,
            weight,
        }
    }

    /// Triangle cross-section at height `z` from three (x, y) corners
    pub fn triangle(corners: [(f64, f64); 3], z: f64, tet_id: i64, tissue_id: i64, weight: f64) -> Self {
        Self::new(
            corners.iter().map(|&(x, y)| Point3::new(x, y, z)).collect(),
            tet_id,
            tissue_id,
            weight,
        )
    }

    /// Quadrilateral cross-section at height `z` from four (x, y) corners
    pub fn quad(corners: [(f64, f64); 4], z: f64, tet_id: i64, tissue_id: i64, weight: f64) -> Self {
        Self::new(
            corners.iter().map(|&(x, y)| Point3::new(x, y, z)).collect(),
            tet_id,
            tissue_id,
            weight,
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices flattened onto the XY plane, in their original order
    pub fn flattened(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.vertices.iter().map(|v| Point2::new(v.x, v.y))
    }
}

/// Valid slicing heights reported by the slicing algorithm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightRange {
    pub min_z: f64,
    pub max_z: f64,
}

impl HeightRange {
    pub fn new(min_z: f64, max_z: f64) -> Self {
        Self { min_z, max_z }
    }

    pub fn contains(&self, z: f64) -> bool {
        z >= self.min_z && z <= self.max_z
    }
}
