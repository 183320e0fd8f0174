/// Flattening of cross-section polygons into renderable 2D shapes
use nalgebra::Point2;

use crate::constants::CENTROID_DECIMALS;
use crate::error::{SceneError, SceneResult};
use crate::geometry::CrossSectionPolygon;

/// A cross-section polygon projected onto the XY plane
#[derive(Debug, Clone, PartialEq)]
pub struct RenderShape {
    pub points: Vec<Point2<f64>>,
    pub tet_id: i64,
    pub tissue_id: i64,
    pub weight: f64,
    pub centroid: Point2<f64>,
}

impl RenderShape {
    /// Centroid coordinates as fixed-point text, `(x, y)`
    pub fn centroid_text(&self) -> (String, String) {
        (
            format_fixed(self.centroid.x, CENTROID_DECIMALS),
            format_fixed(self.centroid.y, CENTROID_DECIMALS),
        )
    }
}

/// Project one polygon to its 2D shape.
///
/// Points keep the vertex order of the input. Fails with
/// [`SceneError::MalformedPolygon`] unless the polygon has 3 or 4 vertices.
pub fn project(polygon: &CrossSectionPolygon) -> SceneResult<RenderShape> {
    let points: Vec<Point2<f64>> = polygon.flattened().collect();
    let centroid = fan_centroid(&points).ok_or(SceneError::MalformedPolygon {
        tet_id: polygon.tet_id,
        vertex_count: points.len(),
    })?;

    Ok(RenderShape {
        points,
        tet_id: polygon.tet_id,
        tissue_id: polygon.tissue_id,
        weight: polygon.weight,
        centroid,
    })
}

/// Approximate centroid of a triangle or quadrilateral.
///
/// A quadrilateral is split into the triangles (0, 1, 2) and (2, 3, 0) and
/// the two triangle means are averaged. This only matches the area centroid
/// for planar convex quads with consistent winding; the renderer places
/// labels with it as is.
///
/// Returns `None` for any other vertex count.
pub fn fan_centroid(points: &[Point2<f64>]) -> Option<Point2<f64>> {
    match points {
        [a, b, c] => Some(triangle_mean(a, b, c)),
        [a, b, c, d] => {
            let first = triangle_mean(a, b, c);
            let second = triangle_mean(c, d, a);
            Some(Point2::new((first.x + second.x) / 2.0, (first.y + second.y) / 2.0))
        }
        _ => None,
    }
}

fn triangle_mean(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> Point2<f64> {
    Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

/// Format a float with exactly `digits` fractional digits
pub fn format_fixed(value: f64, digits: usize) -> String {
    format!("{value:.digits$}")
}
