/// Boundary to the mesh slicing algorithm
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::SLICE_HEIGHT_TOLERANCE;
use crate::geometry::{CrossSectionPolygon, HeightRange};

/// Anything that can cut the tetrahedral mesh at a given height.
///
/// Implementations are shared between concurrent requests, so both
/// queries take `&self` and must not depend on per-request state.
pub trait SliceSource {
    /// Heights at which slicing makes sense
    fn height_range(&self) -> HeightRange;

    /// Cross-section polygons of the mesh at height `z`; empty when the
    /// plane misses the mesh
    fn slice_at(&self, z: f64) -> Vec<CrossSectionPolygon>;
}

impl<T: SliceSource + ?Sized> SliceSource for &T {
    fn height_range(&self) -> HeightRange {
        (**self).height_range()
    }

    fn slice_at(&self, z: f64) -> Vec<CrossSectionPolygon> {
        (**self).slice_at(z)
    }
}

impl<T: SliceSource + ?Sized> SliceSource for Box<T> {
    fn height_range(&self) -> HeightRange {
        (**self).height_range()
    }

    fn slice_at(&self, z: f64) -> Vec<CrossSectionPolygon> {
        (**self).slice_at(z)
    }
}

/// Polygons of one precomputed slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceLayer {
    pub z: f64,
    pub polygons: Vec<CrossSectionPolygon>,
}

/// A slice source backed by slices computed ahead of time.
///
/// A request is answered from the layer whose height matches within
/// [`SLICE_HEIGHT_TOLERANCE`]; any other height yields no polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticSliceSource {
    pub height_range: HeightRange,
    #[serde(default)]
    pub slices: Vec<SliceLayer>,
}

impl StaticSliceSource {
    pub fn new(height_range: HeightRange) -> Self {
        Self {
            height_range,
            slices: Vec::new(),
        }
    }

    pub fn with_layer(mut self, z: f64, polygons: Vec<CrossSectionPolygon>) -> Self {
        self.slices.push(SliceLayer { z, polygons });
        self
    }

    pub fn layer_count(&self) -> usize {
        self.slices.len()
    }
}

impl SliceSource for StaticSliceSource {
    fn height_range(&self) -> HeightRange {
        self.height_range
    }

    fn slice_at(&self, z: f64) -> Vec<CrossSectionPolygon> {
        if !self.height_range.contains(z) {
            debug!(z, min_z = self.height_range.min_z, max_z = self.height_range.max_z, "Height outside mesh");
            return Vec::new();
        }

        self.slices
            .iter()
            .find(|layer| (layer.z - z).abs() <= SLICE_HEIGHT_TOLERANCE)
            .map(|layer| layer.polygons.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> StaticSliceSource {
        StaticSliceSource::new(HeightRange::new(0.0, 10.0))
            .with_layer(
                5.0,
                vec![CrossSectionPolygon::triangle([(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)], 5.0, 1, 2, 0.5)],
            )
            .with_layer(7.5, Vec::new())
    }

    #[test]
    fn test_matching_layer() {
        let polygons = source().slice_at(5.0);
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].tet_id, 1);
    }

    #[test]
    fn test_unknown_or_outside_height_is_empty() {
        let source = source();
        assert!(source.slice_at(6.0).is_empty());
        assert!(source.slice_at(7.5).is_empty());
        assert!(source.slice_at(-1.0).is_empty());
        assert!(source.slice_at(12.0).is_empty());
    }

    #[test]
    fn test_reference_and_box_delegate() {
        let source = source();
        let by_ref: &dyn SliceSource = &source;
        assert_eq!(by_ref.height_range(), HeightRange::new(0.0, 10.0));

        let boxed: Box<dyn SliceSource> = Box::new(source.clone());
        assert_eq!(boxed.slice_at(5.0).len(), 1);
    }

    #[test]
    fn test_source_from_json() {
        let json = r#"{
            "height_range": {"min_z": 0.0, "max_z": 2.0},
            "slices": [{"z": 1.0, "polygons": []}]
        }"#;
        let source: StaticSliceSource = serde_json::from_str(json).unwrap();
        assert_eq!(source.layer_count(), 1);
        assert_eq!(source.height_range().max_z, 2.0);
    }
}
