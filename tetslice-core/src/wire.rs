/// JSON bodies exchanged with the browser renderer.
///
/// Field names, nesting and the string typing of ids and centroids are a
/// fixed contract with an existing client, so every body is a typed struct
/// with explicit PascalCase names rather than an ad-hoc map.

use serde::{Deserialize, Serialize, Serializer};

use crate::constants::MAX_EXACT_INTEGER;
use crate::error::{SceneError, SceneResult};
use crate::geometry::HeightRange;
use crate::projection::RenderShape;
use crate::scene::Scene;

/// A JSON number written the way the browser client has always received it.
///
/// Integral values are written without a fractional part (`10`, not
/// `10.0`); everything else goes through the regular float encoder.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct WireFloat(pub f64);

impl Serialize for WireFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl From<WireFloat> for f64 {
    fn from(value: WireFloat) -> Self {
        value.0
    }
}

/// Reject values JSON cannot carry. serde_json would silently write `null`.
fn finite(field: &str, value: f64) -> SceneResult<WireFloat> {
    if value.is_finite() {
        Ok(WireFloat(value))
    } else {
        Err(SceneError::serialization(format!(
            "non-finite value {value} in field {field}"
        )))
    }
}

/// Body of the height range query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeightRangeResponse {
    pub min_z: WireFloat,
    pub max_z: WireFloat,
}

impl HeightRangeResponse {
    pub fn new(range: HeightRange) -> SceneResult<Self> {
        Ok(Self {
            min_z: finite("MinZ", range.min_z)?,
            max_z: finite("MaxZ", range.max_z)?,
        })
    }
}

/// One drawable shape of a slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SvgShape {
    pub points: Vec<[WireFloat; 2]>,
    pub tet_id: String,
    pub centroid_x: String,
    pub centroid_y: String,
    pub tissue_id: String,
    pub weight: WireFloat,
}

impl SvgShape {
    pub fn new(shape: &RenderShape) -> SceneResult<Self> {
        let points = shape
            .points
            .iter()
            .map(|p| Ok([finite("Points", p.x)?, finite("Points", p.y)?]))
            .collect::<SceneResult<Vec<_>>>()?;
        finite("CentroidX", shape.centroid.x)?;
        finite("CentroidY", shape.centroid.y)?;
        let (centroid_x, centroid_y) = shape.centroid_text();

        Ok(Self {
            points,
            tet_id: shape.tet_id.to_string(),
            centroid_x,
            centroid_y,
            tissue_id: shape.tissue_id.to_string(),
            weight: finite("Weight", shape.weight)?,
        })
    }
}

/// Body of the slice query.
///
/// The four bounds are `null` when the slice has no shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SliceResponse {
    pub svg_shapes: Vec<SvgShape>,
    pub min_x: Option<WireFloat>,
    pub min_y: Option<WireFloat>,
    pub x_range: Option<WireFloat>,
    pub y_range: Option<WireFloat>,
}

impl SliceResponse {
    pub fn new(scene: &Scene) -> SceneResult<Self> {
        let svg_shapes = scene
            .shapes
            .iter()
            .map(SvgShape::new)
            .collect::<SceneResult<Vec<_>>>()?;

        if scene.is_empty() {
            return Ok(Self {
                svg_shapes,
                min_x: None,
                min_y: None,
                x_range: None,
                y_range: None,
            });
        }

        let bounds = &scene.bounds;
        Ok(Self {
            svg_shapes,
            min_x: Some(finite("MinX", bounds.min_x)?),
            min_y: Some(finite("MinY", bounds.min_y)?),
            x_range: Some(finite("XRange", bounds.x_range())?),
            y_range: Some(finite("YRange", bounds.y_range())?),
        })
    }

    pub fn has_bounds(&self) -> bool {
        self.min_x.is_some()
    }
}

/// Body returned with any failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&SceneError> for ErrorResponse {
    fn from(err: &SceneError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Encode any wire body as compact JSON
pub fn to_json<T: Serialize>(body: &T) -> SceneResult<String> {
    Ok(serde_json::to_string(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CrossSectionPolygon;
    use crate::scene::assemble_scene;
    use nalgebra::Point2;

    #[test]
    fn test_integral_floats_have_no_fraction() {
        assert_eq!(serde_json::to_string(&WireFloat(0.0)).unwrap(), "0");
        assert_eq!(serde_json::to_string(&WireFloat(10.0)).unwrap(), "10");
        assert_eq!(serde_json::to_string(&WireFloat(-4.0)).unwrap(), "-4");
        assert_eq!(serde_json::to_string(&WireFloat(0.5)).unwrap(), "0.5");
        assert_eq!(serde_json::to_string(&WireFloat(1e300)).unwrap(), "1e+300");
    }

    #[test]
    fn test_height_range_body() {
        let body = HeightRangeResponse::new(HeightRange::new(0.0, 10.0)).unwrap();
        assert_eq!(to_json(&body).unwrap(), r#"{"MinZ":0,"MaxZ":10}"#);
    }

    #[test]
    fn test_non_finite_height_range_is_rejected() {
        let err = HeightRangeResponse::new(HeightRange::new(f64::NAN, 1.0)).unwrap_err();
        match err {
            SceneError::SerializationFailure { detail } => assert!(detail.contains("MinZ")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_shape_field_names_and_types() {
        let polygon = CrossSectionPolygon::triangle([(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)], 5.0, 1, 2, 0.5);
        let scene = assemble_scene(&[polygon]).unwrap();
        let json = to_json(&SliceResponse::new(&scene).unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"SvgShapes":[{"Points":[[0,0],[4,0],[0,4]],"TetId":"1","CentroidX":"1.33","CentroidY":"1.33","TissueId":"2","Weight":0.5}],"MinX":0,"MinY":0,"XRange":4,"YRange":4}"#
        );
    }

    #[test]
    fn test_empty_scene_has_null_bounds() {
        let scene = assemble_scene(&[]).unwrap();
        let body = SliceResponse::new(&scene).unwrap();
        assert!(!body.has_bounds());
        assert_eq!(
            to_json(&body).unwrap(),
            r#"{"SvgShapes":[],"MinX":null,"MinY":null,"XRange":null,"YRange":null}"#
        );
    }

    #[test]
    fn test_non_finite_point_is_rejected() {
        let shape = RenderShape {
            points: vec![Point2::new(0.0, 0.0), Point2::new(f64::INFINITY, 1.0), Point2::new(1.0, 1.0)],
            tet_id: 1,
            tissue_id: 1,
            weight: 1.0,
            centroid: Point2::new(f64::INFINITY, 2.0 / 3.0),
        };
        assert!(matches!(
            SvgShape::new(&shape),
            Err(SceneError::SerializationFailure { .. })
        ));
    }

    #[test]
    fn test_shape_list_round_trip() {
        let polygons = vec![
            CrossSectionPolygon::quad([(0.1, 0.2), (1.5, 0.2), (1.5, 2.75), (0.1, 2.75)], 3.0, 11, 4, 0.125),
            CrossSectionPolygon::triangle([(-1.0, -1.0), (2.0, -1.0), (0.5, 3.0)], 3.0, 12, 5, 2.0),
        ];
        let scene = assemble_scene(&polygons).unwrap();
        let body = SliceResponse::new(&scene).unwrap();
        let decoded: SliceResponse = serde_json::from_str(&to_json(&body).unwrap()).unwrap();

        assert_eq!(decoded, body);
        assert_eq!(decoded.svg_shapes[0].points.len(), 4);
        assert_eq!(decoded.svg_shapes[0].points[2], [WireFloat(1.5), WireFloat(2.75)]);
        assert_eq!(decoded.svg_shapes[1].tet_id, "12");
        assert_eq!(decoded.svg_shapes[1].tissue_id, "5");
        assert_eq!(decoded.svg_shapes[0].weight, WireFloat(0.125));
    }

    #[test]
    fn test_error_body() {
        let err = SceneError::invalid_height("missing zVal");
        let json = to_json(&ErrorResponse::from(&err)).unwrap();
        assert_eq!(json, r#"{"Error":"Invalid height parameter: missing zVal"}"#);
    }
}
