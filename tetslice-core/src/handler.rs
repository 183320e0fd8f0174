/// Transport-independent request handlers.
///
/// A host server routes the two endpoints here and copies the returned
/// [`Response`] onto its own response type. Every failure stays inside the
/// request that caused it.

use tracing::{error, info, warn};

use crate::constants::{CONTENT_TYPE, STATUS_OK};
use crate::error::{SceneError, SceneResult};
use crate::query::parse_height;
use crate::scene::assemble_scene;
use crate::source::SliceSource;
use crate::wire::{to_json, ErrorResponse, HeightRangeResponse, SliceResponse};

/// Status code plus JSON body of a finished request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: String) -> Self {
        Self {
            status: STATUS_OK,
            body,
        }
    }

    pub fn from_error(err: &SceneError) -> Self {
        if err.is_client_error() {
            warn!(status = err.status_code(), error = %err, "Rejected request");
        } else {
            error!(status = err.status_code(), error = %err, "Request failed");
        }

        // ErrorResponse is a single string field and always encodes.
        let body = to_json(&ErrorResponse::from(err)).unwrap_or_default();
        Self {
            status: err.status_code(),
            body,
        }
    }

    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl From<SceneResult<String>> for Response {
    fn from(result: SceneResult<String>) -> Self {
        match result {
            Ok(body) => Self::ok(body),
            Err(err) => Self::from_error(&err),
        }
    }
}

/// JSON body for the height range query
pub fn try_height_range<S: SliceSource + ?Sized>(source: &S) -> SceneResult<String> {
    let range = source.height_range();
    to_json(&HeightRangeResponse::new(range)?)
}

/// JSON body for the slice query with raw query string `query`
pub fn try_slice<S: SliceSource + ?Sized>(source: &S, query: &str) -> SceneResult<String> {
    let z = parse_height(query)?;
    let polygons = source.slice_at(z);
    info!(z, polygons = polygons.len(), "Slice request");

    let scene = assemble_scene(&polygons)?;
    to_json(&SliceResponse::new(&scene)?)
}

/// Answer the height range query
pub fn height_range_request<S: SliceSource + ?Sized>(source: &S) -> Response {
    info!("Height range request");
    try_height_range(source).into()
}

/// Answer the slice query
pub fn slice_request<S: SliceSource + ?Sized>(source: &S, query: &str) -> Response {
    try_slice(source, query).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CrossSectionPolygon, HeightRange};
    use crate::source::StaticSliceSource;
    use nalgebra::Point3;

    fn source() -> StaticSliceSource {
        StaticSliceSource::new(HeightRange::new(0.0, 10.0)).with_layer(
            5.0,
            vec![CrossSectionPolygon::triangle([(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)], 5.0, 1, 2, 0.5)],
        )
    }

    #[test]
    fn test_height_range_ok() {
        let response = height_range_request(&source());
        assert!(response.is_success());
        assert_eq!(response.body, r#"{"MinZ":0,"MaxZ":10}"#);
        assert_eq!(response.content_type(), "application/json");
    }

    #[test]
    fn test_bad_height_is_client_error() {
        let response = slice_request(&source(), "zVal=five");
        assert_eq!(response.status, 400);
        assert!(response.body.starts_with(r#"{"Error":"Invalid height parameter"#));
    }

    #[test]
    fn test_malformed_polygon_is_server_error() {
        let source = StaticSliceSource::new(HeightRange::new(0.0, 10.0)).with_layer(
            2.0,
            vec![CrossSectionPolygon::new(
                vec![Point3::new(0.0, 0.0, 2.0); 5],
                8,
                1,
                1.0,
            )],
        );
        let response = slice_request(&source, "zVal=2");
        assert_eq!(response.status, 500);
        assert!(response.body.contains("tetrahedron 8"));
    }

    #[test]
    fn test_non_finite_range_is_server_error() {
        let source = StaticSliceSource::new(HeightRange::new(0.0, f64::INFINITY));
        let response = height_range_request(&source);
        assert_eq!(response.status, 500);
        assert!(response.body.contains("MaxZ"));
    }

    #[test]
    fn test_empty_slice_succeeds() {
        let response = slice_request(&source(), "zVal=9.5");
        assert!(response.is_success());
        assert!(response.body.starts_with(r#"{"SvgShapes":[],"MinX":null"#));
    }
}
