/// TetSlice Web - WASM entry points for the slice viewer
///
/// The browser page hands over the precomputed slices of a mesh as JSON and
/// then asks for height ranges and slices exactly like it would ask the
/// HTTP server, getting the same JSON bodies back.

use tetslice_core::{
    assemble_scene, try_height_range, try_slice, wire, CrossSectionPolygon, SceneError,
    SliceResponse, StaticSliceSource,
};
use thiserror::Error;
use tracing::debug;
use wasm_bindgen::prelude::*;

/// Failures surfaced to JavaScript
#[derive(Debug, Error)]
pub enum WebError {
    /// The JSON handed over by the page does not describe slices or polygons.
    #[error("Invalid slice data: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl WebError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => tetslice_core::constants::STATUS_BAD_REQUEST,
            Self::Scene(err) => err.status_code(),
        }
    }
}

fn to_js(err: impl Into<WebError>) -> JsValue {
    let err = err.into();
    JsValue::from_str(&format!("{} {}", err.status_code(), err))
}

/// Slices of one mesh, queryable from JavaScript
#[wasm_bindgen]
pub struct SliceEndpoint {
    source: StaticSliceSource,
}

#[wasm_bindgen]
impl SliceEndpoint {
    /// Build from `{"height_range": {...}, "slices": [{"z": .., "polygons": [..]}]}`
    #[wasm_bindgen(constructor)]
    pub fn new(source_json: &str) -> Result<SliceEndpoint, JsValue> {
        let source = load_source(source_json).map_err(to_js)?;
        Ok(SliceEndpoint { source })
    }

    /// Body of the height range query
    pub fn height_range(&self) -> Result<String, JsValue> {
        try_height_range(&self.source).map_err(to_js)
    }

    /// Body of the slice query for a raw query string such as `zVal=5.0`
    pub fn slice(&self, query: &str) -> Result<String, JsValue> {
        try_slice(&self.source, query).map_err(to_js)
    }

    pub fn layer_count(&self) -> usize {
        self.source.layer_count()
    }
}

/// Scene body for a JSON array of cross-section polygons
#[wasm_bindgen]
pub fn render_slice(polygons_json: &str) -> Result<String, JsValue> {
    render_polygons(polygons_json).map_err(to_js)
}

fn load_source(source_json: &str) -> Result<StaticSliceSource, WebError> {
    let source: StaticSliceSource = serde_json::from_str(source_json)?;
    debug!(layers = source.layer_count(), "Loaded slice source");
    Ok(source)
}

fn render_polygons(polygons_json: &str) -> Result<String, WebError> {
    let polygons: Vec<CrossSectionPolygon> = serde_json::from_str(polygons_json)?;
    let scene = assemble_scene(&polygons)?;
    Ok(wire::to_json(&SliceResponse::new(&scene)?)?)
}

/// Installs a panic hook that forwards Rust panics to the browser console.
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    init_panic_hook();
    Ok(())
}
