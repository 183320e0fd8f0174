/// TetSlice Core Library - Cross-section projection for browser rendering
///
/// This library turns the polygons produced by slicing a tetrahedral mesh
/// at a given height into 2D shapes, centroids and viewport bounds, and
/// encodes them as the JSON bodies served to the browser. Everything here
/// is stateless; the slicing itself lives behind `SliceSource`.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod handler;
pub mod projection;
pub mod query;
pub mod scene;
pub mod source;
pub mod wire;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use geometry::{CrossSectionPolygon, HeightRange};
pub use handler::{height_range_request, slice_request, try_height_range, try_slice, Response};
pub use projection::{project, RenderShape};
pub use scene::{assemble_scene, Scene, SceneBounds};
pub use source::{SliceLayer, SliceSource, StaticSliceSource};
pub use wire::{HeightRangeResponse, SliceResponse, SvgShape};
