/// Assembly of a full slice into shapes plus a viewport bounding box
use tracing::debug;

use crate::error::SceneResult;
use crate::geometry::CrossSectionPolygon;
use crate::projection::{project, RenderShape};

/// Axis-aligned box around every flattened vertex of a slice.
///
/// Starts at [`SceneBounds::EMPTY`] and only ever narrows. A box that never
/// saw a vertex keeps its infinite sentinels; check [`SceneBounds::is_empty`]
/// before doing arithmetic with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SceneBounds {
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub fn include(&mut self, x: f64, y: f64) {
        if x < self.min_x {
            self.min_x = x;
        }
        if x > self.max_x {
            self.max_x = x;
        }
        if y < self.min_y {
            self.min_y = y;
        }
        if y > self.max_y {
            self.max_y = y;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn x_range(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn y_range(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Every shape of one slice, in slicer order, with its bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub shapes: Vec<RenderShape>,
    pub bounds: SceneBounds,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Project every polygon and measure the slice.
///
/// Shapes come back in input order. The first polygon that is not a
/// triangle or quadrilateral fails the whole scene.
pub fn assemble_scene(polygons: &[CrossSectionPolygon]) -> SceneResult<Scene> {
    let mut bounds = SceneBounds::EMPTY;
    let mut shapes = Vec::with_capacity(polygons.len());

    for polygon in polygons {
        for vertex in &polygon.vertices {
            bounds.include(vertex.x, vertex.y);
        }
        shapes.push(project(polygon)?);
    }

    debug!(
        shapes = shapes.len(),
        empty = bounds.is_empty(),
        x_range = bounds.x_range(),
        y_range = bounds.y_range(),
        "Assembled slice scene"
    );

    Ok(Scene { shapes, bounds })
}
