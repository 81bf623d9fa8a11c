//! Shapes, transformations and SVG output for shapeloop
//!
//! This crate contains the geometry used by the demo renderers: points,
//! polyline paths, shapes built from them, affine-style transformations and
//! an SVG canvas. [`SquareRenderer`] plugs the rotating and translating
//! square into the core scheduler.

mod geometry;
mod renderer;
mod svg;
mod transform;

pub use geometry::*;
pub use renderer::*;
pub use svg::*;
pub use transform::*;

pub mod prelude {
    pub use crate::geometry::{Path, Point, Shape};
    pub use crate::renderer::{Motion, RenderedShape, SquareRenderer};
    pub use crate::svg::SvgCanvas;
    pub use crate::transform::{Nest, Rotate, Scale, Transformation, Translate};
}
