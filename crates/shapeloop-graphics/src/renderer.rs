use std::fmt;

use shapeloop_core::{RenderError, ShapeRenderer};

use crate::geometry::Shape;
use crate::svg::SvgCanvas;
use crate::transform::{Rotate, Transformation, Translate};

/// SVG markup of a rendered shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedShape {
    pub svg: String,
}

/// Square of side `side` rotated by `degrees` around its center.
pub fn render_rotated(side: f32, degrees: f32) -> RenderedShape {
    render_square(side, &Rotate::degrees(degrees), SvgCanvas::default())
}

/// Square of side `side` shifted horizontally by `x`.
pub fn render_translated(side: f32, x: f32) -> RenderedShape {
    translate_shape(side, x, 0.0)
}

/// Square of side `side` shifted by `(x, y)`.
pub fn translate_shape(side: f32, x: f32, y: f32) -> RenderedShape {
    render_square(side, &Translate::by(x, y), SvgCanvas::default())
}

fn render_square(side: f32, transformation: &dyn Transformation, canvas: SvgCanvas) -> RenderedShape {
    let shape = Shape::square(side).transformed(transformation);
    RenderedShape {
        svg: canvas.render(&shape),
    }
}

/// How the animated parameter moves the square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Motion {
    /// Parameter is an angle in degrees.
    #[default]
    Rotate,
    /// Parameter is a horizontal offset.
    Translate,
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Motion::Rotate => f.write_str("rotate"),
            Motion::Translate => f.write_str("translate"),
        }
    }
}

/// [`ShapeRenderer`] drawing a square that rotates or slides with the
/// animation parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SquareRenderer {
    motion: Motion,
    canvas: SvgCanvas,
}

impl SquareRenderer {
    pub fn new(motion: Motion) -> Self {
        Self {
            motion,
            canvas: SvgCanvas::default(),
        }
    }

    pub fn rotating() -> Self {
        Self::new(Motion::Rotate)
    }

    pub fn translating() -> Self {
        Self::new(Motion::Translate)
    }

    pub fn with_canvas(mut self, canvas: SvgCanvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }
}

impl ShapeRenderer for SquareRenderer {
    fn render(&self, size: f32, parameter: f32) -> Result<String, RenderError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(RenderError::InvalidSize(size));
        }
        if !parameter.is_finite() {
            return Err(RenderError::NonFiniteParameter(parameter));
        }
        let rendered = match self.motion {
            Motion::Rotate => render_square(size, &Rotate::degrees(parameter), self.canvas),
            Motion::Translate => render_square(size, &Translate::by(parameter, 0.0), self.canvas),
        };
        Ok(rendered.svg)
    }
}

#[cfg(test)]
#[path = "tests/renderer_tests.rs"]
mod tests;
