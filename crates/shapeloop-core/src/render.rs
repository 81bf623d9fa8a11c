//! Rendering contracts between the scheduler and its collaborators.

use crate::error::{PaintError, RenderError};

/// Maps `(size, parameter)` to drawable markup.
///
/// Implementations must be free of side effects. Periodic interpretation of
/// the parameter (degrees modulo 360, for instance) is the renderer's job;
/// the scheduler hands it the raw, unbounded value.
pub trait ShapeRenderer {
    fn render(&self, size: f32, parameter: f32) -> Result<String, RenderError>;
}

impl<F> ShapeRenderer for F
where
    F: Fn(f32, f32) -> Result<String, RenderError>,
{
    fn render(&self, size: f32, parameter: f32) -> Result<String, RenderError> {
        self(size, parameter)
    }
}

/// Output target whose whole content is replaced on every paint.
pub trait PaintSink {
    fn set_content(&self, markup: &str) -> Result<(), PaintError>;
}

