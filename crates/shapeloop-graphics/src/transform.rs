use std::f32::consts::PI;

use crate::geometry::{Point, Shape};

/// Maps a shape to a new shape.
pub trait Transformation {
    fn apply(&self, shape: Shape) -> Shape;
}

/// Rotation by an angle in degrees.
///
/// Angles are reduced modulo 360 before conversion, so an unbounded,
/// ever-growing angle keeps its precision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotate {
    pivot: Option<Point>,
    radians: f32,
}

impl Rotate {
    /// Rotates around the center of the shape it is applied to.
    pub fn degrees(degrees: f32) -> Self {
        Self {
            pivot: None,
            radians: degrees_to_radians(degrees),
        }
    }

    pub fn around(degrees: f32, pivot: Point) -> Self {
        Self {
            pivot: Some(pivot),
            radians: degrees_to_radians(degrees),
        }
    }

    pub fn radians(&self) -> f32 {
        self.radians
    }

    pub(crate) fn rotate_point(&self, point: Point, pivot: Point) -> Point {
        let (sin, cos) = self.radians.sin_cos();
        let d = point - pivot;
        Point::new(
            pivot.x + d.x * cos - d.y * sin,
            pivot.y + d.x * sin + d.y * cos,
        )
    }
}

fn degrees_to_radians(degrees: f32) -> f32 {
    (degrees % 360.0) * PI / 180.0
}

impl Transformation for Rotate {
    fn apply(&self, shape: Shape) -> Shape {
        let pivot = self.pivot.unwrap_or_else(|| shape.center());
        shape.map_points(|point| self.rotate_point(point, pivot))
    }
}

/// Rigid translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Translate {
    offset: Point,
}

impl Translate {
    pub fn by(dx: f32, dy: f32) -> Self {
        Self {
            offset: Point::new(dx, dy),
        }
    }

    /// Moves `distance` units along `direction`. A zero direction does not
    /// move anything.
    pub fn along(direction: Point, distance: f32) -> Self {
        let unit = direction.normalized();
        Self {
            offset: Point::new(unit.x * distance, unit.y * distance),
        }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }
}

impl Transformation for Translate {
    fn apply(&self, shape: Shape) -> Shape {
        let offset = self.offset;
        shape.map_points(|point| point + offset)
    }
}

/// Uniform scale about the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    factor: f32,
}

impl Scale {
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }
}

impl Transformation for Scale {
    fn apply(&self, shape: Shape) -> Shape {
        let factor = self.factor;
        shape.map_points(|point| Point::new(point.x * factor, point.y * factor))
    }
}

/// Applies a chain of transformations to a copy and keeps the original next
/// to the result.
#[derive(Default)]
pub struct Nest {
    transformations: Vec<Box<dyn Transformation>>,
}

impl Nest {
    pub fn new(transformations: Vec<Box<dyn Transformation>>) -> Self {
        Self { transformations }
    }

    pub fn then(mut self, transformation: impl Transformation + 'static) -> Self {
        self.transformations.push(Box::new(transformation));
        self
    }
}

impl Transformation for Nest {
    fn apply(&self, shape: Shape) -> Shape {
        let nested = self
            .transformations
            .iter()
            .fold(shape.clone(), |current, transformation| {
                transformation.apply(current)
            });
        shape.add(&nested)
    }
}

#[cfg(test)]
#[path = "tests/transform_tests.rs"]
mod tests;
