use std::ops::{Add, Sub};

use crate::transform::Transformation;

/// A point in shape space. The y axis points down, as in SVG.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        (*self - *other).length()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector with the same direction. The zero vector stays zero.
    pub fn normalized(&self) -> Point {
        let length = self.length();
        if length == 0.0 {
            return Point::ORIGIN;
        }
        Point::new(self.x / length, self.y / length)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An open polyline; SVG output closes it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self::new(vec![from, to])
    }

    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Path {
        Path::new(self.points.iter().copied().map(f).collect())
    }
}

/// A set of paths drawn together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub paths: Vec<Path>,
}

impl Shape {
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    /// Axis-aligned square of side `side` centered on the origin.
    pub fn square(side: f32) -> Self {
        let half = side / 2.0;
        let corners = [
            Point::new(-half, -half),
            Point::new(half, -half),
            Point::new(half, half),
            Point::new(-half, half),
        ];
        let edges = (0..corners.len())
            .map(|i| Path::line(corners[i], corners[(i + 1) % corners.len()]))
            .collect();
        Self::new(edges)
    }

    pub fn horizontal_line(length: f32) -> Self {
        Self::new(vec![Path::line(Point::ORIGIN, Point::new(length, 0.0))])
    }

    pub fn vertical_line(length: f32) -> Self {
        Self::new(vec![Path::line(Point::ORIGIN, Point::new(0.0, length))])
    }

    /// Paths of `self` followed by the paths of `other`.
    pub fn add(&self, other: &Shape) -> Shape {
        let paths = self.paths.iter().chain(other.paths.iter()).cloned().collect();
        Shape::new(paths)
    }

    /// Mean of every point of every path. An empty shape centers on the
    /// origin.
    pub fn center(&self) -> Point {
        let (sum, count) = self
            .points()
            .fold((Point::ORIGIN, 0u32), |(sum, count), point| (sum + point, count + 1));
        if count == 0 {
            return Point::ORIGIN;
        }
        Point::new(sum.x / count as f32, sum.y / count as f32)
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.paths.iter().flat_map(|path| path.points.iter().copied())
    }

    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Shape {
        Shape::new(self.paths.iter().map(|path| path.map_points(&f)).collect())
    }

    pub fn transformed(self, transformation: &dyn Transformation) -> Shape {
        transformation.apply(self)
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
