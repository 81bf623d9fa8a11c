use std::fmt::Write;

use crate::geometry::{Point, Shape};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const PATH_STYLE: &str = "fill:none;stroke:black;stroke-width:2";

/// Fixed-size SVG document whose center is the shape-space origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SvgCanvas {
    pub width: u32,
    pub height: u32,
}

impl SvgCanvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Serializes `shape`, one closed `<path>` per shape path. Empty paths
    /// are skipped.
    pub fn render(&self, shape: &Shape) -> String {
        let center = self.center();
        let mut svg = format!(
            "<svg width=\"{}\" height=\"{}\" xmlns=\"{SVG_NAMESPACE}\">",
            self.width, self.height
        );
        for path in &shape.paths {
            let mut points = path.points.iter().map(|point| *point + center);
            let Some(first) = points.next() else {
                continue;
            };
            // Writing into a String cannot fail.
            let _ = write!(svg, "<path d=\"M{} {} ", first.x, first.y);
            for point in points {
                let _ = write!(svg, "L{} {} ", point.x, point.y);
            }
            let _ = write!(svg, "Z\" style=\"{PATH_STYLE}\"/>");
        }
        svg.push_str("</svg>");
        svg
    }
}

impl Default for SvgCanvas {
    fn default() -> Self {
        Self::new(200, 200)
    }
}

#[cfg(test)]
#[path = "tests/svg_tests.rs"]
mod tests;
