//! Shape definitions for the drawing tools.

use super::color::Color;
use super::render;
use super::surface::Surface;

/// Represents a drawable shape on the canvas.
///
/// Each variant corresponds to one drawing tool and carries its own color
/// and thickness, so a shape renders the same wherever it is replayed.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Straight line between two points - freehand strokes are built from
    /// one of these per pointer move
    Line {
        /// Starting X coordinate
        x1: i32,
        /// Starting Y coordinate
        y1: i32,
        /// Ending X coordinate
        x2: i32,
        /// Ending Y coordinate
        y2: i32,
        /// Stroke color
        color: Color,
        /// Line thickness in pixels
        thick: f64,
    },
    /// Rectangle outline spanning normalized bounds
    Rect {
        /// Top-left X coordinate
        x: i32,
        /// Top-left Y coordinate
        y: i32,
        /// Width in pixels (non-negative)
        w: i32,
        /// Height in pixels (non-negative)
        h: i32,
        /// Border color
        color: Color,
        /// Border thickness in pixels
        thick: f64,
    },
    /// Circle outline centered on the gesture start point
    Circle {
        /// Center X coordinate
        cx: i32,
        /// Center Y coordinate
        cy: i32,
        /// Radius in pixels (non-negative)
        radius: i32,
        /// Border color
        color: Color,
        /// Border thickness in pixels
        thick: f64,
    },
}

impl Shape {
    /// Rasterizes the shape onto a surface.
    pub fn render(&self, surface: &mut Surface) {
        match *self {
            Shape::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                thick,
            } => render::draw_line(surface, x1, y1, x2, y2, color.to_pixel(), thick),
            Shape::Rect {
                x,
                y,
                w,
                h,
                color,
                thick,
            } => render::stroke_rect(surface, x, y, w, h, color.to_pixel(), thick),
            Shape::Circle {
                cx,
                cy,
                radius,
                color,
                thick,
            } => render::stroke_circle(surface, cx, cy, radius, color.to_pixel(), thick),
        }
    }
}
