//! Software rasterization of stroke primitives onto pixel surfaces.
//!
//! All drawing is done with a round brush so freehand strokes match the
//! rounded line caps of the committed shapes. Every write is bounds-guarded
//! by [`Surface::set_pixel`], so shapes that hang off the edge are clipped,
//! never rejected.

use super::surface::Surface;

/// Brush radius in pixels for a stroke thickness.
fn brush_radius(thick: f64) -> i32 {
    ((thick / 2.0).floor() as i32).max(0)
}

/// Stamps a filled disc of the brush at one point.
///
/// Radius 0 degrades to a single pixel.
pub(crate) fn stamp_brush(surface: &mut Surface, x: i32, y: i32, pixel: u32, radius: i32) {
    if radius <= 0 {
        surface.set_pixel(x, y, pixel);
        return;
    }

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                surface.set_pixel(x + dx, y + dy, pixel);
            }
        }
    }
}

/// Draws a straight line segment with the round brush.
///
/// Integer Bresenham walk stamping the brush at every step, so thickness is
/// uniform along the segment and a zero-length segment leaves a dot.
pub fn draw_line(surface: &mut Surface, x1: i32, y1: i32, x2: i32, y2: i32, pixel: u32, thick: f64) {
    let radius = brush_radius(thick);

    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);

    loop {
        stamp_brush(surface, x, y, pixel, radius);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draws an axis-aligned rectangle outline.
///
/// Expects normalized bounds (`w`/`h` non-negative). Zero width or height
/// degrades to a line; both zero degrades to a dot.
pub fn stroke_rect(surface: &mut Surface, x: i32, y: i32, w: i32, h: i32, pixel: u32, thick: f64) {
    let x2 = x + w.max(0);
    let y2 = y + h.max(0);

    draw_line(surface, x, y, x2, y, pixel, thick);
    draw_line(surface, x2, y, x2, y2, pixel, thick);
    draw_line(surface, x2, y2, x, y2, pixel, thick);
    draw_line(surface, x, y2, x, y, pixel, thick);
}

/// Draws a circle outline centered at (`cx`, `cy`).
///
/// Scans the bounding box and keeps pixels whose distance from the center is
/// within half a stroke width of the radius. Radius 0 degrades to a dot.
pub fn stroke_circle(surface: &mut Surface, cx: i32, cy: i32, radius: i32, pixel: u32, thick: f64) {
    let radius = radius.max(0);
    let half = (thick / 2.0).max(0.5);
    let pad = half.ceil() as i32 + 1;

    let min_x = (cx - radius - pad).max(0);
    let max_x = (cx + radius + pad).min(surface.width() as i32 - 1);
    let min_y = (cy - radius - pad).max(0);
    let max_y = (cy + radius + pad).min(surface.height() as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = f64::from(x - cx);
            let dy = f64::from(y - cy);
            let distance = (dx * dx + dy * dy).sqrt();
            if (distance - f64::from(radius)).abs() <= half {
                surface.set_pixel(x, y, pixel);
            }
        }
    }
}
