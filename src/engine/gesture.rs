use crate::draw::Shape;
use crate::util;

use super::core::{DrawingState, Engine};
use super::tool::Tool;

impl Engine {
    /// Processes a pointer press event.
    ///
    /// # Arguments
    /// * `x` - Pointer X coordinate (clamped into the surface)
    /// * `y` - Pointer Y coordinate (clamped into the surface)
    ///
    /// # Behavior
    /// Starts a gesture with the current tool: snapshots the committed layer
    /// onto the undo stack (before any preview mutation), copies it into the
    /// working layer as the preview base, and enters the `Drawing` state.
    /// A press while a gesture is already active is a duplicate event and is
    /// ignored.
    pub fn on_press(&mut self, x: i32, y: i32) {
        if !matches!(self.state, DrawingState::Idle) {
            return;
        }

        let (x, y) = self.committed.clamp_point(x, y);
        let snapshot = self.committed.snapshot();
        self.history.push(snapshot.clone());
        self.working.copy_from(&self.committed);

        if self.tool == Tool::Freehand {
            // A click that never moves still leaves a visible dot.
            Shape::Line {
                x1: x,
                y1: y,
                x2: x,
                y2: y,
                color: self.current_color,
                thick: self.current_thickness,
            }
            .render(&mut self.working);
        }

        self.state = DrawingState::Drawing {
            tool: self.tool,
            start_x: x,
            start_y: y,
            last_x: x,
            last_y: y,
            base: snapshot,
        };
        self.needs_redraw = true;
        self.capture_frame();
    }

    /// Processes a pointer move event.
    ///
    /// # Behavior
    /// - Freehand: extends the stroke with a segment from the previous point
    ///   to the current one - the path itself is the persistent preview.
    /// - Rectangle/Circle: restores the working layer from the frozen
    ///   preview base, then renders the shape spanned by the gesture start
    ///   and the current point.
    ///
    /// Calling this twice with the same coordinates produces identical
    /// pixels. Moves outside a gesture are ignored.
    pub fn on_move(&mut self, x: i32, y: i32) {
        let (x, y) = self.committed.clamp_point(x, y);
        let color = self.current_color;
        let thick = self.current_thickness;

        let DrawingState::Drawing {
            tool,
            start_x,
            start_y,
            last_x,
            last_y,
            base,
        } = &mut self.state
        else {
            return;
        };

        let shape = match *tool {
            Tool::Freehand => Shape::Line {
                x1: *last_x,
                y1: *last_y,
                x2: x,
                y2: y,
                color,
                thick,
            },
            Tool::Rect => {
                self.working.restore(base);
                let (rx, ry, w, h) = util::rect_bounds(*start_x, *start_y, x, y);
                Shape::Rect {
                    x: rx,
                    y: ry,
                    w,
                    h,
                    color,
                    thick,
                }
            }
            Tool::Circle => {
                self.working.restore(base);
                Shape::Circle {
                    cx: *start_x,
                    cy: *start_y,
                    radius: util::circle_radius(*start_x, *start_y, x, y),
                    color,
                    thick,
                }
            }
        };

        shape.render(&mut self.working);
        *last_x = x;
        *last_y = y;

        self.needs_redraw = true;
        self.capture_frame();
    }

    /// Processes a pointer release event.
    ///
    /// Folds the working-layer preview into the committed layer and returns
    /// to `Idle`. Afterwards the two layers are pixel-identical - no stale
    /// preview survives a completed gesture.
    pub fn on_release(&mut self) {
        if !matches!(self.state, DrawingState::Drawing { .. }) {
            return;
        }

        self.committed.copy_from(&self.working);
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
        log::debug!("Gesture committed");
        self.capture_frame();
    }

    /// Processes the pointer leaving the surface.
    ///
    /// Treated identically to a release: the in-progress shape is finalized
    /// rather than discarded, so no orphaned preview is left behind.
    pub fn on_leave(&mut self) {
        self.on_release();
    }
}
