//! Drawing tool selection.

/// Drawing tool selection.
///
/// The active tool determines what shape is created when the pointer drags
/// across the surface. The external shell selects tools explicitly; a
/// gesture keeps the tool it started with even if the selection changes
/// mid-drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Freehand drawing - follows the pointer path (default)
    Freehand,
    /// Rectangle outline - from corner to corner
    Rect,
    /// Circle outline - centered on the start point, through the pointer
    Circle,
}

impl Tool {
    /// Human-readable tool name for status display.
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Freehand => "Freehand",
            Tool::Rect => "Rectangle",
            Tool::Circle => "Circle",
        }
    }
}
