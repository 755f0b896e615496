//! Drawing engine state machine and session coordination.

use crate::capture::{Artifact, CaptureError, Recorder, SaveConfig, file};
use crate::draw::{Color, Snapshot, Surface, SurfaceError, color::WHITE};
use std::path::PathBuf;

use super::history::History;
use super::tool::Tool;

/// Current gesture state machine.
///
/// Tracks whether the pointer is idle or mid-gesture. Transitions occur on
/// press, move, and release/leave events dispatched by the external shell.
#[derive(Debug)]
pub enum DrawingState {
    /// Not actively drawing - waiting for a press
    Idle,
    /// Actively previewing a shape (pointer held down)
    Drawing {
        /// Which tool this gesture uses (frozen at press time)
        tool: Tool,
        /// Starting X coordinate (where the pointer was pressed)
        start_x: i32,
        /// Starting Y coordinate (where the pointer was pressed)
        start_y: i32,
        /// Most recent pointer X coordinate
        last_x: i32,
        /// Most recent pointer Y coordinate
        last_y: i32,
        /// Committed-layer content frozen at press time; rectangle and
        /// circle previews are redrawn from this base on every move
        base: Snapshot,
    },
}

/// The whiteboard engine: surfaces, undo history, gesture state, recorder.
///
/// This is the single stateful coordinator the external shell talks to. It
/// owns the committed/working surface pair, processes pointer events into
/// shape previews and commits, maintains snapshot-based undo, and taps the
/// visible surface into the recording pipeline after every state change.
pub struct Engine {
    /// Committed layer - all finalized strokes; the source of truth
    pub(super) committed: Surface,
    /// Working layer - in-progress preview on top of the committed content
    pub(super) working: Surface,
    /// Undo stack of committed-layer snapshots
    pub(super) history: History,
    /// Screen-capture recording pipeline
    recorder: Recorder,
    /// Current gesture state machine
    pub state: DrawingState,
    /// Tool used for the next gesture
    pub(super) tool: Tool,
    /// Current stroke color
    pub current_color: Color,
    /// Current stroke thickness in pixels
    pub current_thickness: f64,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
}

impl Engine {
    /// Creates an engine with the default white 2px brush.
    ///
    /// # Errors
    /// Returns [`SurfaceError`] when the surface pair cannot be allocated;
    /// the engine instance is unusable in that case and the shell should
    /// present a disabled state.
    pub fn new(width: u32, height: u32, recorder: Recorder) -> Result<Self, SurfaceError> {
        Self::with_brush(width, height, WHITE, 2.0, recorder)
    }

    /// Creates an engine with an explicit brush color and thickness.
    pub fn with_brush(
        width: u32,
        height: u32,
        color: Color,
        thickness: f64,
        recorder: Recorder,
    ) -> Result<Self, SurfaceError> {
        let committed = Surface::new(width, height)?;
        let working = committed.clone();

        Ok(Self {
            committed,
            working,
            history: History::new(),
            recorder,
            state: DrawingState::Idle,
            tool: Tool::Freehand,
            current_color: color,
            current_thickness: thickness,
            needs_redraw: true,
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.committed.width()
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.committed.height()
    }

    /// Selects the tool used for the next gesture.
    ///
    /// A gesture already in progress keeps the tool it started with.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::debug!("Tool changed to {}", tool.label());
            self.tool = tool;
        }
    }

    /// Tool used for the next gesture.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Whether a gesture is currently in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Whether a recording session is active.
    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Whether `undo` would revert a gesture.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Whether a finalized recording is available for export.
    pub fn can_export(&self) -> bool {
        self.recorder.export().is_some()
    }

    /// The committed layer (finalized strokes only).
    pub fn committed(&self) -> &Surface {
        &self.committed
    }

    /// The working layer (committed content plus any live preview).
    pub fn working(&self) -> &Surface {
        &self.working
    }

    /// The surface the shell should display right now.
    ///
    /// During a gesture this is the working layer; otherwise the committed
    /// layer, which the working layer mirrors anyway.
    pub fn visible(&self) -> &Surface {
        if self.is_drawing() {
            &self.working
        } else {
            &self.committed
        }
    }

    /// Reverts the most recent gesture.
    ///
    /// Returns `false` when there is nothing to undo; both surfaces are left
    /// untouched in that case. A gesture still in progress is abandoned
    /// first - the snapshot pushed at its start is the top of the stack, so
    /// one undo reverts straight to the pre-gesture state.
    pub fn undo(&mut self) -> bool {
        if self.is_drawing() {
            log::debug!("Undo requested mid-gesture; abandoning the preview");
            self.state = DrawingState::Idle;
        }

        match self.history.pop() {
            Some(snapshot) => {
                self.committed.restore(&snapshot);
                self.working.restore(&snapshot);
                self.needs_redraw = true;
                log::debug!("Undo applied; {} snapshots remain", self.history.len());
                self.capture_frame();
                true
            }
            None => {
                log::debug!("Undo requested with empty history");
                false
            }
        }
    }

    /// Clears both surfaces and the undo history together.
    ///
    /// No partial clear is ever observable: pixels and history go in the
    /// same call, and any in-progress gesture is dropped with them.
    pub fn clear_all(&mut self) {
        self.committed.clear();
        self.working.clear();
        self.history.clear();
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
        log::info!("Canvas and undo history cleared");
        self.capture_frame();
    }

    /// Starts or stops the recording session.
    ///
    /// Returns the new recording flag. Start failures leave the recorder
    /// stopped and are recoverable - the shell may simply retry.
    pub fn toggle_recording(&mut self) -> Result<bool, CaptureError> {
        if self.recorder.is_recording() {
            self.recorder.stop()?;
            Ok(false)
        } else {
            self.recorder
                .start(self.committed.width(), self.committed.height())?;
            // Seed the clip with the current canvas content.
            self.capture_frame();
            Ok(true)
        }
    }

    /// The finalized recording, if at least one segment was captured.
    pub fn export_recording(&self) -> Option<&Artifact> {
        self.recorder.export()
    }

    /// Writes the finalized recording to disk.
    ///
    /// Returns `Ok(None)` when there is nothing to export - that is an
    /// ordinary state, not an error.
    pub fn save_recording(&self, config: &SaveConfig) -> Result<Option<PathBuf>, CaptureError> {
        match self.recorder.export() {
            Some(artifact) => file::save_artifact(artifact, config).map(Some),
            None => Ok(None),
        }
    }

    /// Feeds the currently visible composite into the recorder.
    ///
    /// Called after every state-changing operation; a stopped recorder
    /// ignores it.
    pub(super) fn capture_frame(&mut self) {
        if !self.recorder.is_recording() {
            return;
        }
        let surface = if matches!(self.state, DrawingState::Drawing { .. }) {
            &self.working
        } else {
            &self.committed
        };
        self.recorder.capture_frame(surface);
    }
}
