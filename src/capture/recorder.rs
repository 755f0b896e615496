use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::draw::Surface;

use super::encoder::{EncoderBackend, EncoderSession, EncoderSettings};
use super::types::{Artifact, CaptureError};

/// Recording pipeline state machine.
///
/// Two states: `Stopped` and `Recording`. While recording, frames pushed by
/// the engine flow into the encoder session and encoded segments flow back
/// over the segment channel; the recorder accumulates them in arrival
/// order. On stop the encoder is finalized, every remaining segment is
/// drained - including any that arrived after stop was requested - and the
/// segments freeze into a single exportable [`Artifact`].
pub struct Recorder {
    backend: Arc<dyn EncoderBackend>,
    framerate: u32,
    state: RecorderState,
    /// Non-empty segments received so far, in arrival order.
    pending: Vec<Vec<u8>>,
    /// Finalized clip from the most recently stopped recording.
    artifact: Option<Artifact>,
}

enum RecorderState {
    Stopped,
    Recording {
        session: Box<dyn EncoderSession>,
        segments: UnboundedReceiver<Vec<u8>>,
        extension: String,
    },
}

impl Recorder {
    /// Creates a stopped recorder bound to an encoder backend.
    pub fn new(backend: Arc<dyn EncoderBackend>, framerate: u32) -> Self {
        Self {
            backend,
            framerate,
            state: RecorderState::Stopped,
            pending: Vec::new(),
            artifact: None,
        }
    }

    /// Whether a recording session is active.
    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Opens an encoder session for the given frame geometry.
    ///
    /// A start while already recording is a guarded no-op, not an error.
    ///
    /// # Errors
    /// [`CaptureError::Unavailable`] when the backend cannot provide an
    /// encoder; the recorder remains `Stopped` and the caller may retry.
    pub fn start(&mut self, width: u32, height: u32) -> Result<(), CaptureError> {
        if self.is_recording() {
            log::debug!("Recording start requested while already recording; ignoring");
            return Ok(());
        }

        let handle = self.backend.start(&EncoderSettings {
            width,
            height,
            framerate: self.framerate,
        })?;

        self.pending.clear();
        self.state = RecorderState::Recording {
            session: handle.session,
            segments: handle.segments,
            extension: handle.extension,
        };
        log::info!("Recording started ({width}x{height})");
        Ok(())
    }

    /// Feeds the current surface content to the encoder as one frame.
    ///
    /// Ignored while stopped. An encoder failure mid-recording aborts the
    /// session, salvaging the segments captured so far.
    pub fn capture_frame(&mut self, surface: &Surface) {
        let RecorderState::Recording { session, .. } = &mut self.state else {
            return;
        };

        let frame = frame_bytes(surface);
        if let Err(err) = session.push_frame(&frame) {
            log::error!("Encoder rejected frame: {err}; stopping recording");
            if let Err(stop_err) = self.stop() {
                log::warn!("Encoder shutdown after failure also failed: {stop_err}");
            }
            return;
        }

        self.poll_segments();
    }

    /// Finalizes the encoder and freezes the captured segments.
    ///
    /// Segments already in flight when stop is requested are still drained
    /// and included - there is no data loss at the boundary. Stopping with
    /// zero captured segments leaves nothing to export.
    pub fn stop(&mut self) -> Result<(), CaptureError> {
        let state = std::mem::replace(&mut self.state, RecorderState::Stopped);
        let RecorderState::Recording {
            session,
            mut segments,
            extension,
        } = state
        else {
            log::debug!("Recording stop requested while stopped; ignoring");
            return Ok(());
        };

        let finish_result = session.finish();

        // finish() does not return until the encoder has emitted everything,
        // so a non-blocking drain collects the complete tail.
        while let Ok(segment) = segments.try_recv() {
            if !segment.is_empty() {
                self.pending.push(segment);
            }
        }

        let segment_count = self.pending.len();
        let data: Vec<u8> = self.pending.drain(..).flatten().collect();
        self.artifact = if data.is_empty() {
            None
        } else {
            Some(Artifact {
                data,
                extension,
            })
        };

        match &self.artifact {
            Some(artifact) => log::info!(
                "Recording stopped: {} segments, {} bytes",
                segment_count,
                artifact.len()
            ),
            None => log::info!("Recording stopped with no captured segments"),
        }

        finish_result
    }

    /// The finalized clip, if the last recording captured any segment.
    pub fn export(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// Moves freshly arrived segments into the pending list, in arrival
    /// order, discarding empty ones.
    fn poll_segments(&mut self) {
        let RecorderState::Recording { segments, .. } = &mut self.state else {
            return;
        };
        while let Ok(segment) = segments.try_recv() {
            if segment.is_empty() {
                log::debug!("Discarding empty segment");
                continue;
            }
            self.pending.push(segment);
        }
    }
}

/// Serializes a surface into the raw BGRA byte layout the encoders expect.
fn frame_bytes(surface: &Surface) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(surface.pixels().len() * 4);
    for pixel in surface.pixels() {
        // ARGB8888 in little-endian byte order is exactly BGRA.
        bytes.extend_from_slice(&pixel.to_le_bytes());
    }
    bytes
}
