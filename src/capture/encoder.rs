//! Encoder abstraction for the recording pipeline.
//!
//! The recorder never talks to a concrete encoder directly: it asks an
//! [`EncoderBackend`] for a live [`EncoderSession`] and receives encoded
//! segments over a channel. The default backend drives an external ffmpeg
//! process; tests substitute scripted backends.

use tokio::sync::mpsc::UnboundedReceiver;

use super::types::CaptureError;

/// Parameters a backend needs to open an encoder session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderSettings {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Nominal frames per second declared to the container.
    pub framerate: u32,
}

/// Factory for encoder sessions. One backend can serve many recordings.
pub trait EncoderBackend: Send + Sync {
    /// Opens a live encoder for the given frame geometry.
    ///
    /// # Errors
    /// [`CaptureError::Unavailable`] when no encoder can be started; the
    /// recorder treats this as recoverable.
    fn start(&self, settings: &EncoderSettings) -> Result<EncoderHandle, CaptureError>;
}

/// A running encoder: the frame sink plus the segment stream it feeds.
pub struct EncoderHandle {
    /// Accepts raw frames and finalizes the stream.
    pub session: Box<dyn EncoderSession>,
    /// Encoded segments, delivered in the exact order the encoder emitted
    /// them. The sender side closes once the session has fully finalized.
    pub segments: UnboundedReceiver<Vec<u8>>,
    /// Container extension of the encoded stream (e.g. "webm").
    pub extension: String,
}

/// One active encoding session.
///
/// `finish` must not return before every segment the encoder produced has
/// been handed to the segment channel - the recorder drains the channel
/// right after finalization and anything still in flight would be lost.
pub trait EncoderSession: Send {
    /// Feeds one raw BGRA frame (row-major, 4 bytes per pixel).
    fn push_frame(&mut self, frame: &[u8]) -> Result<(), CaptureError>;

    /// Flushes and shuts down the encoder.
    fn finish(self: Box<Self>) -> Result<(), CaptureError>;
}
