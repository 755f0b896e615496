//! Data types for the recording pipeline.

use thiserror::Error;

/// The finalized recording: every captured segment concatenated in arrival
/// order, ready to be written out as one media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Encoded container bytes.
    pub data: Vec<u8>,
    /// Container file extension (e.g. "webm").
    pub extension: String,
}

impl Artifact {
    /// Total size of the encoded clip in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the clip contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Errors that can occur while recording the canvas.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No encoder could be started; the recorder stays stopped and the
    /// caller may retry.
    #[error("capture encoder unavailable: {0}")]
    Unavailable(String),

    /// The encoder session failed mid-recording.
    #[error("encoder session failed: {0}")]
    Encoder(String),

    /// Writing the exported artifact to disk failed.
    #[error("failed to save recording: {0}")]
    Save(#[from] std::io::Error),
}
