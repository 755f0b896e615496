//! Screen-capture recording for the whiteboard engine.
//!
//! This module provides the recording pipeline:
//! - Starting and stopping an encoder bound to the canvas pixel stream
//! - Accumulating encoded segments in arrival order while recording
//! - Freezing the segments into a single exportable clip on stop
//! - Writing the exported clip to disk

pub mod encoder;
pub mod ffmpeg;
pub mod file;
pub mod types;

mod recorder;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
mod tests;

pub use encoder::{EncoderBackend, EncoderHandle, EncoderSession, EncoderSettings};
pub use ffmpeg::FfmpegEncoder;
pub use file::SaveConfig;
pub use recorder::Recorder;
pub use types::{Artifact, CaptureError};
