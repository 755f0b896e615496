//! Default encoder backend: an external ffmpeg process.
//!
//! Raw BGRA frames are written to the child's stdin; the WebM container
//! bytes stream back on stdout, where a reader thread chops them into
//! segments and forwards each one over the segment channel in read order.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use tokio::sync::mpsc;

use super::encoder::{EncoderBackend, EncoderHandle, EncoderSession, EncoderSettings};
use super::types::CaptureError;

const SEGMENT_CHUNK_BYTES: usize = 64 * 1024;

/// Spawns `ffmpeg` to encode raw frames into a WebM clip.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    binary: PathBuf,
}

impl FfmpegEncoder {
    /// Uses an explicit ffmpeg binary path.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl EncoderBackend for FfmpegEncoder {
    fn start(&self, settings: &EncoderSettings) -> Result<EncoderHandle, CaptureError> {
        let video_size = format!("{}x{}", settings.width, settings.height);
        let framerate = settings.framerate.to_string();

        let mut child = Command::new(&self.binary)
            .args(["-hide_banner", "-loglevel", "error"])
            .args(["-f", "rawvideo", "-pix_fmt", "bgra"])
            .arg("-video_size")
            .arg(&video_size)
            .arg("-framerate")
            .arg(&framerate)
            .args(["-i", "pipe:0"])
            .args(["-c:v", "libvpx", "-quality", "realtime", "-cpu-used", "8"])
            .args(["-f", "webm", "pipe:1"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| {
                CaptureError::Unavailable(format!(
                    "failed to launch {}: {err}",
                    self.binary.display()
                ))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CaptureError::Unavailable("encoder stdin not available".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CaptureError::Unavailable("encoder stdout not available".into()))?;

        let (segment_tx, segment_rx) = mpsc::unbounded_channel();
        let reader = std::thread::Builder::new()
            .name("inkboard-encoder-reader".into())
            .spawn(move || {
                let mut stdout = stdout;
                let mut chunk = vec![0u8; SEGMENT_CHUNK_BYTES];
                loop {
                    match stdout.read(&mut chunk) {
                        Ok(0) => break,
                        Ok(n) => {
                            if segment_tx.send(chunk[..n].to_vec()).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            log::warn!("Encoder output read failed: {err}");
                            break;
                        }
                    }
                }
            })
            .map_err(|err| {
                CaptureError::Unavailable(format!("failed to spawn encoder reader: {err}"))
            })?;

        log::info!(
            "Started {} for {}x{} @ {} fps",
            self.binary.display(),
            settings.width,
            settings.height,
            settings.framerate
        );

        Ok(EncoderHandle {
            session: Box::new(FfmpegSession {
                child,
                stdin: Some(stdin),
                reader: Some(reader),
            }),
            segments: segment_rx,
            extension: "webm".to_string(),
        })
    }
}

struct FfmpegSession {
    child: Child,
    stdin: Option<ChildStdin>,
    reader: Option<JoinHandle<()>>,
}

impl EncoderSession for FfmpegSession {
    fn push_frame(&mut self, frame: &[u8]) -> Result<(), CaptureError> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| CaptureError::Encoder("encoder input already closed".into()))?;
        stdin
            .write_all(frame)
            .map_err(|err| CaptureError::Encoder(format!("failed to feed frame: {err}")))
    }

    fn finish(mut self: Box<Self>) -> Result<(), CaptureError> {
        // Closing stdin signals end-of-stream; ffmpeg flushes and exits.
        drop(self.stdin.take());

        let status = self
            .child
            .wait()
            .map_err(|err| CaptureError::Encoder(format!("failed to wait for encoder: {err}")))?;

        // The process has exited, so stdout is at EOF and the reader thread
        // finishes after forwarding the last chunk.
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }

        if !status.success() {
            return Err(CaptureError::Encoder(format!(
                "encoder exited with {status}"
            )));
        }
        Ok(())
    }
}

impl Drop for FfmpegSession {
    fn drop(&mut self) {
        drop(self.stdin.take());
        // Already-finalized sessions have been reaped; anything else gets
        // killed so an abandoned recorder never leaks a child process.
        if !matches!(self.child.try_wait(), Ok(Some(_))) {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}
