//! Scripted encoder backend shared by the recorder and engine tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use tokio::sync::mpsc::{self, UnboundedSender};

use super::encoder::{EncoderBackend, EncoderHandle, EncoderSession, EncoderSettings};
use super::types::CaptureError;

/// Test double for [`EncoderBackend`] with scriptable behavior.
pub(crate) struct MockBackend {
    unavailable: AtomicBool,
    emit_per_frame: bool,
    trailer: Option<Vec<u8>>,
    /// How many sessions were opened.
    pub(crate) started: AtomicUsize,
    /// How many frames were pushed across all sessions.
    pub(crate) frames: Arc<AtomicUsize>,
    /// Segment sender for the most recently opened session, so tests can
    /// inject segments as if the encoder emitted them.
    feed: Mutex<Option<UnboundedSender<Vec<u8>>>>,
}

impl MockBackend {
    /// A backend whose sessions emit nothing on their own.
    pub(crate) fn new() -> Self {
        Self {
            unavailable: AtomicBool::new(false),
            emit_per_frame: false,
            trailer: None,
            started: AtomicUsize::new(0),
            frames: Arc::new(AtomicUsize::new(0)),
            feed: Mutex::new(None),
        }
    }

    /// A backend whose sessions emit one segment per pushed frame.
    pub(crate) fn emitting_per_frame() -> Self {
        Self {
            emit_per_frame: true,
            ..Self::new()
        }
    }

    /// A backend that refuses to start until `set_available` is called.
    pub(crate) fn unavailable() -> Self {
        let backend = Self::new();
        backend.unavailable.store(true, Ordering::SeqCst);
        backend
    }

    /// A backend whose sessions emit one final segment during finalization,
    /// modelling an encoder flushing at shutdown.
    pub(crate) fn with_trailer(trailer: Vec<u8>) -> Self {
        Self {
            trailer: Some(trailer),
            ..Self::new()
        }
    }

    pub(crate) fn set_available(&self) {
        self.unavailable.store(false, Ordering::SeqCst);
    }

    /// Segment sender of the most recently opened session.
    pub(crate) fn feed(&self) -> UnboundedSender<Vec<u8>> {
        self.feed
            .lock()
            .unwrap()
            .clone()
            .expect("no session started")
    }
}

impl EncoderBackend for MockBackend {
    fn start(&self, _settings: &EncoderSettings) -> Result<EncoderHandle, CaptureError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CaptureError::Unavailable("mock encoder declined".into()));
        }

        self.started.fetch_add(1, Ordering::SeqCst);
        let (segment_tx, segment_rx) = mpsc::unbounded_channel();
        *self.feed.lock().unwrap() = Some(segment_tx.clone());

        Ok(EncoderHandle {
            session: Box::new(MockSession {
                feed: segment_tx,
                emit_per_frame: self.emit_per_frame,
                trailer: self.trailer.clone(),
                frames: Arc::clone(&self.frames),
            }),
            segments: segment_rx,
            extension: "webm".to_string(),
        })
    }
}

struct MockSession {
    feed: UnboundedSender<Vec<u8>>,
    emit_per_frame: bool,
    trailer: Option<Vec<u8>>,
    frames: Arc<AtomicUsize>,
}

impl EncoderSession for MockSession {
    fn push_frame(&mut self, _frame: &[u8]) -> Result<(), CaptureError> {
        let index = self.frames.fetch_add(1, Ordering::SeqCst);
        if self.emit_per_frame {
            let _ = self.feed.send(vec![index as u8]);
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<(), CaptureError> {
        if let Some(trailer) = self.trailer {
            let _ = self.feed.send(trailer);
        }
        Ok(())
    }
}
