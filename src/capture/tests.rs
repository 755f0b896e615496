use std::sync::{Arc, atomic::Ordering};

use crate::draw::Surface;

use super::mock::MockBackend;
use super::recorder::Recorder;
use super::types::CaptureError;

fn surface() -> Surface {
    Surface::new(16, 16).unwrap()
}

#[test]
fn segments_are_collected_in_arrival_order_and_empties_discarded() {
    let backend = Arc::new(MockBackend::new());
    let mut recorder = Recorder::new(backend.clone(), 30);

    recorder.start(16, 16).unwrap();
    let feed = backend.feed();
    feed.send(vec![1, 2]).unwrap();
    feed.send(Vec::new()).unwrap();
    feed.send(vec![3]).unwrap();

    recorder.stop().unwrap();

    let artifact = recorder.export().expect("two non-empty segments captured");
    assert_eq!(artifact.data, vec![1, 2, 3]);
    assert_eq!(artifact.extension, "webm");
}

#[test]
fn export_before_any_segment_returns_none() {
    let backend = Arc::new(MockBackend::new());
    let mut recorder = Recorder::new(backend, 30);

    recorder.start(16, 16).unwrap();
    assert!(recorder.export().is_none());
}

#[test]
fn stop_with_zero_segments_leaves_nothing_to_export() {
    let backend = Arc::new(MockBackend::new());
    let mut recorder = Recorder::new(backend, 30);

    recorder.start(16, 16).unwrap();
    recorder.stop().unwrap();

    assert!(!recorder.is_recording());
    assert!(recorder.export().is_none());
}

#[test]
fn start_while_recording_is_a_noop() {
    let backend = Arc::new(MockBackend::new());
    let mut recorder = Recorder::new(backend.clone(), 30);

    recorder.start(16, 16).unwrap();
    recorder.start(16, 16).unwrap();

    assert!(recorder.is_recording());
    assert_eq!(backend.started.load(Ordering::SeqCst), 1);
}

#[test]
fn stop_while_stopped_is_a_noop() {
    let backend = Arc::new(MockBackend::new());
    let mut recorder = Recorder::new(backend, 30);

    recorder.stop().unwrap();
    assert!(!recorder.is_recording());
    assert!(recorder.export().is_none());
}

#[test]
fn unavailable_backend_leaves_recorder_stopped_and_retry_succeeds() {
    let backend = Arc::new(MockBackend::unavailable());
    let mut recorder = Recorder::new(backend.clone(), 30);

    let err = recorder.start(16, 16).expect_err("backend declined");
    assert!(matches!(err, CaptureError::Unavailable(_)));
    assert!(!recorder.is_recording());

    backend.set_available();
    recorder.start(16, 16).unwrap();
    assert!(recorder.is_recording());
}

#[test]
fn frames_flow_to_the_encoder_and_segments_back() {
    let backend = Arc::new(MockBackend::emitting_per_frame());
    let mut recorder = Recorder::new(backend.clone(), 30);
    let canvas = surface();

    recorder.start(16, 16).unwrap();
    recorder.capture_frame(&canvas);
    recorder.capture_frame(&canvas);
    recorder.stop().unwrap();

    assert_eq!(backend.frames.load(Ordering::SeqCst), 2);
    let artifact = recorder.export().expect("one segment per frame");
    assert_eq!(artifact.data, vec![0, 1]);
}

#[test]
fn segments_emitted_during_finalization_are_included() {
    let backend = Arc::new(MockBackend::with_trailer(vec![9, 9]));
    let mut recorder = Recorder::new(backend.clone(), 30);

    recorder.start(16, 16).unwrap();
    backend.feed().send(vec![5]).unwrap();
    recorder.stop().unwrap();

    let artifact = recorder.export().expect("segment plus trailer captured");
    assert_eq!(artifact.data, vec![5, 9, 9]);
}

#[test]
fn a_new_recording_replaces_the_previous_artifact() {
    let backend = Arc::new(MockBackend::new());
    let mut recorder = Recorder::new(backend.clone(), 30);

    recorder.start(16, 16).unwrap();
    backend.feed().send(vec![7]).unwrap();
    recorder.stop().unwrap();
    assert!(recorder.export().is_some());

    recorder.start(16, 16).unwrap();
    recorder.stop().unwrap();
    assert!(recorder.export().is_none());
}

#[test]
fn capture_frame_while_stopped_is_ignored() {
    let backend = Arc::new(MockBackend::emitting_per_frame());
    let mut recorder = Recorder::new(backend.clone(), 30);

    recorder.capture_frame(&surface());
    assert_eq!(backend.frames.load(Ordering::SeqCst), 0);
    assert!(recorder.export().is_none());
}
