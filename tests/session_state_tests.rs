// Integration tests for the recording session state machine
//
// These tests verify the Idle → Recording → Stopped lifecycle, chunk
// accumulation rules and episode timing. Time is paused so elapsed values
// are exact.

use anyhow::Result;
use mic_sampler::session::{RecordingSession, SessionConfig, SessionState};
use std::time::Duration;

fn session(fft_size: usize) -> RecordingSession {
    RecordingSession::new(SessionConfig::new(fft_size))
}

#[test]
fn test_new_session_is_idle() {
    let session = session(2048);

    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.window_size(), 1024);
    assert_eq!(session.chunk_count(), 0);
    assert_eq!(session.episode(), 0);
    assert_eq!(session.elapsed_seconds(), 0.0);
    assert!(session.stats().is_none());
    assert!(session.session_id().starts_with("capture-"));
}

#[test]
fn test_stop_is_noop_when_idle() {
    let mut session = session(64);

    assert!(session.stop().is_none());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.last_summary().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_start_enters_recording_with_empty_chunks() {
    let mut session = session(64);

    session.start();

    assert_eq!(session.state(), SessionState::Recording);
    assert_eq!(session.chunk_count(), 0);
    assert_eq!(session.episode(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_freezes_chunks() -> Result<()> {
    let mut session = session(64);
    session.start();

    for i in 0..3 {
        session.append_snapshot(vec![i as f32; 32])?;
    }

    let summary = session.stop().expect("stop while recording returns a summary");
    assert_eq!(summary.chunk_count, 3);
    assert_eq!(summary.window_size, 32);
    assert_eq!(session.state(), SessionState::Stopped);

    // No further appends once stopped
    assert!(session.append_snapshot(vec![0.0; 32]).is_err());
    assert_eq!(session.chunk_count(), 3);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_second_stop_leaves_state_untouched() -> Result<()> {
    let mut session = session(64);
    session.start();
    session.append_snapshot(vec![0.5; 32])?;
    let first = session.stop();
    assert!(first.is_some());

    tokio::time::advance(Duration::from_secs(2)).await;

    assert!(session.stop().is_none());
    assert_eq!(session.state(), SessionState::Stopped);
    assert_eq!(session.chunk_count(), 1);
    assert_eq!(session.last_summary(), first.as_ref());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_restart_clears_previous_episode() -> Result<()> {
    let mut session = session(64);
    session.start();
    for _ in 0..5 {
        session.append_snapshot(vec![1.0; 32])?;
    }
    session.stop();
    assert_eq!(session.chunk_count(), 5);

    session.start();

    assert_eq!(session.state(), SessionState::Recording);
    assert_eq!(session.chunk_count(), 0, "start must reset the chunk sequence");
    assert_eq!(session.episode(), 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_start_while_recording_is_ignored() -> Result<()> {
    let mut session = session(64);
    session.start();
    session.append_snapshot(vec![1.0; 32])?;
    tokio::time::advance(Duration::from_millis(500)).await;

    session.start();

    assert_eq!(session.episode(), 1);
    assert_eq!(session.chunk_count(), 1);
    assert!((session.elapsed_seconds() - 0.5).abs() < 1e-9);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rejects_snapshot_of_wrong_length() {
    let mut session = session(64);
    session.start();

    assert!(session.append_snapshot(vec![0.0; 31]).is_err());
    assert!(session.append_snapshot(vec![0.0; 64]).is_err());
    assert_eq!(session.chunk_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_append_rejected_before_first_start() {
    let mut session = session(64);

    assert!(session.append_snapshot(vec![0.0; 32]).is_err());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_is_monotonic_and_resets_on_start() {
    let mut session = session(64);
    session.start();

    let mut last = session.elapsed_seconds();
    for _ in 0..10 {
        tokio::time::advance(Duration::from_millis(16)).await;
        let now = session.elapsed_seconds();
        assert!(now >= last);
        last = now;
    }
    assert!((last - 0.16).abs() < 1e-9);

    session.stop();
    tokio::time::advance(Duration::from_secs(3)).await;
    session.start();

    assert_eq!(session.elapsed_seconds(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_chunk_offsets_follow_episode_time() -> Result<()> {
    let mut session = session(64);
    session.start();

    tokio::time::advance(Duration::from_millis(100)).await;
    session.append_snapshot(vec![0.0; 32])?;
    tokio::time::advance(Duration::from_millis(100)).await;
    session.append_snapshot(vec![0.0; 32])?;

    let chunks = session.chunks();
    assert_eq!(chunks[0].index(), 0);
    assert_eq!(chunks[0].offset(), Duration::from_millis(100));
    assert_eq!(chunks[1].index(), 1);
    assert_eq!(chunks[1].offset(), Duration::from_millis(200));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_zero_elapsed_summary_has_zero_rate() {
    let mut session = session(2048);
    session.start();

    let summary = session.stop().expect("summary");

    assert_eq!(summary.chunk_count, 0);
    assert_eq!(summary.elapsed_secs, 0.0);
    assert_eq!(summary.effective_rate, 0.0);
    assert_eq!(
        summary.to_string(),
        "Recorded 0 chunks in 0.00s (0.00 chunks/s)"
    );
}

#[tokio::test(start_paused = true)]
async fn test_toggle_alternates_start_and_stop() {
    let mut session = session(64);

    assert!(session.toggle().is_none());
    assert_eq!(session.state(), SessionState::Recording);

    assert!(session.toggle().is_some());
    assert_eq!(session.state(), SessionState::Stopped);

    assert!(session.toggle().is_none());
    assert_eq!(session.state(), SessionState::Recording);
    assert_eq!(session.episode(), 2);
}

#[test]
fn test_idle_and_stopped_share_start_rule() {
    assert!(SessionState::Idle.can_start());
    assert!(SessionState::Stopped.can_start());
    assert!(!SessionState::Recording.can_start());

    assert_eq!(SessionState::Idle.action_label(), "Record");
    assert_eq!(SessionState::Stopped.action_label(), "Record");
    assert_eq!(SessionState::Recording.action_label(), "Stop");
}

#[tokio::test(start_paused = true)]
async fn test_summary_serializes_to_json() -> Result<()> {
    let mut session = session(64);
    session.start();
    session.append_snapshot(vec![0.0; 32])?;
    tokio::time::advance(Duration::from_millis(250)).await;
    let summary = session.stop().expect("summary");

    let json = serde_json::to_string(&summary)?;
    assert!(json.contains("\"chunk_count\":1"));
    assert!(json.contains("\"window_size\":32"));
    assert!(json.contains(session.session_id()));

    let parsed: mic_sampler::SessionSummary = serde_json::from_str(&json)?;
    assert_eq!(parsed, summary);

    Ok(())
}
