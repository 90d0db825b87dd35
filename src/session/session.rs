use super::chunk::Chunk;
use super::config::SessionConfig;
use super::state::SessionState;
use super::stats::SessionSummary;
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// A recording session: the state machine plus the chunks of the current episode
///
/// The session is owned by a single task. Every tick and every control
/// command runs to completion against `&mut self`, so the chunk sequence
/// never sees concurrent mutation.
#[derive(Debug)]
pub struct RecordingSession {
    config: SessionConfig,

    state: SessionState,

    /// Monotonic start of the current episode
    started_at: Option<Instant>,

    /// Wall-clock start of the current episode, for reporting
    started_wall: Option<DateTime<Utc>>,

    /// Number of episodes started so far
    episode: u64,

    chunks: Vec<Chunk>,

    last_summary: Option<SessionSummary>,
}

impl RecordingSession {
    /// Create a new session in the `Idle` state
    pub fn new(config: SessionConfig) -> Self {
        info!(
            "Creating recording session: {} ({} samples per chunk)",
            config.session_id,
            config.window_size()
        );

        Self {
            config,
            state: SessionState::Idle,
            started_at: None,
            started_wall: None,
            episode: 0,
            chunks: Vec::new(),
            last_summary: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    pub fn window_size(&self) -> usize {
        self.config.window_size()
    }

    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// Chunks of the current (or last finished) episode, in capture order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Summary produced by the most recent `stop()`
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    /// Begin a new episode.
    ///
    /// Clears the chunks of any previous episode and stamps a new start
    /// time. Has no effect while already recording.
    pub fn start(&mut self) {
        if !self.state.can_start() {
            warn!("Recording already started");
            return;
        }

        self.chunks.clear();
        self.started_at = Some(Instant::now());
        self.started_wall = Some(Utc::now());
        self.episode += 1;
        self.state = SessionState::Recording;

        info!(
            "Recording started: {} (episode {})",
            self.config.session_id, self.episode
        );
    }

    /// Finish the current episode and return its summary.
    ///
    /// Returns `None` without touching anything when not recording.
    pub fn stop(&mut self) -> Option<SessionSummary> {
        if !self.state.is_recording() {
            debug!("Stop ignored: session is {}", self.state);
            return None;
        }

        let elapsed_secs = self.elapsed_seconds();
        self.state = SessionState::Stopped;

        let summary = self.build_summary(elapsed_secs);
        info!("Recording stopped: {}", summary);

        self.last_summary = Some(summary.clone());
        Some(summary)
    }

    /// Stop when recording, start otherwise
    pub fn toggle(&mut self) -> Option<SessionSummary> {
        if self.state.is_recording() {
            self.stop()
        } else {
            self.start();
            None
        }
    }

    /// Seconds since the current episode started, `0.0` before the first start
    pub fn elapsed_seconds(&self) -> f64 {
        self.started_at
            .map(|started| started.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Statistics for the current episode so far
    pub fn stats(&self) -> Option<SessionSummary> {
        if self.started_wall.is_none() {
            return None;
        }
        Some(self.build_summary(self.elapsed_seconds()))
    }

    /// Append one analyser snapshot as the next chunk.
    ///
    /// Fails when not recording or when the snapshot is not exactly one
    /// window long.
    pub fn append_snapshot(&mut self, samples: Vec<f32>) -> Result<&Chunk> {
        if !self.state.is_recording() {
            bail!("Cannot append a chunk while {}", self.state);
        }

        let window_size = self.window_size();
        if samples.len() != window_size {
            bail!(
                "Snapshot has {} samples, expected {}",
                samples.len(),
                window_size
            );
        }

        let offset = self
            .started_at
            .map(|started| started.elapsed())
            .unwrap_or_default();
        let chunk = Chunk::new(self.chunks.len(), offset, samples);
        self.chunks.push(chunk);

        Ok(&self.chunks[self.chunks.len() - 1])
    }

    fn build_summary(&self, elapsed_secs: f64) -> SessionSummary {
        let chunk_count = self.chunks.len();

        SessionSummary {
            session_id: self.config.session_id.clone(),
            episode: self.episode,
            started_at: self.started_wall.unwrap_or_else(Utc::now),
            chunk_count,
            window_size: self.window_size(),
            elapsed_secs,
            effective_rate: SessionSummary::rate(chunk_count, elapsed_secs),
        }
    }
}
