use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary of one finished recording episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session the episode belongs to
    pub session_id: String,

    /// Episode number within the session (1 for the first recording)
    pub episode: u64,

    /// Wall-clock time the episode started
    pub started_at: DateTime<Utc>,

    /// Number of chunks collected
    pub chunk_count: usize,

    /// Samples per chunk
    pub window_size: usize,

    /// Episode duration in seconds, measured at stop
    pub elapsed_secs: f64,

    /// Ticks actually achieved per second. Not the audio sample rate.
    pub effective_rate: f64,
}

impl SessionSummary {
    /// Chunks per second, `0.0` when no time has elapsed
    pub fn rate(chunk_count: usize, elapsed_secs: f64) -> f64 {
        if elapsed_secs > 0.0 {
            chunk_count as f64 / elapsed_secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recorded {} chunks in {:.2}s ({:.2} chunks/s)",
            self.chunk_count, self.elapsed_secs, self.effective_rate
        )
    }
}
