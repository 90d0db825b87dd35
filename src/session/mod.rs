//! Recording session management
//!
//! This module provides the `RecordingSession` state machine that manages:
//! - The Idle → Recording → Stopped lifecycle
//! - The in-memory chunk sequence of the current episode
//! - Episode timing and the stop summary

mod chunk;
mod config;
mod session;
mod state;
mod stats;

pub use chunk::Chunk;
pub use config::{SessionConfig, DEFAULT_FFT_SIZE};
pub use session::RecordingSession;
pub use state::SessionState;
pub use stats::SessionSummary;
