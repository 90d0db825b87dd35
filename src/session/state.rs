use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a recording session.
///
/// ```text
/// Idle ──start──▶ Recording ──stop──▶ Stopped
///                     ▲                  │
///                     └──────start───────┘
/// ```
///
/// There is no way back to `Idle`; `Stopped` is the end of one episode,
/// not of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// No episode has been recorded yet
    #[default]
    Idle,
    /// Samples are being collected on every tick
    Recording,
    /// The last episode is finished; its chunks are frozen
    Stopped,
}

impl SessionState {
    /// `Idle` and `Stopped` both re-enter `Recording` the same way.
    pub fn can_start(&self) -> bool {
        !matches!(self, SessionState::Recording)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, SessionState::Recording)
    }

    /// Label for the toggle control: the action it will perform next
    pub fn action_label(&self) -> &'static str {
        match self {
            SessionState::Recording => "Stop",
            SessionState::Idle | SessionState::Stopped => "Record",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Recording => "recording",
            SessionState::Stopped => "stopped",
        };
        f.write_str(label)
    }
}
