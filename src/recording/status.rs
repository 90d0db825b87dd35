use std::fmt;
use std::io::Write;

use tokio::sync::mpsc;

use crate::session::SessionSummary;

/// What the status display should show
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    /// Sent once per tick while recording
    Live { elapsed_secs: f64 },
    /// Sent once when an episode stops
    Finished(SessionSummary),
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusUpdate::Live { elapsed_secs } => write!(f, "Recording: {:.1}s", elapsed_secs),
            StatusUpdate::Finished(summary) => fmt::Display::fmt(summary, f),
        }
    }
}

/// Receiver of status lines
pub trait StatusSink {
    fn update(&mut self, status: StatusUpdate);
}

/// Collects every update, mostly useful for inspection in tests
impl StatusSink for Vec<StatusUpdate> {
    fn update(&mut self, status: StatusUpdate) {
        self.push(status);
    }
}

/// Forwards updates to another task; a closed receiver is ignored
impl StatusSink for mpsc::UnboundedSender<StatusUpdate> {
    fn update(&mut self, status: StatusUpdate) {
        let _ = self.send(status);
    }
}

/// Writes status lines to the terminal, rewriting the live line in place
pub struct ConsoleStatus {
    show_live: bool,
    json: bool,
}

impl ConsoleStatus {
    pub fn new(show_live: bool, json: bool) -> Self {
        Self { show_live, json }
    }
}

impl StatusSink for ConsoleStatus {
    fn update(&mut self, status: StatusUpdate) {
        match &status {
            StatusUpdate::Live { .. } => {
                if self.show_live {
                    print!("\r{}", status);
                    std::io::stdout().flush().ok();
                }
            }
            StatusUpdate::Finished(summary) => {
                let mut stdout = std::io::stdout().lock();
                if self.show_live {
                    writeln!(stdout).ok();
                }
                if self.json {
                    match serde_json::to_string(summary) {
                        Ok(json) => writeln!(stdout, "{}", json).ok(),
                        Err(e) => writeln!(stdout, "{} (JSON unavailable: {})", summary, e).ok(),
                    };
                } else {
                    writeln!(stdout, "{}", summary).ok();
                }
            }
        }
    }
}
