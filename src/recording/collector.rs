use tracing::{debug, warn};

use super::status::{StatusSink, StatusUpdate};
use crate::audio::AnalysisSource;
use crate::session::RecordingSession;

/// Result of one collection tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A chunk was appended; the collector stays armed for the next tick
    Collected,
    /// The loop ended and will not collect again until re-armed
    Terminated,
}

/// Turns scheduler ticks into chunks.
///
/// One snapshot is requested per tick. Whether consecutive snapshots overlap
/// or skip audio depends on the tick rate versus the window duration and is
/// left as is.
pub struct SampleCollector<A> {
    source: A,
    armed: bool,
    ticks: u64,
}

impl<A: AnalysisSource> SampleCollector<A> {
    pub fn new(source: A) -> Self {
        Self {
            source,
            armed: false,
            ticks: 0,
        }
    }

    /// Start collecting on the next tick
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Ticks that produced a chunk since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one collection step against the session.
    ///
    /// Terminates quietly when the session has left `Recording` or the
    /// source has gone away; chunks already collected are left intact.
    pub fn on_tick(
        &mut self,
        session: &mut RecordingSession,
        status: &mut dyn StatusSink,
    ) -> TickOutcome {
        if !self.armed {
            return TickOutcome::Terminated;
        }

        if !session.is_recording() {
            debug!("Collection loop ended: session is {}", session.state());
            self.armed = false;
            return TickOutcome::Terminated;
        }

        let Some(snapshot) = self.source.snapshot(session.window_size()) else {
            warn!(
                "Analysis source unavailable; keeping {} chunks",
                session.chunk_count()
            );
            self.armed = false;
            return TickOutcome::Terminated;
        };

        if let Err(e) = session.append_snapshot(snapshot) {
            warn!("Dropping collection loop: {}", e);
            self.armed = false;
            return TickOutcome::Terminated;
        }

        self.ticks += 1;
        status.update(StatusUpdate::Live {
            elapsed_secs: session.elapsed_seconds(),
        });

        TickOutcome::Collected
    }
}
