use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::collector::{SampleCollector, TickOutcome};
use super::scheduler::TickSource;
use super::status::{StatusSink, StatusUpdate};
use crate::audio::AnalysisSource;
use crate::session::{RecordingSession, SessionSummary};

/// User control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Stop when recording, start otherwise
    Toggle,
    /// Stop any active episode and leave the run loop
    Shutdown,
}

/// Owns a session together with its collection loop.
///
/// `run` is the repeating task: it waits for either a control command or a
/// scheduler tick and handles exactly one of them at a time, so a tick that
/// is already being handled always finishes before a stop is observed.
pub struct Recorder<A, T, S> {
    session: RecordingSession,
    collector: SampleCollector<A>,
    ticks: T,
    status: S,
}

impl<A, T, S> Recorder<A, T, S>
where
    A: AnalysisSource,
    T: TickSource,
    S: StatusSink,
{
    /// Requires a live analysis source, so recording can never start
    /// without one.
    pub fn new(session: RecordingSession, source: A, ticks: T, status: S) -> Self {
        Self {
            session,
            collector: SampleCollector::new(source),
            ticks,
            status,
        }
    }

    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    pub fn collector(&self) -> &SampleCollector<A> {
        &self.collector
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    /// Start a new episode and arm the collection loop
    pub fn start(&mut self) {
        let episode = self.session.episode();
        self.session.start();
        if self.session.episode() != episode {
            self.collector.arm();
        }
    }

    /// Stop the current episode and publish its summary.
    ///
    /// The collection loop notices on its next tick and ends itself.
    pub fn stop(&mut self) -> Option<SessionSummary> {
        let summary = self.session.stop()?;
        self.status.update(StatusUpdate::Finished(summary.clone()));
        Some(summary)
    }

    pub fn toggle(&mut self) -> Option<SessionSummary> {
        if self.session.is_recording() {
            self.stop()
        } else {
            self.start();
            None
        }
    }

    /// Handle a single scheduler tick
    pub fn tick(&mut self) -> TickOutcome {
        self.collector.on_tick(&mut self.session, &mut self.status)
    }

    /// Process control commands and ticks until shutdown.
    ///
    /// Returns the recorder so the frozen chunks stay available afterwards.
    pub async fn run(mut self, mut controls: mpsc::Receiver<Control>) -> Self {
        info!("Recorder ready: {}", self.session.session_id());

        loop {
            tokio::select! {
                biased;

                control = controls.recv() => match control {
                    Some(Control::Toggle) => {
                        self.toggle();
                        debug!(
                            "Session {}; next toggle: {}",
                            self.session.state(),
                            self.session.state().action_label()
                        );
                    }
                    Some(Control::Shutdown) | None => break,
                },

                tick = self.ticks.next_tick(), if self.collector.is_armed() => match tick {
                    Some(at) => {
                        if self.tick() == TickOutcome::Terminated {
                            debug!("Collection loop terminated at {:?}", at);
                        }
                    }
                    None => {
                        warn!("Frame scheduler closed; collection loop stopped");
                        self.collector.disarm();
                    }
                },
            }
        }

        self.stop();
        info!("Recorder shut down: {}", self.session.session_id());

        self
    }
}
