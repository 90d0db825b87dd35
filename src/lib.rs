pub mod audio;
pub mod config;
pub mod recording;
pub mod session;

pub use audio::{
    AnalysisSource, AudioBackend, AudioBackendConfig, AudioBackendFactory, AudioFrame, AudioSource,
    RollingAnalyser,
};
pub use config::Config;
pub use recording::{
    Control, FrameTicker, Recorder, SampleCollector, StatusSink, StatusUpdate, TickOutcome,
    TickSource,
};
pub use session::{Chunk, RecordingSession, SessionConfig, SessionState, SessionSummary};
