pub mod analyser;
pub mod backend;
pub mod tone;

#[cfg(feature = "microphone")]
pub mod microphone;

pub use analyser::{validate_fft_size, AnalysisSource, RollingAnalyser};
pub use backend::{AudioBackend, AudioBackendConfig, AudioBackendFactory, AudioFrame, AudioSource};
pub use tone::ToneBackend;
