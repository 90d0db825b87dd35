use serde::{Deserialize, Serialize};

/// Default FFT size; the analyser window is half of this (1024 samples,
/// about 23ms of audio at 44.1kHz)
pub const DEFAULT_FFT_SIZE: usize = 2048;

/// Configuration for a recording session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "capture-7f0c...")
    pub session_id: String,

    /// FFT size of the analysis buffer. Each chunk holds `fft_size / 2` samples.
    pub fft_size: usize,
}

impl SessionConfig {
    pub fn new(fft_size: usize) -> Self {
        Self {
            fft_size,
            ..Self::default()
        }
    }

    /// Number of samples captured per tick
    pub fn window_size(&self) -> usize {
        self.fft_size / 2
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("capture-{}", uuid::Uuid::new_v4()),
            fft_size: DEFAULT_FFT_SIZE,
        }
    }
}
