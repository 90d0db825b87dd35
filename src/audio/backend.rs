use anyhow::Result;
use tokio::sync::mpsc;

/// Audio sample data (f32 in [-1.0, 1.0], interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (interleaved)
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

impl AudioFrame {
    /// Average the interleaved channels down to one
    pub fn to_mono(&self) -> Vec<f32> {
        match self.channels {
            0 => Vec::new(),
            1 => self.samples.clone(),
            n => self
                .samples
                .chunks_exact(n as usize)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect(),
        }
    }
}

/// Configuration for audio backend
#[derive(Debug, Clone)]
pub struct AudioBackendConfig {
    /// Sample rate for generated audio (live devices report their own)
    pub sample_rate: u32,
    /// Block length in milliseconds for generated audio
    pub block_ms: u64,
    /// Frequency of the synthetic tone in Hz
    pub tone_hz: f32,
}

impl Default for AudioBackendConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100, // Typical hardware rate
            block_ms: 10,       // 441 samples per block
            tone_hz: 440.0,
        }
    }
}

/// Audio capture backend trait
///
/// Implementations:
/// - Tone: synthetic sine wave, always available
/// - Microphone: default input device through cpal (`microphone` feature)
#[async_trait::async_trait]
pub trait AudioBackend: Send {
    /// Start capturing audio
    ///
    /// Returns a channel receiver that will receive audio frames
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>>;

    /// Stop capturing audio
    async fn stop(&mut self) -> Result<()>;

    /// Check if backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Audio backend factory
pub struct AudioBackendFactory;

impl AudioBackendFactory {
    /// Create audio backend based on source and configuration
    pub fn create(source: AudioSource, config: AudioBackendConfig) -> Result<Box<dyn AudioBackend>> {
        match source {
            AudioSource::Tone => Ok(Box::new(super::tone::ToneBackend::new(config)?)),

            AudioSource::Microphone => {
                #[cfg(feature = "microphone")]
                {
                    let _ = config;
                    let backend = super::microphone::MicrophoneBackend::new()?;
                    Ok(Box::new(backend))
                }

                #[cfg(not(feature = "microphone"))]
                {
                    let _ = config;
                    anyhow::bail!(
                        "Microphone capture is not available: rebuild with the `microphone` feature"
                    )
                }
            }
        }
    }
}

/// Audio source type
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    /// Synthetic sine tone (no hardware needed)
    Tone,
    /// Default microphone input
    Microphone,
}
