use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::audio::{validate_fft_size, AudioBackendConfig, AudioSource};
use crate::session::{SessionConfig, DEFAULT_FFT_SIZE};

/// Prefix for environment overrides, e.g. `MIC_SAMPLER_AUDIO__FFT_SIZE=4096`
pub const ENV_PREFIX: &str = "MIC_SAMPLER";

/// Upper bound for `scheduler.refresh_hz`; faster rates round to a zero period
pub const MAX_REFRESH_HZ: f64 = 1000.0;

/// Upper bound for `audio.block_ms`
pub const MAX_BLOCK_MS: u64 = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub audio: AudioConfig,
    pub scheduler: SchedulerConfig,
    pub status: StatusConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    pub source: AudioSource,
    pub fft_size: usize,
    pub sample_rate: u32,
    pub block_ms: u64,
    pub tone_hz: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    pub refresh_hz: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    /// Print the live "Recording: X.Xs" line on every tick
    pub live: bool,
}

impl Config {
    /// Load configuration from an optional file plus environment overrides.
    ///
    /// `path` is passed to `config::File::with_name`, so the extension may be
    /// omitted. A missing file falls back to the built-in defaults.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        let cfg: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        cfg.validate()?;

        Ok(cfg)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = AudioBackendConfig::default();

        Ok(config::Config::builder()
            .set_default("audio.source", "tone")?
            .set_default("audio.fft_size", DEFAULT_FFT_SIZE as i64)?
            .set_default("audio.sample_rate", defaults.sample_rate as i64)?
            .set_default("audio.block_ms", defaults.block_ms as i64)?
            .set_default("audio.tone_hz", defaults.tone_hz as f64)?
            .set_default("scheduler.refresh_hz", 60.0)?
            .set_default("status.live", true)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_fft_size(self.audio.fft_size)?;

        if !self.scheduler.refresh_hz.is_finite() || self.scheduler.refresh_hz <= 0.0 {
            bail!(
                "scheduler.refresh_hz must be positive, got {}",
                self.scheduler.refresh_hz
            );
        }
        if self.scheduler.refresh_hz > MAX_REFRESH_HZ {
            bail!(
                "scheduler.refresh_hz must be at most {}, got {}",
                MAX_REFRESH_HZ,
                self.scheduler.refresh_hz
            );
        }
        if self.audio.sample_rate == 0 {
            bail!("audio.sample_rate must be greater than zero");
        }
        if self.audio.block_ms == 0 || self.audio.block_ms > MAX_BLOCK_MS {
            bail!(
                "audio.block_ms must be between 1 and {}, got {}",
                MAX_BLOCK_MS,
                self.audio.block_ms
            );
        }

        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.audio.fft_size)
    }

    pub fn backend_config(&self) -> AudioBackendConfig {
        AudioBackendConfig {
            sample_rate: self.audio.sample_rate,
            block_ms: self.audio.block_ms,
            tone_hz: self.audio.tone_hz,
        }
    }
}
