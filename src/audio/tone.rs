//! Synthetic audio backend producing a sine tone in real time
//!
//! Stands in for a microphone when no input device is available. Frames are
//! emitted every `block_ms` so the analyser sees the same kind of steady
//! stream a hardware callback would deliver.

use anyhow::{bail, Result};
use std::f32::consts::TAU;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::backend::{AudioBackend, AudioBackendConfig, AudioFrame};

const AMPLITUDE: f32 = 0.5;

pub struct ToneBackend {
    config: AudioBackendConfig,
    samples_per_block: usize,
    task: Option<JoinHandle<()>>,
}

impl ToneBackend {
    pub fn new(config: AudioBackendConfig) -> Result<Self> {
        if config.sample_rate == 0 {
            bail!("Tone sample rate must be greater than zero");
        }
        if config.block_ms == 0 {
            bail!("Tone block length must be greater than zero");
        }

        let Some(block_samples) = (config.sample_rate as u64).checked_mul(config.block_ms) else {
            bail!(
                "Tone block of {}ms at {}Hz is too long",
                config.block_ms,
                config.sample_rate
            );
        };
        let samples_per_block = usize::try_from(block_samples / 1000)?;
        if samples_per_block == 0 {
            bail!(
                "Tone block of {}ms at {}Hz holds no samples",
                config.block_ms,
                config.sample_rate
            );
        }

        info!(
            "Tone backend initialized ({:.1}Hz tone, {}Hz, {} samples per block)",
            config.tone_hz, config.sample_rate, samples_per_block
        );

        Ok(Self {
            config,
            samples_per_block,
            task: None,
        })
    }
}

#[async_trait::async_trait]
impl AudioBackend for ToneBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>> {
        if self.task.is_some() {
            bail!("Already capturing");
        }

        let (tx, rx) = mpsc::channel(100);
        let sample_rate = self.config.sample_rate;
        let block_ms = self.config.block_ms;
        let step = TAU * self.config.tone_hz / sample_rate as f32;
        let samples_per_block = self.samples_per_block;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(block_ms));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            let mut phase = 0.0f32;
            let mut timestamp_ms = 0u64;

            loop {
                ticker.tick().await;

                let samples: Vec<f32> = (0..samples_per_block)
                    .map(|_| {
                        let sample = AMPLITUDE * phase.sin();
                        phase = (phase + step) % TAU;
                        sample
                    })
                    .collect();

                let frame = AudioFrame {
                    samples,
                    sample_rate,
                    channels: 1,
                    timestamp_ms,
                };

                if tx.send(frame).await.is_err() {
                    debug!("Tone receiver dropped");
                    break;
                }
                timestamp_ms += block_ms;
            }
        });

        self.task = Some(task);
        info!("Tone capture started");

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Tone capture stopped");
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.task.is_some()
    }

    fn name(&self) -> &str {
        "Synthetic tone"
    }
}
