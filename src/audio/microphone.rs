//! Microphone audio backend using cpal
//!
//! `cpal::Stream` is not `Send` on every platform, so the stream is built and
//! kept alive on a dedicated thread. The audio callback forwards buffers with
//! `try_send`; when the receiver falls behind, buffers are dropped rather than
//! blocking the audio thread.

use anyhow::{anyhow, bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::mpsc as std_mpsc;
use std::thread::JoinHandle;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::backend::{AudioBackend, AudioFrame};

pub struct MicrophoneBackend {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_format: cpal::SampleFormat,
    worker: Option<(std_mpsc::Sender<()>, JoinHandle<()>)>,
}

impl MicrophoneBackend {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .context("No input device found on the default audio host")?;

        let supported = device
            .default_input_config()
            .context("Failed to query default input config")?;

        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        // The sample rate depends on the hardware, usually 44100 or 48000 Hz
        info!(
            "Recording at {} Hz ({} channels, {:?})",
            config.sample_rate.0, config.channels, sample_format
        );

        Ok(Self {
            device,
            config,
            sample_format,
            worker: None,
        })
    }
}

#[async_trait::async_trait]
impl AudioBackend for MicrophoneBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>> {
        if self.worker.is_some() {
            bail!("Already capturing");
        }

        let (frame_tx, frame_rx) = mpsc::channel(256);
        let (stop_tx, stop_rx) = std_mpsc::channel::<()>();
        let (ready_tx, ready_rx) = std_mpsc::sync_channel::<Result<()>>(1);

        let device = self.device.clone();
        let config = self.config.clone();
        let sample_format = self.sample_format;

        let handle = std::thread::Builder::new()
            .name("mic-capture".to_string())
            .spawn(move || {
                let stream = match sample_format {
                    cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, frame_tx),
                    cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, frame_tx),
                    cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, frame_tx),
                    other => Err(anyhow!("Unsupported sample format: {:?}", other)),
                };

                let stream = match stream.and_then(|s| {
                    s.play().context("Failed to start audio stream")?;
                    Ok(s)
                }) {
                    Ok(stream) => {
                        let _ = ready_tx.send(Ok(()));
                        stream
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                // Either an explicit stop or the backend being dropped ends capture
                let _ = stop_rx.recv();
                drop(stream);
            })
            .context("Failed to spawn capture thread")?;

        let ready = tokio::task::spawn_blocking(move || ready_rx.recv())
            .await
            .context("Capture startup task panicked")?
            .context("Capture thread exited before reporting readiness")?;
        ready?;

        self.worker = Some((stop_tx, handle));
        info!("Microphone capture started");

        Ok(frame_rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some((stop_tx, handle)) = self.worker.take() {
            let _ = stop_tx.send(());
            tokio::task::spawn_blocking(move || handle.join())
                .await
                .context("Capture shutdown task panicked")?
                .map_err(|_| anyhow!("Capture thread panicked"))?;
            info!("Microphone capture stopped");
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.worker.is_some()
    }

    fn name(&self) -> &str {
        "Microphone (cpal)"
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    tx: mpsc::Sender<AudioFrame>,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let sample_rate = config.sample_rate.0;
    let channels = config.channels;
    let mut frames_seen: u64 = 0;

    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let timestamp_ms = frames_seen * 1000 / sample_rate.max(1) as u64;
                frames_seen += (data.len() / channels.max(1) as usize) as u64;

                let frame = AudioFrame {
                    samples: data.iter().map(|s| s.to_sample::<f32>()).collect(),
                    sample_rate,
                    channels,
                    timestamp_ms,
                };
                if let Err(mpsc::error::TrySendError::Full(_)) = tx.try_send(frame) {
                    warn!("Audio frame dropped: analyser is not keeping up");
                }
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )
        .context("Failed to build input stream")?;

    Ok(stream)
}
