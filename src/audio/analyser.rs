//! Rolling time-domain analysis buffer
//!
//! [`RollingAnalyser`] keeps the most recent `fft_size` mono samples of an
//! audio stream. Readers take snapshots of the newest `size` samples at any
//! time; how often they poll has no effect on what is retained.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::backend::AudioFrame;

pub const MIN_FFT_SIZE: usize = 32;
pub const MAX_FFT_SIZE: usize = 32768;

/// Something that can hand out the freshest window of audio
pub trait AnalysisSource {
    /// The most recent `size` time-domain samples, or `None` when the
    /// source is unavailable. Must not block.
    fn snapshot(&self, size: usize) -> Option<Vec<f32>>;
}

impl<T: AnalysisSource + ?Sized> AnalysisSource for Box<T> {
    fn snapshot(&self, size: usize) -> Option<Vec<f32>> {
        (**self).snapshot(size)
    }
}

#[derive(Debug)]
struct Ring {
    samples: VecDeque<f32>,
    capacity: usize,
    open: bool,
    written: u64,
}

/// Shared handle to a rolling buffer of `fft_size` samples.
///
/// Clones share the same buffer; the writer side is usually the pump task
/// started by [`RollingAnalyser::attach`].
#[derive(Debug, Clone)]
pub struct RollingAnalyser {
    inner: Arc<Mutex<Ring>>,
    fft_size: usize,
}

impl RollingAnalyser {
    pub fn new(fft_size: usize) -> Result<Self> {
        validate_fft_size(fft_size)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(Ring {
                samples: VecDeque::with_capacity(fft_size),
                capacity: fft_size,
                open: true,
                written: 0,
            })),
            fft_size,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Samples per snapshot window (half the FFT size)
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Push mono samples, evicting the oldest once the buffer is full
    pub fn write(&self, samples: &[f32]) {
        let Ok(mut ring) = self.inner.lock() else {
            return;
        };

        let keep = samples.len().min(ring.capacity);
        let overflow = (ring.samples.len() + keep).saturating_sub(ring.capacity);
        ring.samples.drain(..overflow);
        ring.samples.extend(&samples[samples.len() - keep..]);
        ring.written += samples.len() as u64;
    }

    /// Total samples written since creation
    pub fn samples_written(&self) -> u64 {
        self.inner.lock().map(|ring| ring.written).unwrap_or(0)
    }

    /// Mark the source as gone; further snapshots return `None`
    pub fn close(&self) {
        if let Ok(mut ring) = self.inner.lock() {
            ring.open = false;
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().map(|ring| ring.open).unwrap_or(false)
    }

    /// Feed frames from a backend into this analyser until the stream ends.
    ///
    /// The analyser is closed when the frame channel closes.
    pub fn attach(&self, mut frames: mpsc::Receiver<AudioFrame>) -> JoinHandle<()> {
        let analyser = self.clone();

        info!(
            "Processing {} samples at a time",
            analyser.frequency_bin_count()
        );

        tokio::spawn(async move {
            debug!("Analyser pump started");

            while let Some(frame) = frames.recv().await {
                analyser.write(&frame.to_mono());
            }

            warn!("Audio stream ended; analyser is no longer available");
            analyser.close();
        })
    }
}

impl AnalysisSource for RollingAnalyser {
    fn snapshot(&self, size: usize) -> Option<Vec<f32>> {
        let ring = self.inner.lock().ok()?;
        if !ring.open {
            return None;
        }

        // Zero-filled until enough audio has arrived
        let available = ring.samples.len().min(size);
        let mut window = vec![0.0; size - available];
        window.extend(ring.samples.range(ring.samples.len() - available..));
        Some(window)
    }
}

/// FFT sizes must be a power of two between 32 and 32768
pub fn validate_fft_size(fft_size: usize) -> Result<()> {
    if !fft_size.is_power_of_two() || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&fft_size) {
        bail!(
            "FFT size must be a power of two between {} and {}, got {}",
            MIN_FFT_SIZE,
            MAX_FFT_SIZE,
            fft_size
        );
    }
    Ok(())
}
