use std::sync::Arc;
use std::time::Duration;

/// One snapshot of the rolling analysis buffer.
///
/// Chunks are immutable once built. Consecutive chunks may overlap or leave
/// gaps depending on how the tick rate compares with the window duration;
/// nothing here tries to correct that.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    index: usize,
    offset: Duration,
    samples: Arc<[f32]>,
}

impl Chunk {
    pub(crate) fn new(index: usize, offset: Duration, samples: Vec<f32>) -> Self {
        Self {
            index,
            offset,
            samples: samples.into(),
        }
    }

    /// Position of this chunk within its episode (0-indexed)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Time between the start of the episode and the capture of this chunk
    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
