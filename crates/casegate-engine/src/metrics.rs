use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use casegate_core::traits::{EvalCollector, EvalSample};

/// Most recent samples kept by [`RingCollector`].
pub const DEFAULT_RING_CAPACITY: usize = 100;

/// Discards every sample. The default when instrumentation is not wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCollector;

impl EvalCollector for NoopCollector {
    fn record(&self, _sample: EvalSample) {}
}

/// Keeps the most recent samples in a bounded ring.
///
/// Purely informational: overflow silently drops the oldest sample and a
/// poisoned lock is recovered rather than propagated, so instrumentation can
/// never affect an evaluation result.
#[derive(Debug)]
pub struct RingCollector {
    capacity: usize,
    samples: Mutex<VecDeque<EvalSample>>,
}

impl RingCollector {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn snapshot(&self) -> Vec<EvalSample> {
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RingCollector {
    fn default() -> Self {
        Self::new(DEFAULT_RING_CAPACITY)
    }
}

impl EvalCollector for RingCollector {
    fn record(&self, sample: EvalSample) {
        if self.capacity == 0 {
            return;
        }
        let mut samples = self
            .samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if samples.len() == self.capacity {
            samples.pop_front();
        }
        samples.push_back(sample);
    }
}
