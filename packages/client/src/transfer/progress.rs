use std::sync::{Arc, Mutex};

use super::ProgressFn;

#[derive(Debug, Default)]
struct Gate {
    last: Option<f32>,
    settled: bool,
}

/// Wraps a caller's progress callback for the lifetime of one request.
///
/// Values are clamped to `[0, 100]`, regressions are dropped and nothing is
/// forwarded once [`settle`](Self::settle) has been called. Emission and settling
/// are serialized, so after `settle` returns no callback is running or will run.
#[derive(Clone)]
pub struct ProgressReporter {
    sink: Option<ProgressFn>,
    gate: Arc<Mutex<Gate>>,
}

impl ProgressReporter {
    pub fn new(sink: Option<ProgressFn>) -> Self {
        Self {
            sink,
            gate: Arc::new(Mutex::new(Gate::default())),
        }
    }

    /// Report `loaded` out of `total` bytes.
    pub fn bytes(&self, loaded: u64, total: u64) {
        if total == 0 {
            return;
        }
        self.percent(loaded as f32 / total as f32 * 100.0);
    }

    pub fn percent(&self, value: f32) {
        let Some(sink) = &self.sink else {
            return;
        };
        if value.is_nan() {
            return;
        }
        let value = value.clamp(0.0, 100.0);

        let mut gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        if gate.settled {
            return;
        }
        if gate.last.is_some_and(|last| value <= last) {
            return;
        }
        gate.last = Some(value);
        sink(value);
    }

    /// Mark the request as finished; later reports are ignored.
    pub fn settle(&self) {
        let mut gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        gate.settled = true;
    }

    pub fn last(&self) -> Option<f32> {
        self.gate.lock().unwrap_or_else(|e| e.into_inner()).last
    }
}
