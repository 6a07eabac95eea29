use std::time::{Duration, Instant};

/// Reports the lifetime of a scope through the `log` facade when dropped.
pub struct ScopedTimer {
    label: String,
    started: Instant,
}

impl ScopedTimer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::info!("{} finished in {:?}", self.label, self.elapsed());
    }
}
