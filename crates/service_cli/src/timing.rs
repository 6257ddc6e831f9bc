//! Scoped wall-clock measurement around a single valuation call.

use std::time::{Duration, Instant};
use tracing::info;

/// Measures elapsed wall time from [`Stopwatch::start`].
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    label: &'static str,
    start: Instant,
}

impl Stopwatch {
    /// Starts timing.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Time elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stops timing and logs the elapsed time.
    pub fn stop(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            label = self.label,
            elapsed_ms = as_millis(elapsed),
            "timed call finished"
        );
        elapsed
    }
}

/// Fractional milliseconds.
pub fn as_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_monotonic() {
        let watch = Stopwatch::start("test");
        let first = watch.elapsed();
        let second = watch.elapsed();
        assert!(second >= first);
        assert!(watch.stop() >= second);
    }

    #[test]
    fn test_as_millis() {
        approx::assert_relative_eq!(as_millis(Duration::from_micros(1500)), 1.5, epsilon = 1e-12);
    }
}
