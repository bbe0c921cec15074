use std::time::Instant;

use tdigest::TDigest;

/// Collects wall-clock durations of repeated operations.
#[derive(Clone)]
pub struct Stopwatch {
    start_time: Instant,
    durations_in_micros: Vec<f64>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Stopwatch {
        Stopwatch {
            start_time: Instant::now(),
            durations_in_micros: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn stop(&mut self) {
        let duration = self.start_time.elapsed();
        self.durations_in_micros.push(duration.as_micros() as f64);
    }

    /// Times one call of `operation`.
    pub fn time<T, F: FnOnce() -> T>(&mut self, operation: F) -> T {
        self.start();
        let result = operation();
        self.stop();
        result
    }

    pub fn get_n(&self) -> usize {
        self.durations_in_micros.len()
    }

    /// `q` in `[0, 1]`.
    pub fn get_percentile_in_micros(&self, q: f64) -> f64 {
        let t_digest = TDigest::new_with_size(100);
        let sorted_digest = t_digest.merge_unsorted(self.durations_in_micros.clone());
        sorted_digest.estimate_quantile(q)
    }

    pub fn summary(&self) -> String {
        format!(
            "n={} p50={:.1}µs p90={:.1}µs p99={:.1}µs p99.9={:.1}µs",
            self.get_n(),
            self.get_percentile_in_micros(0.5),
            self.get_percentile_in_micros(0.9),
            self.get_percentile_in_micros(0.99),
            self.get_percentile_in_micros(0.999),
        )
    }
}
