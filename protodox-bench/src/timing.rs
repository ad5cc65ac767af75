//! Throughput helpers outside of criterion.

use protodox_core::StreamDriver;
use std::io;
use std::time::{Duration, Instant};

/// Rewrites `input` `iterations` times into a sink and returns the elapsed time.
pub fn time_transform(input: &str, iterations: usize) -> Duration {
    let mut driver = StreamDriver::new();
    let start = Instant::now();

    for _ in 0..iterations {
        let _ = driver.run(input.as_bytes(), io::sink());
    }

    start.elapsed()
}

/// Lines per second for `lines` lines processed in `elapsed`.
#[must_use]
pub fn lines_per_second(lines: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 {
        return 0.0;
    }
    lines as f64 / secs
}
