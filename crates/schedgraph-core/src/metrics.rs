//! Per-run instrumentation: an operation counter plus a stopwatch.
//!
//! Every algorithm owns one [`Metrics`] for the duration of a single call and
//! hands it back inside its result. Nothing here is global or shared, so two
//! runs never see each other's counts.

use std::fmt;
use std::time::{Duration, Instant};

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Operation count and elapsed wall time for one algorithm run.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    operations: u64,
    started: Option<Instant>,
    elapsed: Duration,
}

impl Metrics {
    /// A zeroed, stopped instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A zeroed instance whose timing window is already open.
    #[must_use]
    pub fn started() -> Self {
        let mut metrics = Self::new();
        metrics.start_timing();
        metrics
    }

    /// Zero the counter and discard any timing.
    pub fn reset(&mut self) {
        self.operations = 0;
        self.started = None;
        self.elapsed = Duration::ZERO;
    }

    /// Count one operation.
    pub const fn increment(&mut self) {
        self.operations += 1;
    }

    /// Count `count` operations at once.
    pub const fn add(&mut self, count: u64) {
        self.operations += count;
    }

    /// Operations counted so far.
    #[must_use]
    pub const fn operations(&self) -> u64 {
        self.operations
    }

    /// Open a fresh timing window.
    pub fn start_timing(&mut self) {
        self.started = Some(Instant::now());
        self.elapsed = Duration::ZERO;
    }

    /// Close the timing window. A no-op if none is open.
    pub fn stop_timing(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed = started.elapsed();
        }
    }

    /// Whether a timing window is currently open.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Duration of the last closed timing window.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// [`Metrics::elapsed`] in fractional milliseconds.
    #[must_use]
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ops in {}",
            self.operations,
            format_duration(self.elapsed)
        )
    }
}

impl Serialize for Metrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Metrics", 3)?;
        state.serialize_field("operations", &self.operations)?;
        state.serialize_field("elapsed_us", &self.elapsed.as_micros())?;
        state.serialize_field("elapsed_ms", &self.elapsed_millis())?;
        state.end()
    }
}

/// Render a duration with a unit that keeps three significant decimals.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();

    if micros >= 1_000_000 {
        let secs = micros / 1_000_000;
        let millis = (micros % 1_000_000) / 1_000;
        format!("{secs}.{millis:03}s")
    } else if micros >= 1_000 {
        let millis = micros / 1_000;
        let rem = micros % 1_000;
        format!("{millis}.{rem:03}ms")
    } else {
        format!("{micros}µs")
    }
}
