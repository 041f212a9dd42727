//! Time source for the summary popup timeout.

use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Monotonic time elapsed since some fixed point of the page's life.
pub trait Clock: Debug + Send + Sync {
	fn now(&self) -> Duration;
}

/// Wall-clock time measured from when the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
	start: Instant,
}

impl SystemClock {
	pub fn new() -> Self {
		Self { start: Instant::now() }
	}
}

impl Default for SystemClock {
	fn default() -> Self {
		Self::new()
	}
}

impl Clock for SystemClock {
	fn now(&self) -> Duration {
		self.start.elapsed()
	}
}
