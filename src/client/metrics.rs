//! In-process refresh counters, available without the `metrics` feature.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::_prelude::*;

/// Point-in-time copy of [`RefreshMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RefreshStats {
	/// Refreshes started.
	pub attempts: u64,
	/// Refreshes that saved a new token.
	pub successes: u64,
	/// Refreshes that returned an error.
	pub failures: u64,
}
impl RefreshStats {
	/// Refreshes started but not finished when the snapshot was taken.
	///
	/// Without a singleflight guard this can exceed one when several callers see a stale token
	/// at the same time.
	pub fn in_flight(&self) -> u64 {
		self.attempts.saturating_sub(self.successes + self.failures)
	}
}

/// Refresh counters shared by every clone of a [`TokenClient`](crate::client::TokenClient).
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
}
impl RefreshMetrics {
	/// Refreshes started so far.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Refreshes that saved a new token.
	pub fn successes(&self) -> u64 {
		self.successes.load(Ordering::Relaxed)
	}

	/// Refreshes that returned an error.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// Copies all counters at once.
	pub fn snapshot(&self) -> RefreshStats {
		RefreshStats {
			attempts: self.attempts(),
			successes: self.successes(),
			failures: self.failures(),
		}
	}

	pub(crate) fn begin(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn finish<T>(&self, result: &Result<T>) {
		let counter = if result.is_ok() { &self.successes } else { &self.failures };

		counter.fetch_add(1, Ordering::Relaxed);
	}
}
