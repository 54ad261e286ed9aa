// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Kind plus condition set filtering for raw engine log lines.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use pyre_crash_core::LogKind;

use crate::clock::{Clock, SystemClock};

/// Set filter letting each distinct (kind, condition) line through once per
/// barrier window.
///
/// A line with an unseen key passes and extends the barrier. A line with a
/// seen key passes only once the barrier has elapsed, which clears the whole
/// seen set and restarts the let-new-lines-through behavior; before that it
/// is suppressed. Legacy variant, not thread-safe.
#[derive(Debug)]
pub struct KindConditionFilter {
	seen: HashSet<(LogKind, String)>,
	window: Duration,
	barrier: DateTime<Utc>,
	clock: Arc<dyn Clock>,
}

impl KindConditionFilter {
	/// Creates a filter with the given barrier window.
	pub fn new(window: Duration) -> Self {
		Self::with_clock(window, Arc::new(SystemClock))
	}

	/// Creates a filter reading time from `clock`.
	pub fn with_clock(window: Duration, clock: Arc<dyn Clock>) -> Self {
		let barrier = clock.now() + window;
		Self {
			seen: HashSet::new(),
			window,
			barrier,
			clock,
		}
	}

	/// Decides whether this line should pass.
	pub fn should_pass(&mut self, kind: LogKind, condition: &str) -> bool {
		let now = self.clock.now();
		let key = (kind, condition.to_string());
		if !self.seen.contains(&key) {
			self.seen.insert(key);
			self.barrier = now + self.window;
			return true;
		}
		if now > self.barrier {
			self.seen.clear();
			self.seen.insert(key);
			self.barrier = now + self.window;
			return true;
		}
		false
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clock::ManualClock;

	fn filter_with_clock(window_ms: i64) -> (KindConditionFilter, ManualClock) {
		let clock = ManualClock::default();
		let filter = KindConditionFilter::with_clock(
			Duration::milliseconds(window_ms),
			Arc::new(clock.clone()),
		);
		(filter, clock)
	}

	#[test]
	fn distinct_keys_pass_once() {
		let (mut filter, _clock) = filter_with_clock(100);
		assert!(filter.should_pass(LogKind::Error, "boom"));
		assert!(filter.should_pass(LogKind::Error, "bang"));
		assert!(filter.should_pass(LogKind::Warning, "boom"));
		assert!(!filter.should_pass(LogKind::Error, "boom"));
	}

	#[test]
	fn duplicate_past_barrier_clears_the_set() {
		let (mut filter, clock) = filter_with_clock(100);
		assert!(filter.should_pass(LogKind::Error, "boom"));
		assert!(filter.should_pass(LogKind::Error, "bang"));
		clock.advance(Duration::milliseconds(150));
		// Past the barrier: the duplicate passes and the set is cleared,
		// so the other key passes again as well.
		assert!(filter.should_pass(LogKind::Error, "boom"));
		assert!(filter.should_pass(LogKind::Error, "bang"));
	}

	#[test]
	fn each_admission_extends_the_barrier() {
		let (mut filter, clock) = filter_with_clock(100);
		assert!(filter.should_pass(LogKind::Error, "boom"));
		clock.advance(Duration::milliseconds(90));
		// New key at t=90 pushes the barrier out to t=190.
		assert!(filter.should_pass(LogKind::Error, "bang"));
		clock.advance(Duration::milliseconds(60));
		// t=150 is before the extended barrier, so the duplicate stays
		// suppressed even though the window armed at t=0 has elapsed.
		assert!(!filter.should_pass(LogKind::Error, "boom"));
	}
}
