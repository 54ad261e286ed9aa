// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Legacy debounce strategies kept for compatibility with older wiring.
//!
//! Both types are deliberately weaker than [`crate::cache::DedupeCache`] and
//! are not thread-safe: they are meant for the host engine's single-threaded
//! logging callback only.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use pyre_crash_core::{fingerprint_message, Fingerprint};

use crate::clock::{Clock, SystemClock};

/// Default number of ring slots in [`ContentDebounce`].
pub const DEFAULT_CONTENT_SLOTS: usize = 100;

#[derive(Debug, Clone, Copy)]
struct SeenEntry {
	fingerprint: Fingerprint,
	seen_at: DateTime<Utc>,
}

/// Content debounce over a fixed ring of recently seen occurrences.
///
/// Each call scans every slot for a matching fingerprint inside the window
/// and suppresses on a hit, recording nothing. Otherwise the occurrence
/// overwrites the oldest slot round-robin and passes. The scan is linear in
/// the slot count. Not thread-safe.
#[derive(Debug)]
pub struct ContentDebounce {
	slots: Vec<Option<SeenEntry>>,
	next_slot: usize,
	window: Duration,
	clock: Arc<dyn Clock>,
}

impl ContentDebounce {
	/// Creates a debounce with [`DEFAULT_CONTENT_SLOTS`] ring slots.
	pub fn new(window: Duration) -> Self {
		Self::with_slots(window, DEFAULT_CONTENT_SLOTS)
	}

	/// Creates a debounce with an explicit slot count. Zero is clamped to
	/// one.
	pub fn with_slots(window: Duration, slots: usize) -> Self {
		Self::with_clock(window, slots, Arc::new(SystemClock))
	}

	/// Creates a debounce reading time from `clock`.
	pub fn with_clock(window: Duration, slots: usize, clock: Arc<dyn Clock>) -> Self {
		Self {
			slots: vec![None; slots.max(1)],
			next_slot: 0,
			window,
			clock,
		}
	}

	/// Decides whether this occurrence should pass.
	///
	/// Returns `false` when an identical occurrence was recorded within the
	/// window. Suppressed occurrences are not re-recorded, so the window is
	/// always measured from the last occurrence that passed.
	pub fn should_pass(&mut self, message: &str, stack_trace: Option<&str>) -> bool {
		let fingerprint = fingerprint_message(message, stack_trace);
		let now = self.clock.now();
		for entry in self.slots.iter().flatten() {
			if entry.fingerprint == fingerprint && now - entry.seen_at < self.window {
				return false;
			}
		}
		self.slots[self.next_slot] = Some(SeenEntry {
			fingerprint,
			seen_at: now,
		});
		self.next_slot = (self.next_slot + 1) % self.slots.len();
		true
	}
}

/// Time barrier debounce: at most one occurrence per window.
///
/// The first call passes and arms a barrier at `now + window`. Calls before
/// the barrier are suppressed; the first call at or past it passes and
/// re-arms. Wiring sites keep one instance per severity lane. Not
/// thread-safe.
#[derive(Debug)]
pub struct TimeDebounce {
	window: Duration,
	barrier: Option<DateTime<Utc>>,
	clock: Arc<dyn Clock>,
}

impl TimeDebounce {
	/// Creates a debounce passing at most one occurrence per `window`.
	pub fn new(window: Duration) -> Self {
		Self::with_clock(window, Arc::new(SystemClock))
	}

	/// Creates a debounce reading time from `clock`.
	pub fn with_clock(window: Duration, clock: Arc<dyn Clock>) -> Self {
		Self {
			window,
			barrier: None,
			clock,
		}
	}

	/// Decides whether this occurrence should pass, re-arming the barrier
	/// when it does.
	pub fn should_pass(&mut self) -> bool {
		let now = self.clock.now();
		if let Some(barrier) = self.barrier {
			if now < barrier {
				return false;
			}
		}
		self.barrier = Some(now + self.window);
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clock::ManualClock;

	fn content_with_clock(window_ms: i64, slots: usize) -> (ContentDebounce, ManualClock) {
		let clock = ManualClock::default();
		let debounce = ContentDebounce::with_clock(
			Duration::milliseconds(window_ms),
			slots,
			Arc::new(clock.clone()),
		);
		(debounce, clock)
	}

	#[test]
	fn content_first_occurrence_passes() {
		let (mut debounce, _clock) = content_with_clock(100, 4);
		assert!(debounce.should_pass("boom", None));
	}

	#[test]
	fn content_repeat_within_window_is_suppressed() {
		let (mut debounce, clock) = content_with_clock(100, 4);
		assert!(debounce.should_pass("boom", Some("at main ()")));
		clock.advance(Duration::milliseconds(50));
		assert!(!debounce.should_pass("boom", Some("at main ()")));
	}

	#[test]
	fn content_repeat_after_window_passes() {
		let (mut debounce, clock) = content_with_clock(100, 4);
		assert!(debounce.should_pass("boom", None));
		clock.advance(Duration::milliseconds(150));
		assert!(debounce.should_pass("boom", None));
	}

	#[test]
	fn content_distinct_occurrences_pass() {
		let (mut debounce, _clock) = content_with_clock(100, 4);
		assert!(debounce.should_pass("boom", None));
		assert!(debounce.should_pass("bang", None));
		assert!(debounce.should_pass("boom", Some("at main ()")));
	}

	#[test]
	fn content_suppressed_occurrence_is_not_rerecorded() {
		let (mut debounce, clock) = content_with_clock(100, 4);
		assert!(debounce.should_pass("boom", None));
		clock.advance(Duration::milliseconds(80));
		assert!(!debounce.should_pass("boom", None));
		// Window is measured from the pass at t=0, not the hit at t=80.
		clock.advance(Duration::milliseconds(40));
		assert!(debounce.should_pass("boom", None));
	}

	#[test]
	fn content_ring_overwrite_forgets_oldest() {
		let (mut debounce, _clock) = content_with_clock(60_000, 2);
		assert!(debounce.should_pass("a", None));
		assert!(debounce.should_pass("b", None));
		// "c" overwrites the slot holding "a".
		assert!(debounce.should_pass("c", None));
		assert!(debounce.should_pass("a", None));
		// "c" is still remembered in the other slot.
		assert!(!debounce.should_pass("c", None));
	}

	#[test]
	fn time_first_occurrence_passes() {
		let clock = ManualClock::default();
		let mut debounce =
			TimeDebounce::with_clock(Duration::milliseconds(1000), Arc::new(clock.clone()));
		assert!(debounce.should_pass());
	}

	#[test]
	fn time_occurrence_before_barrier_is_suppressed() {
		let clock = ManualClock::default();
		let mut debounce =
			TimeDebounce::with_clock(Duration::milliseconds(1000), Arc::new(clock.clone()));
		assert!(debounce.should_pass());
		clock.advance(Duration::milliseconds(999));
		assert!(!debounce.should_pass());
	}

	#[test]
	fn time_occurrence_at_barrier_passes() {
		let clock = ManualClock::default();
		let mut debounce =
			TimeDebounce::with_clock(Duration::milliseconds(1000), Arc::new(clock.clone()));
		assert!(debounce.should_pass());
		clock.advance(Duration::milliseconds(1000));
		assert!(debounce.should_pass());
	}

	#[test]
	fn time_barrier_rearms_from_pass_time() {
		let clock = ManualClock::default();
		let mut debounce =
			TimeDebounce::with_clock(Duration::milliseconds(1000), Arc::new(clock.clone()));
		assert!(debounce.should_pass());
		clock.advance(Duration::milliseconds(1500));
		assert!(debounce.should_pass());
		// New barrier sits at t=2500, so t=2400 is still suppressed.
		clock.advance(Duration::milliseconds(900));
		assert!(!debounce.should_pass());
	}
}
