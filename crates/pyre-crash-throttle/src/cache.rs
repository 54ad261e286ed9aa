// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bounded time-windowed deduplication cache with least recently admitted
//! eviction.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::debug;

use pyre_crash_core::Fingerprint;

use crate::clock::{Clock, SystemClock};

/// Default number of distinct fingerprints tracked before eviction starts.
pub const DEFAULT_MAX_TRACKED_FINGERPRINTS: usize = 100;

const NIL: usize = usize::MAX;

/// One tracked fingerprint in the slot arena.
#[derive(Debug)]
struct Slot {
	fingerprint: Fingerprint,
	last_seen: DateTime<Utc>,
	prev: usize,
	next: usize,
}

/// Admission order maintained as an index-linked list over the slot arena.
///
/// `head` is the least recently admitted entry and the next eviction victim;
/// `tail` is the most recently admitted. The index map and the list always
/// hold the same fingerprint set.
#[derive(Debug)]
struct CacheState {
	index: HashMap<Fingerprint, usize>,
	slots: Vec<Slot>,
	head: usize,
	tail: usize,
}

impl CacheState {
	fn with_capacity(capacity: usize) -> Self {
		Self {
			index: HashMap::with_capacity(capacity),
			slots: Vec::with_capacity(capacity),
			head: NIL,
			tail: NIL,
		}
	}

	fn detach(&mut self, slot: usize) {
		let (prev, next) = (self.slots[slot].prev, self.slots[slot].next);
		if prev == NIL {
			self.head = next;
		} else {
			self.slots[prev].next = next;
		}
		if next == NIL {
			self.tail = prev;
		} else {
			self.slots[next].prev = prev;
		}
		self.slots[slot].prev = NIL;
		self.slots[slot].next = NIL;
	}

	fn attach_tail(&mut self, slot: usize) {
		self.slots[slot].prev = self.tail;
		self.slots[slot].next = NIL;
		if self.tail == NIL {
			self.head = slot;
		} else {
			self.slots[self.tail].next = slot;
		}
		self.tail = slot;
	}

	fn admit(
		&mut self,
		fingerprint: Fingerprint,
		now: DateTime<Utc>,
		window: Duration,
		capacity: usize,
	) -> bool {
		if let Some(&slot) = self.index.get(&fingerprint) {
			if now - self.slots[slot].last_seen < window {
				// Suppressed hits leave the entry untouched so noisy
				// fingerprints age toward eviction once they go quiet.
				return false;
			}
			self.slots[slot].last_seen = now;
			self.detach(slot);
			self.attach_tail(slot);
			return true;
		}

		let slot = if self.index.len() >= capacity {
			let victim = self.head;
			let evicted = self.slots[victim].fingerprint;
			self.detach(victim);
			self.index.remove(&evicted);
			debug!(fingerprint = %evicted, "evicting least recently admitted fingerprint");
			self.slots[victim].fingerprint = fingerprint;
			self.slots[victim].last_seen = now;
			victim
		} else {
			self.slots.push(Slot {
				fingerprint,
				last_seen: now,
				prev: NIL,
				next: NIL,
			});
			self.slots.len() - 1
		};

		self.attach_tail(slot);
		self.index.insert(fingerprint, slot);
		true
	}
}

/// Bounded time-windowed deduplication cache.
///
/// Remembers when each fingerprint was last captured. A fingerprint seen
/// again within the window is suppressed without refreshing its recency;
/// only accepted captures move an entry back to the most recently admitted
/// end and update its timestamp. A brand new fingerprint arriving at
/// capacity evicts the least recently admitted entry first.
///
/// Every operation runs under one internal mutex, so a single instance can
/// serve capture decisions from any thread.
#[derive(Debug)]
pub struct DedupeCache {
	state: Mutex<CacheState>,
	window: Duration,
	capacity: usize,
	clock: Arc<dyn Clock>,
}

impl DedupeCache {
	/// Creates a cache suppressing repeats within `window`, tracking up to
	/// [`DEFAULT_MAX_TRACKED_FINGERPRINTS`] distinct fingerprints.
	pub fn new(window: Duration) -> Self {
		Self::with_capacity(window, DEFAULT_MAX_TRACKED_FINGERPRINTS)
	}

	/// Creates a cache with an explicit capacity. Zero is clamped to one.
	pub fn with_capacity(window: Duration, capacity: usize) -> Self {
		Self::with_clock(window, capacity, Arc::new(SystemClock))
	}

	/// Creates a cache reading time from `clock`.
	pub fn with_clock(window: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
		let capacity = capacity.max(1);
		Self {
			state: Mutex::new(CacheState::with_capacity(capacity)),
			window,
			capacity,
			clock,
		}
	}

	/// Decides whether an occurrence with this fingerprint is captured.
	///
	/// Returns `false` when the fingerprint was already captured within the
	/// window.
	pub fn should_capture_by_hash(&self, fingerprint: Fingerprint) -> bool {
		let now = self.clock.now();
		self.state
			.lock()
			.admit(fingerprint, now, self.window, self.capacity)
	}

	/// Number of fingerprints currently tracked.
	pub fn len(&self) -> usize {
		self.state.lock().index.len()
	}

	/// Whether no fingerprints are tracked yet.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
