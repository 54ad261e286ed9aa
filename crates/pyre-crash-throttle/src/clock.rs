// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Clock abstraction so window arithmetic is testable without sleeping.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of wall-clock time for throttling decisions.
pub trait Clock: Send + Sync + std::fmt::Debug {
	/// Current wall-clock time in UTC.
	fn now(&self) -> DateTime<Utc>;
}

/// System wall clock used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> DateTime<Utc> {
		Utc::now()
	}
}

/// Manually advanced clock for deterministic tests.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and hand another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
	now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
	/// Creates a clock frozen at `start`.
	pub fn new(start: DateTime<Utc>) -> Self {
		Self {
			now: Arc::new(Mutex::new(start)),
		}
	}

	/// Advances the clock by `step`.
	pub fn advance(&self, step: Duration) {
		*self.now.lock() += step;
	}

	/// Moves the clock to an absolute instant.
	pub fn set(&self, instant: DateTime<Utc>) {
		*self.now.lock() = instant;
	}
}

impl Default for ManualClock {
	fn default() -> Self {
		Self::new(DateTime::UNIX_EPOCH)
	}
}

impl Clock for ManualClock {
	fn now(&self) -> DateTime<Utc> {
		*self.now.lock()
	}
}
