// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capture decision policy consulted by the reporting pipeline.

use std::sync::Arc;

use chrono::Duration;

use pyre_crash_core::{fingerprint_error, fingerprint_message, ErrorLike, LogKind};

use crate::cache::{DedupeCache, DEFAULT_MAX_TRACKED_FINGERPRINTS};
use crate::clock::Clock;

/// Capture decision policy.
///
/// One instance is constructed per SDK session by the component that wires
/// up the reporting pipeline and passed explicitly to every consumer; there
/// are no globals. Decisions run inside the host engine's logging callback
/// and must be cheap, synchronous, and non-blocking.
pub trait Throttler: Send + Sync {
	/// Whether an error event occurrence should be captured.
	///
	/// Kinds other than error, exception, and assert are never throttled.
	fn should_capture_event(&self, message: &str, stack_trace: Option<&str>, kind: LogKind)
		-> bool;

	/// Whether a breadcrumb should be recorded.
	///
	/// Breadcrumbs are context rather than events and always pass under the
	/// default policy.
	fn should_capture_breadcrumb(&self, message: &str, kind: LogKind) -> bool;

	/// Whether a structured log record should be forwarded.
	fn should_capture_structured_log(&self, message: &str, kind: LogKind) -> bool;

	/// Whether a captured error object should be reported.
	fn should_capture_error(&self, error: &dyn ErrorLike) -> bool;
}

/// The canonical throttling policy: a bounded time-windowed dedupe cache
/// over content fingerprints.
///
/// Error-grade occurrences are fingerprinted and deduplicated; repeats of
/// the same fingerprint within the window are suppressed. Breadcrumbs and
/// structured logs always pass.
#[derive(Debug)]
pub struct ErrorEventThrottler {
	cache: DedupeCache,
}

impl ErrorEventThrottler {
	/// Creates a throttler suppressing repeats within `window`, tracking up
	/// to [`DEFAULT_MAX_TRACKED_FINGERPRINTS`] distinct fingerprints.
	pub fn new(window: Duration) -> Self {
		Self::with_capacity(window, DEFAULT_MAX_TRACKED_FINGERPRINTS)
	}

	/// Creates a throttler with an explicit fingerprint capacity.
	pub fn with_capacity(window: Duration, capacity: usize) -> Self {
		Self {
			cache: DedupeCache::with_capacity(window, capacity),
		}
	}

	/// Creates a throttler reading time from `clock`.
	pub fn with_clock(window: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
		Self {
			cache: DedupeCache::with_clock(window, capacity, clock),
		}
	}
}

impl Throttler for ErrorEventThrottler {
	fn should_capture_event(
		&self,
		message: &str,
		stack_trace: Option<&str>,
		kind: LogKind,
	) -> bool {
		if !kind.is_throttle_eligible() {
			return true;
		}
		self.cache
			.should_capture_by_hash(fingerprint_message(message, stack_trace))
	}

	fn should_capture_breadcrumb(&self, _message: &str, _kind: LogKind) -> bool {
		true
	}

	fn should_capture_structured_log(&self, _message: &str, _kind: LogKind) -> bool {
		true
	}

	fn should_capture_error(&self, error: &dyn ErrorLike) -> bool {
		self.cache.should_capture_by_hash(fingerprint_error(error))
	}
}
