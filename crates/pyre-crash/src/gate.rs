// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The capture gate between the host engine's logging callback and the
//! reporting pipeline.

use std::sync::Arc;

use tracing::{debug, info};

use pyre_crash_core::{ErrorLike, LogKind};
use pyre_crash_throttle::{Clock, ErrorEventThrottler, SystemClock, Throttler, TimeDebounce};

use crate::error::Result;
use crate::options::CaptureOptions;

/// Prefix identifying the SDK's own diagnostic lines in the engine log.
///
/// Hosts that mirror SDK diagnostics into the engine log would otherwise
/// feed them straight back into capture.
pub const SDK_LOG_PREFIX: &str = "[pyre] ";

/// Receiver for occurrences the gate decides to capture.
///
/// Implemented by the reporting pipeline. Event construction, enrichment,
/// and transport all happen behind this seam.
pub trait CaptureSink: Send + Sync {
	/// Report an error event built from a raw log occurrence.
	fn capture_event(&self, message: &str, stack_trace: Option<&str>, kind: LogKind);

	/// Report a captured error object.
	fn capture_error(&self, error: &dyn ErrorLike);

	/// Record a breadcrumb for context on future events.
	fn add_breadcrumb(&self, message: &str, kind: LogKind);
}

/// Capture gate wired into the host engine's logging callback.
///
/// Every log line flows through [`CaptureGate::handle_log`]: SDK diagnostics
/// are skipped, the optional legacy per-severity debounces drop rapid-fire
/// lines, the throttling policy suppresses repeated error events, and the
/// survivors are routed to the sink. Captured error objects take
/// [`CaptureGate::handle_error`].
///
/// The gate itself is single-threaded, matching the engine's non-threaded
/// logging callback; the [`Throttler`] it holds is shared and stays usable
/// from other threads.
pub struct CaptureGate {
	options: CaptureOptions,
	throttler: Arc<dyn Throttler>,
	sink: Arc<dyn CaptureSink>,
	log_debounce: TimeDebounce,
	warning_debounce: TimeDebounce,
	error_debounce: TimeDebounce,
	suppressed_events: u64,
}

impl CaptureGate {
	/// Starts building a gate draining into `sink`.
	pub fn builder(sink: Arc<dyn CaptureSink>) -> CaptureGateBuilder {
		CaptureGateBuilder::new(sink)
	}

	/// Routes one engine log line.
	pub fn handle_log(&mut self, message: &str, stack_trace: Option<&str>, kind: LogKind) {
		if message.starts_with(SDK_LOG_PREFIX) {
			return;
		}

		if self.options.enable_log_debouncing && !self.debounce_allows(kind) {
			if kind.is_throttle_eligible() {
				self.suppressed_events += 1;
			}
			return;
		}

		if kind == LogKind::Exception {
			if self.throttler.should_capture_event(message, stack_trace, kind) {
				self.sink.capture_event(message, stack_trace, kind);
			} else {
				self.suppressed_events += 1;
				debug!(%kind, "suppressed repeated exception event");
			}
			// The captured event carries the context; no breadcrumb.
			return;
		}

		if kind.is_throttle_eligible() && self.options.capture_log_error_events {
			if self.throttler.should_capture_event(message, stack_trace, kind) {
				self.sink.capture_event(message, stack_trace, kind);
			} else {
				self.suppressed_events += 1;
				debug!(%kind, "suppressed repeated error event");
			}
		}

		if self.throttler.should_capture_breadcrumb(message, kind) {
			self.sink.add_breadcrumb(message, kind);
		}
	}

	/// Routes one captured error object.
	pub fn handle_error(&mut self, error: &dyn ErrorLike) {
		if !self.throttler.should_capture_error(error) {
			self.suppressed_events += 1;
			debug!(error_type = error.type_name(), "suppressed repeated error object");
			return;
		}
		self.sink.capture_error(error);

		// So the next event carries this error as context.
		let crumb = format!("{}: {}", error.type_name(), error.message());
		if self
			.throttler
			.should_capture_breadcrumb(&crumb, LogKind::Exception)
		{
			self.sink.add_breadcrumb(&crumb, LogKind::Exception);
		}
	}

	/// Number of occurrences dropped since the last call, resetting the
	/// counter.
	///
	/// Counts error-grade lines dropped by debouncing and events suppressed
	/// by the throttling policy.
	pub fn take_suppressed_events(&mut self) -> u64 {
		std::mem::take(&mut self.suppressed_events)
	}

	fn debounce_allows(&mut self, kind: LogKind) -> bool {
		match kind {
			LogKind::Error | LogKind::Exception | LogKind::Assert => {
				self.error_debounce.should_pass()
			}
			LogKind::Log => self.log_debounce.should_pass(),
			LogKind::Warning => self.warning_debounce.should_pass(),
		}
	}
}

/// Builder for [`CaptureGate`].
pub struct CaptureGateBuilder {
	options: CaptureOptions,
	sink: Arc<dyn CaptureSink>,
	throttler: Option<Arc<dyn Throttler>>,
	clock: Arc<dyn Clock>,
}

impl CaptureGateBuilder {
	fn new(sink: Arc<dyn CaptureSink>) -> Self {
		Self {
			options: CaptureOptions::default(),
			sink,
			throttler: None,
			clock: Arc::new(SystemClock),
		}
	}

	/// Sets the capture options.
	pub fn options(mut self, options: CaptureOptions) -> Self {
		self.options = options;
		self
	}

	/// Substitutes a throttling policy. Defaults to [`ErrorEventThrottler`]
	/// configured from the options.
	pub fn throttler(mut self, throttler: Arc<dyn Throttler>) -> Self {
		self.throttler = Some(throttler);
		self
	}

	/// Substitutes the clock driving debounce and dedupe windows.
	pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}

	/// Validates the options and assembles the gate.
	pub fn build(self) -> Result<CaptureGate> {
		self.options.validate()?;

		let throttler = self.throttler.unwrap_or_else(|| {
			Arc::new(ErrorEventThrottler::with_clock(
				self.options.dedupe_window(),
				self.options.max_tracked_fingerprints,
				Arc::clone(&self.clock),
			))
		});

		info!(
			dedupe_window_ms = self.options.dedupe_window_ms,
			max_tracked_fingerprints = self.options.max_tracked_fingerprints,
			log_debouncing = self.options.enable_log_debouncing,
			"capture gate initialized"
		);

		Ok(CaptureGate {
			log_debounce: TimeDebounce::with_clock(
				self.options.debounce_time_log(),
				Arc::clone(&self.clock),
			),
			warning_debounce: TimeDebounce::with_clock(
				self.options.debounce_time_warning(),
				Arc::clone(&self.clock),
			),
			error_debounce: TimeDebounce::with_clock(
				self.options.debounce_time_error(),
				Arc::clone(&self.clock),
			),
			throttler,
			sink: self.sink,
			options: self.options,
			suppressed_events: 0,
		})
	}
}
