// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Throttling and debouncing options for the capture pipeline.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use pyre_crash_throttle::DEFAULT_MAX_TRACKED_FINGERPRINTS;

use crate::error::{CrashSdkError, Result};

/// Default dedupe window for repeated error events, in milliseconds.
pub const DEFAULT_DEDUPE_WINDOW_MS: u64 = 5_000;

/// Default per-severity debounce window, in milliseconds.
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u64 = 1_000;

/// Throttling and debouncing options for the capture pipeline.
///
/// Hydrates from the same JSON document the host application ships its SDK
/// configuration in. All durations are in milliseconds; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
	/// Whether the legacy per-severity time debouncing runs ahead of the
	/// fingerprint throttler. Off by default.
	pub enable_log_debouncing: bool,
	/// Debounce window for plain log lines, in milliseconds.
	pub debounce_time_log_ms: u64,
	/// Debounce window for warnings, in milliseconds.
	pub debounce_time_warning_ms: u64,
	/// Debounce window for errors, exceptions, and asserts, in milliseconds.
	pub debounce_time_error_ms: u64,
	/// Window within which repeated error events are deduplicated, in
	/// milliseconds.
	pub dedupe_window_ms: u64,
	/// Maximum number of distinct fingerprints tracked for deduplication.
	pub max_tracked_fingerprints: usize,
	/// Whether error log lines are captured as events in addition to
	/// breadcrumbs.
	pub capture_log_error_events: bool,
}

impl Default for CaptureOptions {
	fn default() -> Self {
		Self {
			enable_log_debouncing: false,
			debounce_time_log_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
			debounce_time_warning_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
			debounce_time_error_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
			dedupe_window_ms: DEFAULT_DEDUPE_WINDOW_MS,
			max_tracked_fingerprints: DEFAULT_MAX_TRACKED_FINGERPRINTS,
			capture_log_error_events: true,
		}
	}
}

impl CaptureOptions {
	/// Parses and validates options from a JSON document.
	pub fn from_json(json: &str) -> Result<Self> {
		let options: Self = serde_json::from_str(json)?;
		options.validate()?;
		Ok(options)
	}

	/// Rejects option values the lower layers would otherwise clamp
	/// silently.
	pub fn validate(&self) -> Result<()> {
		if self.max_tracked_fingerprints == 0 {
			return Err(CrashSdkError::InvalidOptions(
				"max_tracked_fingerprints must be at least 1".to_string(),
			));
		}
		if self.dedupe_window_ms == 0 {
			return Err(CrashSdkError::InvalidOptions(
				"dedupe_window_ms must be at least 1".to_string(),
			));
		}
		Ok(())
	}

	/// Dedupe window as a duration.
	pub fn dedupe_window(&self) -> Duration {
		Duration::milliseconds(self.dedupe_window_ms as i64)
	}

	/// Plain log debounce window as a duration.
	pub fn debounce_time_log(&self) -> Duration {
		Duration::milliseconds(self.debounce_time_log_ms as i64)
	}

	/// Warning debounce window as a duration.
	pub fn debounce_time_warning(&self) -> Duration {
		Duration::milliseconds(self.debounce_time_warning_ms as i64)
	}

	/// Error debounce window as a duration.
	pub fn debounce_time_error(&self) -> Duration {
		Duration::milliseconds(self.debounce_time_error_ms as i64)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_defaults() {
		let options = CaptureOptions::default();
		assert!(!options.enable_log_debouncing);
		assert_eq!(options.debounce_time_log_ms, 1000);
		assert_eq!(options.debounce_time_warning_ms, 1000);
		assert_eq!(options.debounce_time_error_ms, 1000);
		assert_eq!(options.dedupe_window_ms, 5000);
		assert_eq!(options.max_tracked_fingerprints, 100);
		assert!(options.capture_log_error_events);
	}

	#[test]
	fn test_from_json_overrides_subset() {
		let options = CaptureOptions::from_json(
			r#"{"enable_log_debouncing": true, "dedupe_window_ms": 250}"#,
		)
		.unwrap();
		assert!(options.enable_log_debouncing);
		assert_eq!(options.dedupe_window_ms, 250);
		// Untouched fields keep their defaults.
		assert_eq!(options.max_tracked_fingerprints, 100);
	}

	#[test]
	fn test_from_json_rejects_malformed_document() {
		assert!(matches!(
			CaptureOptions::from_json("not json"),
			Err(CrashSdkError::OptionsParse(_))
		));
	}

	#[test]
	fn test_validate_rejects_zero_capacity() {
		let options = CaptureOptions {
			max_tracked_fingerprints: 0,
			..Default::default()
		};
		assert!(matches!(
			options.validate(),
			Err(CrashSdkError::InvalidOptions(_))
		));
	}

	#[test]
	fn test_validate_rejects_zero_window() {
		let options = CaptureOptions {
			dedupe_window_ms: 0,
			..Default::default()
		};
		assert!(options.validate().is_err());
	}

	#[test]
	fn test_duration_accessors_convert_milliseconds() {
		let options = CaptureOptions {
			dedupe_window_ms: 1500,
			..Default::default()
		};
		assert_eq!(options.dedupe_window(), Duration::milliseconds(1500));
		assert_eq!(options.debounce_time_error(), Duration::milliseconds(1000));
	}

	proptest! {
		#[test]
		fn options_json_roundtrip(
			enable in any::<bool>(),
			window_ms in 1u64..100_000,
			fingerprints in 1usize..10_000,
		) {
			let options = CaptureOptions {
				enable_log_debouncing: enable,
				dedupe_window_ms: window_ms,
				max_tracked_fingerprints: fingerprints,
				..Default::default()
			};
			let json = serde_json::to_string(&options).unwrap();
			let parsed = CaptureOptions::from_json(&json).unwrap();
			prop_assert_eq!(options, parsed);
		}
	}
}
