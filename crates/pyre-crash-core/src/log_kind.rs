// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Log severity kinds as delivered by the host engine's logging callback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CrashError;

/// Severity classification attached to every message the host engine's
/// logging callback delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
	Log,
	Warning,
	Error,
	Exception,
	Assert,
}

impl LogKind {
	/// Whether occurrences of this kind are subject to event throttling.
	///
	/// Only error-grade kinds are throttled. Plain logs and warnings always
	/// pass through so they remain available as breadcrumb context.
	pub fn is_throttle_eligible(self) -> bool {
		matches!(self, Self::Error | Self::Exception | Self::Assert)
	}
}

impl fmt::Display for LogKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Log => write!(f, "log"),
			Self::Warning => write!(f, "warning"),
			Self::Error => write!(f, "error"),
			Self::Exception => write!(f, "exception"),
			Self::Assert => write!(f, "assert"),
		}
	}
}

impl FromStr for LogKind {
	type Err = CrashError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"log" => Ok(Self::Log),
			"warning" => Ok(Self::Warning),
			"error" => Ok(Self::Error),
			"exception" => Ok(Self::Exception),
			"assert" => Ok(Self::Assert),
			_ => Err(CrashError::InvalidLogKind(s.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn throttle_eligibility_covers_error_grades_only() {
		assert!(LogKind::Error.is_throttle_eligible());
		assert!(LogKind::Exception.is_throttle_eligible());
		assert!(LogKind::Assert.is_throttle_eligible());
		assert!(!LogKind::Warning.is_throttle_eligible());
		assert!(!LogKind::Log.is_throttle_eligible());
	}

	#[test]
	fn parse_rejects_unknown_kind() {
		assert!("fatal".parse::<LogKind>().is_err());
	}

	#[test]
	fn serde_uses_snake_case() {
		let json = serde_json::to_string(&LogKind::Exception).unwrap();
		assert_eq!(json, "\"exception\"");
		let parsed: LogKind = serde_json::from_str("\"assert\"").unwrap();
		assert_eq!(parsed, LogKind::Assert);
	}

	proptest! {
		#[test]
		fn log_kind_roundtrip(kind in prop_oneof![
			Just(LogKind::Log),
			Just(LogKind::Warning),
			Just(LogKind::Error),
			Just(LogKind::Exception),
			Just(LogKind::Assert),
		]) {
			let s = kind.to_string();
			let parsed: LogKind = s.parse().unwrap();
			prop_assert_eq!(kind, parsed);
		}
	}
}
