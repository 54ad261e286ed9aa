// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the crash core.

use thiserror::Error;

/// Result type alias for crash core operations.
pub type Result<T> = std::result::Result<T, CrashError>;

/// Errors that can occur in the crash core types.
#[derive(Debug, Error)]
pub enum CrashError {
	/// Unknown log kind string.
	#[error("invalid log kind: {0}")]
	InvalidLogKind(String),
}
