// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the crash SDK wiring.

use thiserror::Error;

/// Result type alias for crash SDK operations.
pub type Result<T> = std::result::Result<T, CrashSdkError>;

/// Errors that can occur while wiring up the capture pipeline.
#[derive(Debug, Error)]
pub enum CrashSdkError {
	/// Option combination that cannot work at runtime.
	#[error("invalid options: {0}")]
	InvalidOptions(String),

	/// Failed to parse options from JSON.
	#[error("options parse error: {0}")]
	OptionsParse(#[from] serde_json::Error),
}
