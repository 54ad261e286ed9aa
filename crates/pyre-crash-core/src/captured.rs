// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Captured error objects fed to fingerprinting and throttling.

use std::error::Error;

/// Accessor view of a captured error.
///
/// Object safe so throttling policies can take `&dyn ErrorLike` at the call
/// boundary. Implementations hand out borrowed parts; the fingerprint hasher
/// folds them together without allocating.
pub trait ErrorLike {
	/// Runtime type name of the underlying error.
	fn type_name(&self) -> &str;

	/// Human-readable error message.
	fn message(&self) -> &str;

	/// Captured stack trace, if one was recorded.
	fn stack_trace(&self) -> Option<&str>;
}

/// An owned captured error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
	pub type_name: String,
	pub message: String,
	pub stack_trace: Option<String>,
}

impl CapturedError {
	/// Creates a captured error from explicit parts.
	pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			message: message.into(),
			stack_trace: None,
		}
	}

	/// Attaches a captured stack trace.
	pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
		self.stack_trace = Some(stack_trace.into());
		self
	}

	/// Creates a captured error from any [`std::error::Error`].
	///
	/// The type name comes from the concrete type behind the reference and
	/// the message from its `Display` implementation.
	pub fn from_error<E>(error: &E) -> Self
	where
		E: Error + ?Sized,
	{
		Self {
			type_name: std::any::type_name_of_val(error).to_string(),
			message: error.to_string(),
			stack_trace: None,
		}
	}
}

impl ErrorLike for CapturedError {
	fn type_name(&self) -> &str {
		&self.type_name
	}

	fn message(&self) -> &str {
		&self.message
	}

	fn stack_trace(&self) -> Option<&str> {
		self.stack_trace.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fmt;

	#[derive(Debug)]
	struct BrokenPipe;

	impl fmt::Display for BrokenPipe {
		fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			write!(f, "pipe closed mid-write")
		}
	}

	impl Error for BrokenPipe {}

	#[test]
	fn from_error_uses_concrete_type_name() {
		let captured = CapturedError::from_error(&BrokenPipe);
		assert!(captured.type_name.contains("BrokenPipe"));
		assert_eq!(captured.message, "pipe closed mid-write");
		assert_eq!(captured.stack_trace, None);
	}

	#[test]
	fn with_stack_trace_attaches_trace() {
		let captured =
			CapturedError::new("IoError", "read failed").with_stack_trace("at read_loop\nat main");
		assert_eq!(captured.stack_trace(), Some("at read_loop\nat main"));
	}
}
