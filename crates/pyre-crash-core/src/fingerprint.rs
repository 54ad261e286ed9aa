// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content fingerprinting for recognizing repeated error occurrences.

use std::fmt;

use crate::captured::ErrorLike;

/// Maximum number of stack trace characters folded into a fingerprint.
///
/// Engine stack traces frequently run to kilobytes while the leading frames
/// carry nearly all of the identity, so hashing a bounded prefix keeps the
/// hot path cheap without losing grouping precision.
pub const DEFAULT_STACK_PREFIX_CHARS: usize = 200;

const HASH_SEED: u32 = 17;
const HASH_MULTIPLIER: u32 = 31;
const TYPE_MESSAGE_SEPARATOR: char = ':';

/// A stable 32-bit content fingerprint.
///
/// Identical inputs always produce identical fingerprints. Collisions are
/// possible and tolerated: at worst a distinct error is suppressed as a
/// duplicate, never reported under the wrong severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub u32);

impl fmt::Display for Fingerprint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:08x}", self.0)
	}
}

/// Hash a bounded prefix of a string.
///
/// Multiplicative accumulation over Unicode scalar values with wrapping
/// arithmetic. Multiplication keeps reordered content from cancelling out
/// the way XOR folding would.
fn hash_str_prefix(s: &str, max_chars: usize) -> u32 {
	let mut hash = HASH_SEED;
	for ch in s.chars().take(max_chars) {
		hash = hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(ch as u32);
	}
	hash
}

/// Fingerprint a log occurrence from its message and optional stack trace.
///
/// Uses the default stack prefix budget of [`DEFAULT_STACK_PREFIX_CHARS`].
pub fn fingerprint_message(message: &str, stack_trace: Option<&str>) -> Fingerprint {
	fingerprint_message_with_limit(message, stack_trace, DEFAULT_STACK_PREFIX_CHARS)
}

/// Fingerprint a log occurrence with an explicit stack prefix budget.
///
/// The full message is hashed; at most `max_stack_chars` characters of the
/// stack trace are folded in afterwards. A missing or empty stack trace
/// contributes nothing, so occurrences without one still fingerprint cleanly.
pub fn fingerprint_message_with_limit(
	message: &str,
	stack_trace: Option<&str>,
	max_stack_chars: usize,
) -> Fingerprint {
	let mut hash = hash_str_prefix(message, usize::MAX);
	if let Some(stack) = stack_trace.filter(|s| !s.is_empty()) {
		hash = hash
			.wrapping_mul(HASH_MULTIPLIER)
			.wrapping_add(hash_str_prefix(stack, max_stack_chars));
	}
	Fingerprint(hash)
}

/// Fingerprint an error object without building an intermediate string.
///
/// Combines, in order:
/// 1. The runtime type name
/// 2. A literal `:` separator term
/// 3. The error message
/// 4. A bounded stack trace prefix, when one was captured
///
/// The parts are folded numerically so the error path never allocates a
/// combined `Type:Message` string just to hash it.
pub fn fingerprint_error(error: &dyn ErrorLike) -> Fingerprint {
	let mut hash = hash_str_prefix(error.type_name(), usize::MAX);
	hash = hash
		.wrapping_mul(HASH_MULTIPLIER)
		.wrapping_add(TYPE_MESSAGE_SEPARATOR as u32);
	hash = hash
		.wrapping_mul(HASH_MULTIPLIER)
		.wrapping_add(hash_str_prefix(error.message(), usize::MAX));
	if let Some(stack) = error.stack_trace().filter(|s| !s.is_empty()) {
		hash = hash
			.wrapping_mul(HASH_MULTIPLIER)
			.wrapping_add(hash_str_prefix(stack, DEFAULT_STACK_PREFIX_CHARS));
	}
	Fingerprint(hash)
}
