// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Pyre crash reporting SDK.
//!
//! This crate provides the shared vocabulary of the SDK's capture pipeline:
//! the log severity kinds delivered by the host engine's logging callback,
//! content fingerprinting for recognizing repeated error occurrences, and
//! the captured-error view those fingerprints are computed from. The
//! throttling engine itself lives in `pyre-crash-throttle`; the engine-side
//! wiring lives in `pyre-crash`.
//!
//! # Overview
//!
//! Fingerprints are stable 32-bit content hashes:
//! - Log occurrences hash the full message plus a bounded stack trace prefix
//! - Error objects hash type name, message, and stack prefix incrementally,
//!   without building an intermediate combined string
//! - Identical inputs always produce identical fingerprints; collisions are
//!   tolerated as a false-duplicate risk and never affect severity handling

pub mod captured;
pub mod error;
pub mod fingerprint;
pub mod log_kind;

pub use captured::{CapturedError, ErrorLike};
pub use error::{CrashError, Result};
pub use fingerprint::{
	fingerprint_error, fingerprint_message, fingerprint_message_with_limit, Fingerprint,
	DEFAULT_STACK_PREFIX_CHARS,
};
pub use log_kind::LogKind;
