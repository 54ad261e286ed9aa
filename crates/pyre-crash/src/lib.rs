// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Engine-side capture wiring for the Pyre crash reporting SDK.
//!
//! This crate sits between the host engine's logging callback and the
//! reporting pipeline. [`CaptureGate`] receives every log line and captured
//! error object, filters out the SDK's own diagnostics, applies the
//! configured throttling policy, and routes what survives to a
//! [`CaptureSink`]: error events for error-grade lines, exception events for
//! unhandled exceptions, breadcrumbs for context.
//!
//! The throttling engine itself lives in `pyre-crash-throttle`; shared types
//! in `pyre-crash-core`. Event construction and transport are the sink
//! implementor's concern.

pub mod error;
pub mod gate;
pub mod options;

pub use error::{CrashSdkError, Result};
pub use gate::{CaptureGate, CaptureGateBuilder, CaptureSink, SDK_LOG_PREFIX};
pub use options::CaptureOptions;

pub use pyre_crash_core::{CapturedError, ErrorLike, Fingerprint, LogKind};
pub use pyre_crash_throttle::{ErrorEventThrottler, Throttler};
