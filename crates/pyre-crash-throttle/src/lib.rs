// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error event throttling and deduplication for the Pyre crash reporting SDK.
//!
//! A single error inside a game loop can fire every frame, dozens of times
//! per second, and exhaust a project's event quota in minutes. This crate
//! decides, synchronously inside the host engine's logging callback, whether
//! each occurrence is captured or suppressed.
//!
//! # Overview
//!
//! - [`Throttler`] is the policy seam the capture pipeline consults
//! - [`ErrorEventThrottler`] is the canonical implementation: a bounded
//!   time-windowed [`DedupeCache`] keyed by content fingerprint, evicting
//!   the least recently admitted entry at capacity
//! - [`ContentDebounce`], [`TimeDebounce`], and [`KindConditionFilter`] are
//!   legacy single-threaded variants kept for older wiring
//! - [`Clock`] injects time so window behavior is testable without sleeping

pub mod cache;
pub mod clock;
pub mod debounce;
pub mod filter;
pub mod throttler;

pub use cache::{DedupeCache, DEFAULT_MAX_TRACKED_FINGERPRINTS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{ContentDebounce, TimeDebounce, DEFAULT_CONTENT_SLOTS};
pub use filter::KindConditionFilter;
pub use throttler::{ErrorEventThrottler, Throttler};
