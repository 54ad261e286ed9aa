// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: Run a simulated log storm through the capture gate.
//!
//! Run with:
//!   cargo run --example log_storm -p pyre-crash

use std::sync::Arc;

use pyre_crash::{CaptureGate, CaptureOptions, CaptureSink, CapturedError, ErrorLike, LogKind};

/// Sink that prints what the reporting pipeline would send.
struct StdoutSink;

impl CaptureSink for StdoutSink {
	fn capture_event(&self, message: &str, _stack_trace: Option<&str>, kind: LogKind) {
		println!("EVENT      [{}] {}", kind, message);
	}

	fn capture_error(&self, error: &dyn ErrorLike) {
		println!("ERROR      {}: {}", error.type_name(), error.message());
	}

	fn add_breadcrumb(&self, message: &str, kind: LogKind) {
		println!("breadcrumb [{}] {}", kind, message);
	}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt::init();

	let mut gate = CaptureGate::builder(Arc::new(StdoutSink))
		.options(CaptureOptions::default())
		.build()?;

	// A failing asset load logs the same error every frame.
	println!("Simulating 60 frames of the same error line...");
	for _ in 0..60 {
		gate.handle_log(
			"Failed to load texture atlas 'ui_main'",
			Some("at AtlasLoader.load (atlas.rs:88)"),
			LogKind::Error,
		);
	}

	// Ordinary log traffic keeps flowing untouched.
	gate.handle_log("level 3 loaded", None, LogKind::Log);
	gate.handle_log("frame time above budget", None, LogKind::Warning);

	// A distinct error is its own issue and is captured.
	gate.handle_log(
		"Failed to load texture atlas 'ui_hud'",
		Some("at AtlasLoader.load (atlas.rs:88)"),
		LogKind::Error,
	);

	// Captured error objects are throttled by content too.
	let error = CapturedError::new("SaveCorrupt", "header checksum mismatch")
		.with_stack_trace("at SaveFile.open (save.rs:31)");
	gate.handle_error(&error);
	gate.handle_error(&error);

	println!("\nSuppressed occurrences: {}", gate.take_suppressed_events());

	Ok(())
}
