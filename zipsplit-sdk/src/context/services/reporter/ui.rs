use std::{
	io::Error,
	sync::{Arc, Mutex},
};

/// An abstract, generic contract for all user-facing interactions.
pub trait UserInterface: Send + Sync {
	// --- Progress Indicator Management ---
	fn new_progress_bar(&self, title: &str, length: Option<u64>) -> Arc<dyn ProgressBarHandle>;

	// --- User Input ---
	fn input(&self, prompt_text: &str, default: &str) -> Result<String, Error>;

	// --- Structured Messaging ---
	fn info(&self, message: &str);
	fn success(&self, message: &str);
	fn warning(&self, message: &str);
}

pub trait ProgressBarHandle: Send + Sync {
	/// Increments the progress bar by `delta`.
	fn increment(&self, delta: u64);
	/// Updates the description message of the progress bar.
	fn set_message(&self, message: String);
	/// Finishes (removes) the progress bar.
	fn finish(&self);
}

/// A progress bar that draws nothing.
pub struct NoProgress;

impl ProgressBarHandle for NoProgress {
	fn increment(&self, _delta: u64) {}

	fn set_message(&self, _message: String) {}

	fn finish(&self) {}
}

/// A headless interface. Prompts resolve to their defaults and every message is
/// kept in memory, so callers without a terminal can inspect what would have
/// been shown.
#[derive(Default)]
pub struct SilentUi {
	messages: Mutex<Vec<String>>,
}

impl SilentUi {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn messages(&self) -> Vec<String> {
		self.messages.lock().map(|m| m.clone()).unwrap_or_default()
	}

	fn record(&self, message: &str) {
		if let Ok(mut messages) = self.messages.lock() {
			messages.push(message.to_string());
		}
	}
}

impl UserInterface for SilentUi {
	fn new_progress_bar(&self, _title: &str, _length: Option<u64>) -> Arc<dyn ProgressBarHandle> {
		Arc::new(NoProgress)
	}

	fn input(&self, _prompt_text: &str, default: &str) -> Result<String, Error> {
		Ok(default.to_string())
	}

	fn info(&self, message: &str) {
		self.record(message);
	}

	fn success(&self, message: &str) {
		self.record(message);
	}

	fn warning(&self, message: &str) {
		self.record(message);
	}
}
