use console::{style, Emoji, Term};
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::{
	io::{Error, Write},
	sync::{Arc, Mutex},
};
use zipsplit_sdk::context::services::reporter::ui::{ProgressBarHandle, UserInterface};

/// The CLI-specific implementation of the UserInterface trait.
pub struct CliUi {
	/// The container that manages the rendering of all active progress bars.
	multi_progress: MultiProgress,
	/// Where messages go while the progress bars are hidden (stderr is not a terminal).
	plain: Mutex<Box<dyn Write + Send>>,
}

impl CliUi {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::with_targets(MultiProgress::new(), Box::new(Term::stdout())))
	}

	fn with_targets(multi_progress: MultiProgress, plain: Box<dyn Write + Send>) -> Self {
		Self {
			multi_progress,
			plain: Mutex::new(plain),
		}
	}

	fn println(&self, line: String) {
		let result = if self.multi_progress.is_hidden() {
			match self.plain.lock() {
				Ok(mut out) => writeln!(out, "{line}").and_then(|_| out.flush()),
				Err(_) => Ok(()),
			}
		} else {
			self.multi_progress.println(&line)
		};
		if let Err(e) = result {
			eprintln!("{line} ({e})");
		}
	}
}

impl Drop for CliUi {
	fn drop(&mut self) {
		if let Err(e) = self.multi_progress.clear() {
			eprintln!("Error clearing progress bars: {}", e);
		}
	}
}

struct CliProgressBar(ProgressBar);

impl ProgressBarHandle for CliProgressBar {
	fn increment(&self, delta: u64) {
		self.0.inc(delta);
	}

	fn set_message(&self, message: String) {
		self.0.set_message(message);
	}

	fn finish(&self) {
		self.0.finish_and_clear();
	}
}

impl UserInterface for CliUi {
	fn new_progress_bar(&self, title: &str, length: Option<u64>) -> Arc<dyn ProgressBarHandle> {
		let pb = match length {
			Some(len) => {
				let bar = self.multi_progress.add(ProgressBar::new(len));
				let style = ProgressStyle::with_template("{wide_msg} {bytes}/{total_bytes} ({eta}) [{bar:40.cyan/blue}]")
					.unwrap_or_else(|_| ProgressStyle::default_bar())
					.progress_chars("=>-");
				bar.set_style(style);
				bar
			}
			None => {
				let spinner = self.multi_progress.add(ProgressBar::new_spinner());
				spinner.set_style(ProgressStyle::with_template("{spinner:.blue} {wide_msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
				spinner
			}
		};
		pb.set_message(title.to_string());
		Arc::new(CliProgressBar(pb))
	}

	// --- User Input ---

	fn input(&self, prompt_text: &str, default: &str) -> Result<String, Error> {
		self.multi_progress.suspend(|| {
			Input::<String>::with_theme(&ColorfulTheme::default())
				.with_prompt(prompt_text)
				.default(default.to_string())
				.interact_text()
		})
	}

	// --- Structured Messaging ---

	fn success(&self, message: &str) {
		self.println(format!("{} {}", style(Emoji("✔", "✓")).green(), message));
	}

	fn info(&self, message: &str) {
		self.println(format!("{} {}", style(Emoji("ℹ", "i")).blue(), message));
	}

	fn warning(&self, message: &str) {
		self.println(format!("{} {}", style(Emoji("⚠", "!")).yellow(), message));
	}
}
