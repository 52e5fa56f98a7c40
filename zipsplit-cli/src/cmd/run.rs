use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use zipsplit_sdk::{
	context::{
		services::reporter::ui::UserInterface,
		settings::{BatchSize, SettingsFile, SplitSettings, DEFAULT_EXTENSION},
	},
	engine::{Engine, RunReport},
	error::Error,
};

use crate::{cli::CliUi, cmd::Cmd};

const DIRECTORY_PROMPT: &str = "Directory to scan (. for the current directory)";
const EXTENSION_PROMPT: &str = "File extension to collect (e.g. txt)";
const BATCH_SIZE_PROMPT: &str = "Files per archive (0 puts everything in one archive)";

#[derive(Parser, Default, Debug)]
pub struct Run {
	/// TOML file with `directory`, `extension`, `batch_size` and `output_dir` keys.
	#[arg(long, short = 'c', value_hint = ValueHint::FilePath)]
	config: Option<PathBuf>,
	/// Directory whose files are archived. Subdirectories are ignored.
	#[arg(long = "dir", short = 'd', value_hint = ValueHint::DirPath)]
	directory: Option<PathBuf>,
	/// Extension of the files to archive, with or without the leading dot.
	#[arg(long = "ext", short = 'e')]
	extension: Option<String>,
	/// Files per archive. 0 puts every file in a single archive.
	#[arg(long = "size", short = 's', allow_hyphen_values = true)]
	batch_size: Option<String>,
	/// Where the numbered archives are written.
	#[arg(long = "output", short = 'o', value_hint = ValueHint::DirPath)]
	output_dir: Option<PathBuf>,
	/// Show which archives would be written without writing them.
	#[arg(long)]
	dry_run: bool,
	/// Never prompt; values not given as flags keep their defaults.
	#[arg(long = "no-prompt", short = 'y')]
	no_prompt: bool,
}

impl Cmd for Run {
	fn run(self) -> Result<()> {
		let ui = CliUi::new();
		let interactive = !self.no_prompt && console::user_attended();
		self.execute(ui, interactive).map(|_| ())
	}
}

impl Run {
	pub(crate) fn execute(&self, ui: Arc<dyn UserInterface>, interactive: bool) -> Result<RunReport> {
		let settings = self.resolve(ui.as_ref(), interactive)?;
		let dry_run = settings.dry_run;
		let output_dir = settings.output_dir.clone();
		let default_size = settings.batch_size;

		let engine = Engine::new(settings, ui.clone());
		let files = engine.select().context("could not select files")?;

		let size = match (&self.batch_size, interactive) {
			(Some(text), _) => batch_size_or_default(text, default_size, ui.as_ref()),
			(None, true) => {
				let text = prompt(ui.as_ref(), BATCH_SIZE_PROMPT, &default_size.to_string())?;
				batch_size_or_default(&text, default_size, ui.as_ref())
			}
			(None, false) => default_size,
		};

		let report = engine.split(files, size).context("could not write archives")?;

		if dry_run {
			ui.info(&format!("Dry run: {} archive(s) planned, nothing written.", report.archives.len()));
		} else {
			ui.success(&format!("{} archive(s) written to {}", report.archives.len(), output_dir.display()));
		}
		Ok(report)
	}

	/// Builds the settings from defaults, the config file, flags and prompts, in
	/// increasing order of precedence. The batch size is resolved later, once the
	/// number of matching files is known.
	fn resolve(&self, ui: &dyn UserInterface, interactive: bool) -> Result<SplitSettings> {
		let mut settings = SplitSettings::default();
		if let Some(path) = &self.config {
			let file = SettingsFile::load(path).with_context(|| format!("could not load config {}", path.display()))?;
			settings = settings.merge(file);
		}

		match &self.directory {
			Some(dir) => settings.directory = dir.clone(),
			None if interactive => {
				let current = settings.directory.to_string_lossy().into_owned();
				settings.directory = PathBuf::from(prompt(ui, DIRECTORY_PROMPT, &current)?);
			}
			None => {}
		}

		match &self.extension {
			Some(ext) => settings.extension = ext.clone(),
			None if interactive => settings.extension = prompt(ui, EXTENSION_PROMPT, &settings.extension)?,
			None => {}
		}
		if settings.extension.trim().trim_start_matches('.').is_empty() {
			tracing::warn!(extension = %settings.extension, "falling back to default extension");
			ui.warning("Invalid input. Using default value.");
			settings.extension = DEFAULT_EXTENSION.to_string();
		}

		if let Some(output_dir) = &self.output_dir {
			settings.output_dir = output_dir.clone();
		}
		settings.dry_run = self.dry_run;

		tracing::debug!(?settings, "settings resolved");
		Ok(settings)
	}
}

/// Asks for a value; empty input keeps `default`.
fn prompt(ui: &dyn UserInterface, text: &str, default: &str) -> Result<String, Error> {
	let answer = ui.input(text, default).map_err(|source| Error::Interaction {
		source,
		prompt: text.to_string(),
	})?;
	let answer = answer.trim();
	Ok(if answer.is_empty() { default.to_string() } else { answer.to_string() })
}

/// Parses a user supplied batch size, warning and falling back to `default` when
/// the text is not a non-negative integer.
fn batch_size_or_default(text: &str, default: BatchSize, ui: &dyn UserInterface) -> BatchSize {
	match text.parse::<BatchSize>() {
		Ok(size) => size,
		Err(e) => {
			tracing::warn!(error = %e, %default, "falling back to default batch size");
			ui.warning("Invalid input. Using default value.");
			default
		}
	}
}
