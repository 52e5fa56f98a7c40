use std::{
	fmt::Display,
	num::NonZeroUsize,
	path::{Path, PathBuf},
	str::FromStr,
};

use serde::Deserialize;

use crate::error::Error;

pub const DEFAULT_DIRECTORY: &str = ".";
pub const DEFAULT_EXTENSION: &str = "txt";

/// How many files go into each archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "usize")]
pub enum BatchSize {
	/// A single archive holding every selected file. This is what a size of `0` means.
	#[default]
	Whole,
	Fixed(NonZeroUsize),
}

impl From<usize> for BatchSize {
	fn from(value: usize) -> Self {
		match NonZeroUsize::new(value) {
			Some(size) => Self::Fixed(size),
			None => Self::Whole,
		}
	}
}

impl FromStr for BatchSize {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		trimmed
			.parse::<usize>()
			.map(Self::from)
			.map_err(|_| Error::InvalidBatchSize(trimmed.to_string()))
	}
}

impl Display for BatchSize {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Whole => write!(f, "0"),
			Self::Fixed(size) => write!(f, "{size}"),
		}
	}
}

/// The resolved configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSettings {
	/// Directory scanned for candidate files. Only its direct children are considered.
	pub directory: PathBuf,
	/// Extension to select, without the leading dot.
	pub extension: String,
	pub batch_size: BatchSize,
	/// Where `0.zip`, `1.zip`, ... are written.
	pub output_dir: PathBuf,
	pub dry_run: bool,
}

impl Default for SplitSettings {
	fn default() -> Self {
		Self {
			directory: PathBuf::from(DEFAULT_DIRECTORY),
			extension: DEFAULT_EXTENSION.to_string(),
			batch_size: BatchSize::default(),
			output_dir: PathBuf::from(DEFAULT_DIRECTORY),
			dry_run: false,
		}
	}
}

impl SplitSettings {
	/// Overlays every value present in `file` on top of `self`.
	pub fn merge(mut self, file: SettingsFile) -> Self {
		if let Some(directory) = file.directory {
			self.directory = directory;
		}
		if let Some(extension) = file.extension {
			self.extension = extension;
		}
		if let Some(batch_size) = file.batch_size {
			self.batch_size = batch_size;
		}
		if let Some(output_dir) = file.output_dir {
			self.output_dir = output_dir;
		}
		self
	}
}

/// The optional TOML file accepted by `--config`. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
	pub directory: Option<PathBuf>,
	pub extension: Option<String>,
	pub batch_size: Option<BatchSize>,
	pub output_dir: Option<PathBuf>,
}

impl SettingsFile {
	pub fn load(path: &Path) -> Result<Self, Error> {
		let content = std::fs::read_to_string(path).map_err(|e| Error::Config(format!("could not read {}: {e}", path.display())))?;
		Self::parse(&content).map_err(|e| match e {
			Error::Config(message) => Error::Config(format!("{}: {message}", path.display())),
			other => other,
		})
	}

	pub fn parse(content: &str) -> Result<Self, Error> {
		toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
	}
}
