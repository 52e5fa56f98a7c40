use std::{fmt::Debug, io, path::Path};

use walkdir::WalkDir;

use crate::{error::Error, resource::FileReference};

/// A trait for any component that narrows a directory listing down to the files
/// that should be archived.
pub trait Selector: Debug {
	fn select(&self, dir: &Path) -> Result<Vec<FileReference>, Error>;
}

/// Selects the direct children of a directory whose name ends in `.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSelector {
	suffix: String,
}

impl ExtensionSelector {
	/// `"txt"` and `".txt"` are equivalent. An empty extension matches names that
	/// end in a bare dot; the CLI never passes one.
	pub fn new(extension: &str) -> Self {
		let extension = extension.trim().trim_start_matches('.');
		Self {
			suffix: format!(".{extension}"),
		}
	}

	pub fn extension(&self) -> &str {
		&self.suffix[1..]
	}

	pub fn matches(&self, name: &str) -> bool {
		name.ends_with(&self.suffix)
	}
}

impl Selector for ExtensionSelector {
	#[tracing::instrument(level = "debug", skip(self), fields(extension = self.extension()))]
	fn select(&self, dir: &Path) -> Result<Vec<FileReference>, Error> {
		let read_error = |source: io::Error| Error::DirectoryRead {
			source,
			path: dir.to_path_buf(),
		};

		let metadata = std::fs::metadata(dir).map_err(read_error)?;
		if !metadata.is_dir() {
			return Err(read_error(io::Error::other("not a directory")));
		}

		let mut selected = Vec::new();
		for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
			let entry = entry.map_err(|e| read_error(e.into()))?;
			let file_type = entry.file_type();
			let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
			if !is_file {
				continue;
			}

			let name = entry.file_name().to_string_lossy();
			if self.matches(&name) {
				tracing::debug!(file = %entry.path().display(), "selected");
				selected.push(FileReference::new(dir.join(entry.file_name())));
			}
		}

		Ok(selected)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::fs;

	fn names(files: &[FileReference]) -> Vec<String> {
		files.iter().map(FileReference::base_name).collect()
	}

	#[test]
	fn leading_dot_is_ignored() {
		assert_eq!(ExtensionSelector::new(".txt"), ExtensionSelector::new("txt"));
		assert_eq!(ExtensionSelector::new("txt").extension(), "txt");
	}

	#[test]
	fn matches_suffix_only() {
		let selector = ExtensionSelector::new("txt");
		assert!(selector.matches("notes.txt"));
		assert!(selector.matches("archive.tar.txt"));
		assert!(!selector.matches("notes.txt.bak"));
		assert!(!selector.matches("txt"));
		assert!(!selector.matches("notestxt"));
	}

	#[test]
	fn selects_matching_files_in_name_order() {
		let dir = tempfile::tempdir().unwrap();
		for name in ["c.txt", "a.txt", "b.csv", "b.txt"] {
			fs::write(dir.path().join(name), name).unwrap();
		}

		let selected = ExtensionSelector::new("txt").select(dir.path()).unwrap();
		assert_eq!(names(&selected), vec!["a.txt", "b.txt", "c.txt"]);
		assert!(selected.iter().all(|f| f.path.starts_with(dir.path())));
	}

	#[test]
	fn skips_directories_and_nested_files() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir(dir.path().join("folder.txt")).unwrap();
		fs::write(dir.path().join("folder.txt").join("inner.txt"), "").unwrap();
		fs::write(dir.path().join("top.txt"), "").unwrap();

		let selected = ExtensionSelector::new("txt").select(dir.path()).unwrap();
		assert_eq!(names(&selected), vec!["top.txt"]);
	}

	#[test]
	fn no_match_is_empty() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("a.csv"), "").unwrap();
		let selected = ExtensionSelector::new("txt").select(dir.path()).unwrap();
		assert!(selected.is_empty());
	}

	#[test]
	fn missing_directory_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("nope");
		let err = ExtensionSelector::new("txt").select(&missing).unwrap_err();
		assert!(matches!(err, Error::DirectoryRead { ref path, .. } if path == &missing));
	}

	#[test]
	fn file_instead_of_directory_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("a.txt");
		fs::write(&file, "").unwrap();
		let err = ExtensionSelector::new("txt").select(&file).unwrap_err();
		assert!(matches!(err, Error::DirectoryRead { .. }));
	}
}
