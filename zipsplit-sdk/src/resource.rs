use std::{
	fmt::Display,
	path::{Path, PathBuf},
};

/// A regular file selected for archiving. Only ever read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileReference {
	pub path: PathBuf,
}

impl AsRef<Path> for FileReference {
	fn as_ref(&self) -> &Path {
		self.path.as_path()
	}
}

impl Display for FileReference {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.path.display())
	}
}

impl FileReference {
	pub fn new<P: AsRef<Path>>(path: P) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
		}
	}

	/// The final path component, used as the member name inside an archive.
	pub fn base_name(&self) -> String {
		self.path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| self.path.to_string_lossy().into_owned())
	}
}
