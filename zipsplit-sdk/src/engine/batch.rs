use crate::{resource::FileReference, ARCHIVE_EXTENSION};

/// A contiguous run of selected files that ends up in a single archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
	/// Position of this batch in the run, starting at 0. Also the archive's stem.
	pub index: usize,
	pub files: Vec<FileReference>,
}

impl Batch {
	pub fn new(index: usize, files: Vec<FileReference>) -> Self {
		Self { index, files }
	}

	pub fn archive_name(&self) -> String {
		format!("{}.{ARCHIVE_EXTENSION}", self.index)
	}

	pub fn len(&self) -> usize {
		self.files.len()
	}

	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}
}
