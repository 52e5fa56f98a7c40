use std::fmt::Debug;

use crate::{context::settings::BatchSize, engine::batch::Batch, resource::FileReference};

/// A trait for any component that splits the selected files into the batches that
/// become archives.
pub trait Partitioner: Debug {
	fn partition(&self, files: Vec<FileReference>) -> Vec<Batch>;
}

/// Cuts the input into consecutive windows of `size` files. Window `i` covers
/// `[i * size, min((i + 1) * size, n))`, so only the last batch may be short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPartitioner {
	pub size: BatchSize,
}

impl ChunkPartitioner {
	pub fn new(size: BatchSize) -> Self {
		Self { size }
	}
}

impl Partitioner for ChunkPartitioner {
	fn partition(&self, files: Vec<FileReference>) -> Vec<Batch> {
		if files.is_empty() {
			return Vec::new();
		}

		match self.size {
			BatchSize::Whole => vec![Batch::new(0, files)],
			BatchSize::Fixed(size) => files
				.chunks(size.get())
				.enumerate()
				.map(|(index, chunk)| Batch::new(index, chunk.to_vec()))
				.collect(),
		}
	}
}
