use std::{
	collections::HashMap,
	fs::File,
	path::{Path, PathBuf},
};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::{
	context::services::reporter::ui::ProgressBarHandle,
	engine::batch::Batch,
	error::Error,
	resource::FileReference,
};

/// What ended up (or would end up) on disk for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
	pub path: PathBuf,
	pub members: Vec<String>,
	/// Uncompressed bytes copied into the archive. Always 0 for a dry run.
	pub bytes: u64,
}

/// Writes each batch to `<output_dir>/<index>.zip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipArchiver {
	output_dir: PathBuf,
}

impl ZipArchiver {
	pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
		Self {
			output_dir: output_dir.as_ref().to_path_buf(),
		}
	}

	pub fn archive_path(&self, batch: &Batch) -> PathBuf {
		self.output_dir.join(batch.archive_name())
	}

	/// The summary `write` would produce, without touching the filesystem.
	pub fn plan(&self, batch: &Batch) -> ArchiveSummary {
		ArchiveSummary {
			path: self.archive_path(batch),
			members: batch.files.iter().map(FileReference::base_name).collect(),
			bytes: 0,
		}
	}

	/// Fails when writing `batches` would overwrite one of the files they hold,
	/// which happens when the output directory is the scanned one and the
	/// selected extension is `zip`.
	pub fn check_collisions(&self, batches: &[Batch]) -> Result<(), Error> {
		let Ok(output_dir) = self.output_dir.canonicalize() else {
			return Ok(());
		};

		let sources: HashMap<PathBuf, &FileReference> = batches
			.iter()
			.flat_map(|batch| &batch.files)
			.filter_map(|file| file.path.canonicalize().ok().map(|path| (path, file)))
			.collect();

		for batch in batches {
			if let Some(file) = sources.get(&output_dir.join(batch.archive_name())) {
				return Err(Error::OutputCollision {
					archive: self.archive_path(batch),
					file: file.path.clone(),
				});
			}
		}
		Ok(())
	}

	/// Creates the archive for `batch`, replacing any file already at that path.
	///
	/// The first failure aborts the write and is returned as is. The partially
	/// written archive is left on disk; every handle opened here is closed before
	/// returning.
	#[tracing::instrument(level = "info", skip(self, batch, progress), fields(index = batch.index, members = batch.len()), err)]
	pub fn write(&self, batch: &Batch, progress: &dyn ProgressBarHandle) -> Result<ArchiveSummary, Error> {
		let path = self.archive_path(batch);
		let file = File::create(&path).map_err(|source| Error::ArchiveCreate {
			source,
			path: path.clone(),
		})?;

		let mut zip = ZipWriter::new(file);
		let mut members = Vec::with_capacity(batch.len());
		let mut bytes = 0;

		for source in &batch.files {
			let member = source.base_name();
			progress.set_message(format!("{} <- {member}", batch.archive_name()));
			let copied = Self::add_member(&mut zip, &path, source, &member)?;
			progress.increment(copied);
			bytes += copied;
			members.push(member);
		}

		zip.finish().map_err(|source| Error::ArchiveFinish {
			source,
			path: path.clone(),
		})?;

		Ok(ArchiveSummary { path, members, bytes })
	}

	fn add_member(zip: &mut ZipWriter<File>, archive: &Path, source: &FileReference, member: &str) -> Result<u64, Error> {
		let open_error = |e: std::io::Error| Error::SourceOpen {
			source: e,
			path: source.path.clone(),
		};
		let mut reader = File::open(&source.path).map_err(open_error)?;
		let size = reader.metadata().map_err(open_error)?.len();

		let options = SimpleFileOptions::default()
			.compression_method(CompressionMethod::Deflated)
			.large_file(size >= u64::from(u32::MAX));

		zip.start_file(member, options).map_err(|e| Error::MemberCreate {
			source: e,
			archive: archive.to_path_buf(),
			member: member.to_string(),
		})?;

		let copied = std::io::copy(&mut reader, zip).map_err(|e| Error::Copy {
			source: e,
			path: source.path.clone(),
			archive: archive.to_path_buf(),
		})?;
		tracing::debug!(member, copied, "member written");
		Ok(copied)
	}
}
