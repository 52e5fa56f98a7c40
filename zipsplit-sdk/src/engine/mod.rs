pub mod batch;

use std::{path::PathBuf, sync::Arc};

use crate::{
	context::{
		services::{reporter::ui::UserInterface, RunServices},
		settings::{BatchSize, SplitSettings},
		ExecutionContext,
	},
	engine::batch::Batch,
	error::Error,
	plugins::{
		archiver::{ArchiveSummary, ZipArchiver},
		partitioner::{ChunkPartitioner, Partitioner},
		selector::{ExtensionSelector, Selector},
	},
	resource::FileReference,
};

/// The outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
	/// How many files matched the extension.
	pub selected: usize,
	/// One entry per archive, in index order.
	pub archives: Vec<ArchiveSummary>,
}

impl RunReport {
	pub fn paths(&self) -> Vec<PathBuf> {
		self.archives.iter().map(|a| a.path.clone()).collect()
	}
}

/// The main engine for the application.
/// It owns the resolved settings and all run-wide services.
pub struct Engine {
	settings: SplitSettings,
	services: RunServices,
	selector: Box<dyn Selector>,
	archiver: ZipArchiver,
}

impl Engine {
	pub fn new(settings: SplitSettings, ui: Arc<dyn UserInterface>) -> Self {
		Self {
			selector: Box::new(ExtensionSelector::new(&settings.extension)),
			archiver: ZipArchiver::new(&settings.output_dir),
			services: RunServices::new(ui),
			settings,
		}
	}

	/// Selects, partitions and archives with the configured batch size, stopping at
	/// the first error.
	pub fn run(&self) -> Result<RunReport, Error> {
		let files = self.select()?;
		self.split(files, self.settings.batch_size)
	}

	/// Lists the configured directory and reports how many files matched.
	#[tracing::instrument(level = "debug", skip(self), fields(directory = %self.settings.directory.display(), extension = %self.settings.extension))]
	pub fn select(&self) -> Result<Vec<FileReference>, Error> {
		let ctx = ExecutionContext::new(&self.services, &self.settings);
		let files = self.selector.select(&ctx.settings.directory)?;
		ctx.services
			.reporter
			.info(&format!("Total number of {} count: {}", ctx.settings.extension, files.len()));
		Ok(files)
	}

	/// Partitions `files` into batches of `size` and archives them in order.
	#[tracing::instrument(level = "debug", skip(self, files), fields(files = files.len(), %size))]
	pub fn split(&self, files: Vec<FileReference>, size: BatchSize) -> Result<RunReport, Error> {
		let ctx = ExecutionContext::new(&self.services, &self.settings);
		let selected = files.len();

		let batches = ChunkPartitioner::new(size).partition(files);
		tracing::debug!(batches = batches.len(), "partitioned");
		self.archiver.check_collisions(&batches)?;

		let mut archives = Vec::with_capacity(batches.len());
		for batch in &batches {
			let summary = if ctx.settings.dry_run {
				self.plan(&ctx, batch)
			} else {
				self.archive(&ctx, batch)?
			};
			archives.push(summary);
		}

		Ok(RunReport { selected, archives })
	}

	fn plan(&self, ctx: &ExecutionContext, batch: &Batch) -> ArchiveSummary {
		let summary = self.archiver.plan(batch);
		ctx.services.reporter.info(&format!(
			"Would create zip archive: {} ({})",
			summary.path.display(),
			summary.members.join(", ")
		));
		summary
	}

	fn archive(&self, ctx: &ExecutionContext, batch: &Batch) -> Result<ArchiveSummary, Error> {
		let reporter = &ctx.services.reporter;
		let name = batch.archive_name();
		reporter.info(&format!("Creating zip archive: {name}"));

		let total = batch
			.files
			.iter()
			.map(|f| std::fs::metadata(f).map(|m| m.len()))
			.sum::<Result<u64, _>>()
			.ok();
		let progress = reporter.progress(&name, total);
		let result = self.archiver.write(batch, progress.as_ref());
		progress.finish();

		let summary = result?;
		reporter.success(&format!("Zip archive created: {}", summary.path.display()));
		Ok(summary)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::services::reporter::ui::SilentUi;
	use pretty_assertions::assert_eq;
	use std::{
		fs::{self, File},
		io::Read,
		path::Path,
	};
	use tempfile::TempDir;
	use zip::ZipArchive;

	struct Harness {
		src: TempDir,
		out: TempDir,
		ui: Arc<SilentUi>,
	}

	impl Harness {
		fn with_files(names: &[&str]) -> Self {
			let src = tempfile::tempdir().unwrap();
			for name in names {
				fs::write(src.path().join(name), format!("content of {name}")).unwrap();
			}
			Self {
				src,
				out: tempfile::tempdir().unwrap(),
				ui: SilentUi::new(),
			}
		}

		fn settings(&self, size: usize) -> SplitSettings {
			SplitSettings {
				directory: self.src.path().to_path_buf(),
				extension: "txt".into(),
				batch_size: BatchSize::from(size),
				output_dir: self.out.path().to_path_buf(),
				dry_run: false,
			}
		}

		fn run(&self, settings: SplitSettings) -> Result<RunReport, Error> {
			Engine::new(settings, self.ui.clone()).run()
		}

		fn archives_on_disk(&self) -> Vec<String> {
			let mut names: Vec<String> = fs::read_dir(self.out.path())
				.unwrap()
				.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
				.collect();
			names.sort();
			names
		}
	}

	fn read_archive(path: &Path) -> Vec<(String, String)> {
		let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
		(0..archive.len())
			.map(|i| {
				let mut entry = archive.by_index(i).unwrap();
				let mut content = String::new();
				entry.read_to_string(&mut content).unwrap();
				(entry.name().to_string(), content)
			})
			.collect()
	}

	fn sizes(report: &RunReport) -> Vec<usize> {
		report.archives.iter().map(|a| a.members.len()).collect()
	}

	#[test]
	fn five_files_in_pairs_make_three_archives() {
		let names = ["testfile0.txt", "testfile1.txt", "testfile2.txt", "testfile3.txt", "testfile4.txt"];
		let harness = Harness::with_files(&names);
		let report = harness.run(harness.settings(2)).unwrap();

		assert_eq!(report.selected, 5);
		assert_eq!(sizes(&report), vec![2, 2, 1]);
		assert_eq!(harness.archives_on_disk(), vec!["0.zip", "1.zip", "2.zip"]);

		let mut seen = Vec::new();
		for path in report.paths() {
			for (name, content) in read_archive(&path) {
				assert_eq!(content, format!("content of {name}"));
				seen.push(name);
			}
		}
		assert_eq!(seen, names);
	}

	#[test]
	fn no_matching_files_make_no_archives() {
		let harness = Harness::with_files(&["a.csv", "b.md"]);
		let report = harness.run(harness.settings(2)).unwrap();

		assert_eq!(report.selected, 0);
		assert!(report.archives.is_empty());
		assert!(harness.archives_on_disk().is_empty());
		assert_eq!(harness.ui.messages(), vec!["Total number of txt count: 0"]);
	}

	#[test]
	fn size_equal_to_count_makes_one_archive() {
		let harness = Harness::with_files(&["a.txt", "b.txt", "c.txt"]);
		let report = harness.run(harness.settings(3)).unwrap();
		assert_eq!(sizes(&report), vec![3]);
		assert_eq!(harness.archives_on_disk(), vec!["0.zip"]);
	}

	#[test]
	fn size_larger_than_count_makes_one_archive() {
		let harness = Harness::with_files(&["a.txt", "b.txt"]);
		let report = harness.run(harness.settings(50)).unwrap();
		assert_eq!(sizes(&report), vec![2]);
		assert_eq!(harness.archives_on_disk(), vec!["0.zip"]);
	}

	#[test]
	fn zero_size_makes_one_archive_with_everything() {
		let harness = Harness::with_files(&["a.txt", "b.txt", "c.txt", "d.txt"]);
		let report = harness.run(harness.settings(0)).unwrap();
		assert_eq!(sizes(&report), vec![4]);
	}

	#[test]
	fn missing_directory_aborts_before_any_archive() {
		let harness = Harness::with_files(&[]);
		let mut settings = harness.settings(2);
		settings.directory = harness.src.path().join("missing");

		let err = harness.run(settings).unwrap_err();
		assert!(matches!(err, Error::DirectoryRead { .. }));
		assert!(harness.archives_on_disk().is_empty());
		assert!(harness.ui.messages().is_empty());
	}

	#[test]
	fn dry_run_writes_nothing_but_reports_the_plan() {
		let harness = Harness::with_files(&["a.txt", "b.txt", "c.txt"]);
		let mut settings = harness.settings(2);
		settings.dry_run = true;

		let report = harness.run(settings).unwrap();
		assert_eq!(sizes(&report), vec![2, 1]);
		assert!(report.archives.iter().all(|a| a.bytes == 0));
		assert!(harness.archives_on_disk().is_empty());
	}

	#[test]
	fn reports_lifecycle_messages() {
		let harness = Harness::with_files(&["a.txt"]);
		harness.run(harness.settings(1)).unwrap();

		let messages = harness.ui.messages();
		assert_eq!(messages[0], "Total number of txt count: 1");
		assert_eq!(messages[1], "Creating zip archive: 0.zip");
		assert!(messages[2].starts_with("Zip archive created:"));
	}

	#[test]
	fn archiving_zips_into_their_own_directory_fails_before_writing() {
		let harness = Harness::with_files(&[]);
		for i in 0..2 {
			fs::write(harness.src.path().join(format!("{i}.zip")), format!("precious bytes {i}")).unwrap();
		}
		let mut settings = harness.settings(1);
		settings.extension = "zip".into();
		settings.output_dir = harness.src.path().to_path_buf();

		let err = harness.run(settings).unwrap_err();
		assert!(matches!(err, Error::OutputCollision { .. }));
		for i in 0..2 {
			let content = fs::read_to_string(harness.src.path().join(format!("{i}.zip"))).unwrap();
			assert_eq!(content, format!("precious bytes {i}"));
		}
	}

	#[test]
	fn matching_is_by_configured_extension() {
		let harness = Harness::with_files(&["a.log", "b.txt", "c.log"]);
		let mut settings = harness.settings(0);
		settings.extension = ".log".into();

		let report = harness.run(settings).unwrap();
		assert_eq!(report.archives[0].members, vec!["a.log", "c.log"]);
	}
}
