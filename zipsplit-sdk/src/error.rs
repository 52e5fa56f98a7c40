use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// The primary error type for every stage of a split run.
#[derive(Error, Debug)]
pub enum Error {
	#[error("Could not read directory {path:?}")]
	DirectoryRead {
		#[source]
		source: std::io::Error,
		path: PathBuf,
	},

	#[error("Invalid batch size `{0}`: expected a non-negative integer")]
	InvalidBatchSize(String),

	#[error("Could not create archive {path:?}")]
	ArchiveCreate {
		#[source]
		source: std::io::Error,
		path: PathBuf,
	},

	#[error("Could not open source file {path:?}")]
	SourceOpen {
		#[source]
		source: std::io::Error,
		path: PathBuf,
	},

	#[error("Could not add member `{member}` to archive {archive:?}")]
	MemberCreate {
		#[source]
		source: ZipError,
		archive: PathBuf,
		member: String,
	},

	#[error("Could not copy {path:?} into archive {archive:?}")]
	Copy {
		#[source]
		source: std::io::Error,
		path: PathBuf,
		archive: PathBuf,
	},

	#[error("Archive {archive:?} would overwrite the selected file {file:?}; choose another output directory")]
	OutputCollision { archive: PathBuf, file: PathBuf },

	#[error("Could not finalize archive {path:?}")]
	ArchiveFinish {
		#[source]
		source: ZipError,
		path: PathBuf,
	},

	#[error("Error in configuration: {0}")]
	Config(String),

	#[error("Error in prompt `{prompt}`")]
	Interaction {
		#[source]
		source: std::io::Error,
		prompt: String,
	},
}
