use std::path::PathBuf;

use clap::{Parser, ValueHint};

use crate::cmd::run::Run;

mod logs;
mod run;

#[derive(Parser, Debug)]
#[command(name = "zipsplit", about, author, version)]
pub struct App {
	#[command(flatten)]
	command: Run,
	/// Print debug logs to stderr.
	#[arg(long, short = 'v')]
	verbose: bool,
	/// Also write a full trace of the run to a timestamped file in this directory.
	#[arg(long, value_hint = ValueHint::DirPath)]
	log_dir: Option<PathBuf>,
}

pub trait Cmd {
	fn run(self) -> anyhow::Result<()>;
}

impl Cmd for App {
	fn run(self) -> anyhow::Result<()> {
		let _guard = logs::init(self.verbose, self.log_dir.as_deref());
		self.command.run()
	}
}
