use chrono::Local;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
	filter::LevelFilter,
	fmt::{self},
	layer::SubscriberExt,
	util::SubscriberInitExt,
	Layer,
};

/// Installs the global subscriber.
///
/// Terminal output belongs to the UI, so the stderr layer only exists with
/// `--verbose`. With a log directory every event is also written to a
/// timestamped file there; the returned guard must outlive the run or buffered
/// lines are lost.
pub fn init(verbose: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
	let stderr_layer = verbose.then(|| {
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_target(false)
			.with_filter(LevelFilter::DEBUG)
	});

	let (file_layer, guard) = match log_dir {
		Some(dir) => {
			let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S%.3f");
			let file_appender = tracing_appender::rolling::never(dir, format!("{timestamp}.log"));
			let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
			let layer = fmt::layer()
				.with_writer(non_blocking_writer)
				.with_ansi(false)
				.pretty()
				.with_filter(LevelFilter::TRACE);
			(Some(layer), Some(guard))
		}
		None => (None, None),
	};

	tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();

	if let Some(dir) = log_dir {
		tracing::debug!("Logging initialized. Log file in: {}", dir.display());
	}

	guard
}
