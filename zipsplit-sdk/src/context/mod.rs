pub mod services;
pub mod settings;

use crate::context::{services::RunServices, settings::SplitSettings};

/// Everything a stage needs while a split run is in progress.
#[derive(Clone, Copy)]
pub struct ExecutionContext<'a> {
	pub services: &'a RunServices,
	pub settings: &'a SplitSettings,
}

impl<'a> ExecutionContext<'a> {
	pub fn new(services: &'a RunServices, settings: &'a SplitSettings) -> Self {
		Self { services, settings }
	}
}
