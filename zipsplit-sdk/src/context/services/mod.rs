use std::sync::Arc;

use crate::context::services::reporter::{ui::UserInterface, Reporter};

pub mod reporter;

#[derive(Clone)]
pub struct RunServices {
	pub reporter: Reporter,
}

impl RunServices {
	pub fn new(ui: Arc<dyn UserInterface>) -> Self {
		Self {
			reporter: Reporter::new(ui),
		}
	}
}
