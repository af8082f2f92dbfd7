//! Browser entry point.

use competency_graph::config::AppConfig;
use competency_graph::{App, init_logging};
use leptos::prelude::*;
use log::warn;

fn main() {
	let loaded = AppConfig::from_document();
	let config = loaded.as_ref().cloned().unwrap_or_default();
	init_logging(config.log_level());
	if let Err(err) = &loaded {
		warn!("using default configuration: {err}");
	}

	leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
