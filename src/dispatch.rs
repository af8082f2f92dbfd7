//! Runs the commands [`AppState::dispatch`] asks for.

use leptos::prelude::*;
use log::warn;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::app_state::{AppState, Command, Event};
use crate::components::force_graph::FocusRequest;
use crate::config::AppConfig;

/// Copyable handle shared through context by every component that emits events.
#[derive(Clone, Copy)]
pub struct Dispatcher {
	pub state: RwSignal<AppState>,
	pub focus: RwSignal<Option<FocusRequest>>,
	config: StoredValue<AppConfig>,
}

impl Dispatcher {
	pub fn new(config: AppConfig) -> Self {
		Self {
			state: RwSignal::new(AppState::new(&config)),
			focus: RwSignal::new(None),
			config: StoredValue::new(config),
		}
	}

	pub fn config(&self) -> AppConfig {
		self.config.get_value()
	}

	pub fn dispatch(self, event: Event) {
		let commands = self
			.state
			.try_update(|s| s.dispatch(event))
			.unwrap_or_default();
		for command in commands {
			self.execute(command);
		}
	}

	fn execute(self, command: Command) {
		match command {
			Command::Fetch { skill, request } => {
				let config = self.config();
				spawn_local(async move {
					let event = match api::fetch_graph(&config, &skill).await {
						Ok(payload) => Event::Loaded { request, payload },
						Err(error) => Event::LoadFailed { request, error },
					};
					self.dispatch(event);
				});
			}
			Command::Focus(node) => {
				let (scale, duration_ms) = self
					.config
					.with_value(|c| (c.focus_scale, c.focus_duration_ms));
				self.focus.update(|f| {
					let serial = f.as_ref().map_or(0, |r| r.serial + 1);
					*f = Some(FocusRequest {
						node,
						serial,
						scale,
						duration_ms,
					});
				});
			}
			Command::Alert(message) => match web_sys::window() {
				Some(window) => {
					if window.alert_with_message(&message).is_err() {
						warn!("alert failed: {message}");
					}
				}
				None => warn!("no window for alert: {message}"),
			},
		}
	}
}

pub fn use_dispatcher() -> Dispatcher {
	expect_context::<Dispatcher>()
}
