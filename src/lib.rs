//! Competency graph explorer: Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod graph;

mod components;
mod dispatch;
mod pages;

// Top-Level pages
use crate::app_state::Event;
use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("Logging initialized at {level}");
}

/// An app router which renders the graph page and handles 404's.
///
/// Owns the application state; the whole graph is requested on start.
#[component]
pub fn App(
	/// Runtime settings; defaults when omitted.
	#[prop(optional)]
	config: AppConfig,
) -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let dispatcher = Dispatcher::new(config);
	provide_context(dispatcher);
	dispatcher.dispatch(Event::LoadRequested(String::new()));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Competency Graph" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
