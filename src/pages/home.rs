use leptos::prelude::*;

use crate::app_state::Event;
use crate::components::filter_panel::FilterPanel;
use crate::components::force_graph::{ForceGraphCanvas, PointerEvent};
use crate::components::info_panel::InfoPanel;
use crate::components::job_skills::JobSkillPicker;
use crate::components::search_bar::SearchBar;
use crate::dispatch::use_dispatcher;

fn pointer_event(event: PointerEvent) -> Event {
	match event {
		PointerEvent::Click(Some(id)) => Event::NodeClicked(id),
		PointerEvent::Click(None) => Event::CanvasClicked,
		PointerEvent::Hover(id) => Event::NodeHovered(id),
		PointerEvent::Blur => Event::NodeBlurred,
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let dispatcher = use_dispatcher();
	let state = dispatcher.state;
	let physics = dispatcher.config().physics;

	let store = Signal::derive(move || state.with(|s| s.store().clone()));
	let on_pointer = Callback::new(move |event: PointerEvent| {
		dispatcher.dispatch(pointer_event(event));
	});
	let loading = move || state.with(|s| s.is_loading());

	view! {
		<div class="fullscreen-graph">
			<div id="network">
				<ForceGraphCanvas
					store=store
					focus=dispatcher.focus
					on_pointer=on_pointer
					physics=physics
					fullscreen=true
				/>
			</div>
			<div class="graph-overlay">
				<h1>"Competency Graph"</h1>
				<p class="subtitle">"Click a node to focus it. Drag to reposition. Scroll to zoom."</p>
				<SearchBar />
				<FilterPanel />
				<JobSkillPicker />
			</div>
			<InfoPanel />
			<div id="loading" class="loading" style:display=move || if loading() { "block" } else { "none" }>
				"Loading…"
			</div>
		</div>
	}
}
