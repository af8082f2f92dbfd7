use leptos::prelude::*;

use crate::app_state::Event;
use crate::dispatch::use_dispatcher;
use crate::graph::{NodeId, search};

/// Search form with a live suggestion dropdown.
///
/// An empty input lists the first nodes of the graph; typing narrows the
/// list to label matches.
#[component]
pub fn SearchBar() -> impl IntoView {
	let dispatcher = use_dispatcher();
	let state = dispatcher.state;
	let config = dispatcher.config();
	let (suggestion_limit, dropdown_limit) = (config.suggestion_limit, config.dropdown_limit);

	let query = RwSignal::new(String::new());
	let open = RwSignal::new(false);

	let suggestions = Memo::new(move |_| {
		let q = query.get();
		state.with(|s| {
			let nodes = if q.trim().is_empty() {
				search::initial_suggestions(s.store(), dropdown_limit)
			} else {
				search::suggestions(s.store(), &q, suggestion_limit)
			};
			nodes
				.into_iter()
				.map(|n| (n.id.clone(), n.label.clone()))
				.collect::<Vec<_>>()
		})
	});
	let show_dropdown = move || open.get() && suggestions.with(|s| !s.is_empty());

	let on_input = move |ev: leptos::ev::Event| {
		let value = event_target_value(&ev);
		open.set(!value.trim().is_empty());
		query.set(value);
	};

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		open.set(false);
		dispatcher.dispatch(Event::SearchSubmitted(query.get_untracked()));
	};

	let pick = move |id: NodeId, label: String| {
		query.set(label);
		open.set(false);
		dispatcher.dispatch(Event::SuggestionPicked(id));
	};

	view! {
		<form id="searchForm" class="search-form" on:submit=on_submit>
			<input
				id="skillInput"
				type="text"
				placeholder="Search for a skill"
				autocomplete="off"
				prop:value=move || query.get()
				on:input=on_input
				on:focus=move |_| open.set(true)
			/>
			<button type="submit">"Search"</button>
			<ul id="searchDropdown" class="dropdown-menu" class:show=show_dropdown>
				<For
					each=move || suggestions.get()
					key=|item| item.0.clone()
					children=move |(id, label)| {
						let data_id = id.to_string();
						let text = label.clone();
						view! {
							<li>
								<a
									class="dropdown-item"
									href="#"
									data-id=data_id
									on:click=move |ev| {
										ev.prevent_default();
										pick(id.clone(), label.clone());
									}
								>
									{text}
								</a>
							</li>
						}
					}
				/>
			</ul>
		</form>
	}
}
