use leptos::prelude::*;

use crate::app_state::Event;
use crate::dispatch::use_dispatcher;
use crate::graph::{DepthBound, NodeType, RelationKind};

const LEVELS: [u32; 6] = [0, 1, 2, 3, 4, 5];

fn node_checkbox_id(kind: &NodeType) -> Option<&'static str> {
	match kind {
		NodeType::Skill => Some("filterOskus"),
		NodeType::Competency => Some("filterKompetents"),
		NodeType::Indicator => Some("filterTn"),
		NodeType::Knobit => Some("filterKnobit"),
		NodeType::Other => Some("filterMuu"),
		NodeType::Unrecognized(_) | NodeType::Untyped => None,
	}
}

fn edge_checkbox_id(kind: &RelationKind) -> Option<&'static str> {
	match kind {
		RelationKind::Requires => Some("filterEdgeEeldab"),
		RelationKind::ComposedOf => Some("filterEdgeKoosneb"),
		RelationKind::ContainsIndicator => Some("filterEdgeSisaldabTn"),
		RelationKind::ContainsKnobit => Some("filterEdgeSisaldabKnobitit"),
		RelationKind::IndicatorRequires => Some("filterEdgeTnEeldab"),
		RelationKind::Unrecognized(_) | RelationKind::Unlabeled => None,
	}
}

/// Depth select, prerequisite toggle and the category checkboxes.
#[component]
pub fn FilterPanel() -> impl IntoView {
	let dispatcher = use_dispatcher();
	let state = dispatcher.state;

	let level_options = LEVELS
		.into_iter()
		.map(DepthBound::Hops)
		.chain([DepthBound::Unbounded])
		.map(|level| {
			let text = match level {
				DepthBound::Hops(n) => n.to_string(),
				DepthBound::Unbounded => "All".to_string(),
			};
			view! {
				<option
					value=level.select_value()
					prop:selected=move || state.with(|s| s.filters().level == level)
				>
					{text}
				</option>
			}
		})
		.collect_view();

	let node_boxes = NodeType::FILTERABLE
		.into_iter()
		.filter_map(|kind| node_checkbox_id(&kind).map(|dom_id| (kind, dom_id)))
		.map(|(kind, dom_id)| {
			let (checked_kind, name) = (kind.clone(), kind.display_name().to_owned());
			view! {
				<label class="filter-option">
					<input
						type="checkbox"
						id=dom_id
						prop:checked=move || state.with(|s| s.filters().node_types.allows(&checked_kind))
						on:change=move |ev| {
							dispatcher.dispatch(Event::NodeTypeToggled(kind.clone(), event_target_checked(&ev)))
						}
					/>
					{name}
				</label>
			}
		})
		.collect_view();

	let edge_boxes = RelationKind::FILTERABLE
		.into_iter()
		.filter_map(|kind| edge_checkbox_id(&kind).map(|dom_id| (kind, dom_id)))
		.map(|(kind, dom_id)| {
			let (checked_kind, name) = (kind.clone(), kind.display_name().to_owned());
			view! {
				<label class="filter-option">
					<input
						type="checkbox"
						id=dom_id
						prop:checked=move || state.with(|s| s.filters().edge_types.allows(&checked_kind))
						on:change=move |ev| {
							dispatcher.dispatch(Event::EdgeTypeToggled(kind.clone(), event_target_checked(&ev)))
						}
					/>
					{name}
				</label>
			}
		})
		.collect_view();

	view! {
		<div class="filter-panel">
			<label for="levelSelect">"Depth "</label>
			<select
				id="levelSelect"
				on:change=move |ev| {
					let level = DepthBound::from_select(&event_target_value(&ev));
					dispatcher.dispatch(Event::LevelChanged(level));
				}
			>
				{level_options}
			</select>

			<label class="filter-option">
				<input
					type="checkbox"
					id="showOnlyPrerequisites"
					prop:checked=move || state.with(|s| s.filters().prerequisites_only)
					on:change=move |ev| {
						dispatcher.dispatch(Event::PrerequisitesToggled(event_target_checked(&ev)))
					}
				/>
				"Prerequisites only"
			</label>

			<fieldset>
				<legend>"Node types"</legend>
				{node_boxes}
			</fieldset>
			<fieldset>
				<legend>"Relations"</legend>
				{edge_boxes}
			</fieldset>
		</div>
	}
}
