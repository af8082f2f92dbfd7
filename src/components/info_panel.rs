use leptos::prelude::*;

use crate::app_state::{DetailRow, NodeDetails};
use crate::dispatch::use_dispatcher;

fn detail_row(row: &DetailRow) -> impl IntoView + use<> {
	let links = row
		.links
		.iter()
		.enumerate()
		.map(|(i, link)| {
			view! {
				{(i > 0).then_some(", ")}
				<a href=link.href.clone() target="_blank" rel="noopener">
					{link.text.clone()}
				</a>
			}
		})
		.collect_view();
	view! {
		<p>
			<strong>{row.title}": "</strong>
			{links}
		</p>
	}
}

fn details_view(details: NodeDetails) -> impl IntoView {
	let extra = details.extra.iter().map(detail_row).collect_view();
	view! {
		<h5 id="infoTitle">{details.title}</h5>
		<p id="infoDescription">{details.description}</p>
		{details
			.link
			.map(|href| {
				view! {
					<a id="infoLink" class="btn" href=href target="_blank" rel="noopener">
						"Open source page"
					</a>
				}
			})}
		<div id="infoExtra">{extra}</div>
	}
}

/// Side panel describing the hovered or pinned node.
#[component]
pub fn InfoPanel() -> impl IntoView {
	let state = use_dispatcher().state;
	let details = Memo::new(move |_| state.with(|s| s.panel_details()));
	let pinned = move || state.with(|s| s.panel().is_pinned());

	view! {
		<div
			id="skillInfo"
			class="skill-info"
			class:show=move || details.with(Option::is_some)
			class:pinned=pinned
		>
			{move || details.get().map(details_view)}
		</div>
	}
}
