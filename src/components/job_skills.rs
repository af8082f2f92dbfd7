use leptos::prelude::*;

use crate::app_state::Event;
use crate::dispatch::use_dispatcher;

/// Job-creation mode toggle plus the skills collected so far.
///
/// Clicking a badge drops that skill. The hidden `jobSkills` field carries
/// the comma-joined list for the surrounding form.
#[component]
pub fn JobSkillPicker() -> impl IntoView {
	let dispatcher = use_dispatcher();
	let state = dispatcher.state;
	let skills = Memo::new(move |_| {
		state.with(|s| s.job_skills().iter().map(str::to_owned).collect::<Vec<_>>())
	});
	let active = move || state.with(|s| s.job_mode());

	view! {
		<div class="job-skills" class:active=active>
			<button
				type="button"
				class="btn"
				on:click=move |_| {
					let enabled = !state.with_untracked(|s| s.job_mode());
					dispatcher.dispatch(Event::JobModeChanged(enabled));
				}
			>
				{move || if active() { "Done picking skills" } else { "Pick skills for a job" }}
			</button>
			<div id="selectedSkills" class="selected-skills">
				<For
					each=move || skills.get()
					key=|skill| skill.clone()
					children=move |skill| {
						let text = skill.clone();
						view! {
							<span
								class="badge"
								style="cursor: pointer;"
								on:click=move |_| dispatcher.dispatch(Event::JobSkillRemoved(skill.clone()))
							>
								{text}
							</span>
						}
					}
				/>
			</div>
			<input
				type="hidden"
				id="jobSkills"
				name="jobSkills"
				prop:value=move || state.with(|s| s.job_skills().joined())
			/>
		</div>
	}
}
