//! Application state and the event dispatch that drives it.
//!
//! Every user or network event goes through [`AppState::dispatch`], which
//! mutates the state synchronously and returns the side effects the caller
//! has to run. Nothing in here touches the DOM.

mod jobs;
mod panel;
mod settings;

use log::{debug, error, info};

pub use jobs::JobSkills;
pub use panel::{DetailRow, Link, NO_DESCRIPTION, NodeDetails, PanelState};
pub use settings::FilterSettings;

use crate::config::AppConfig;
use crate::error::GraphError;
use crate::graph::filter::{
	apply_depth_filter, apply_edge_type_filter, apply_node_type_filter, apply_prerequisite_filter,
};
use crate::graph::search::first_match;
use crate::graph::{
	DepthBound, GraphPayload, GraphStore, NodeId, NodeStyle, NodeType, RelationKind,
};

/// Message shown when a search finds no node.
pub const NOT_FOUND: &str = "Not found";

/// Monotonic id attached to every graph fetch.
pub type RequestId = u64;

/// Everything that can happen to the app.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
	/// Fetch the graph for a skill term; empty means the whole graph.
	LoadRequested(String),
	/// A fetch answered with a graph.
	Loaded {
		/// Id from the matching [`Command::Fetch`].
		request: RequestId,
		/// Decoded body.
		payload: GraphPayload,
	},
	/// A fetch failed.
	LoadFailed {
		/// Id from the matching [`Command::Fetch`].
		request: RequestId,
		/// What went wrong.
		error: GraphError,
	},
	/// Click on a node.
	NodeClicked(NodeId),
	/// Click on empty canvas.
	CanvasClicked,
	/// Pointer entered a node.
	NodeHovered(NodeId),
	/// Pointer left the hovered node.
	NodeBlurred,
	/// Depth select changed.
	LevelChanged(DepthBound),
	/// "Prerequisites only" checkbox changed.
	PrerequisitesToggled(bool),
	/// A node category checkbox changed.
	NodeTypeToggled(NodeType, bool),
	/// A relation checkbox changed.
	EdgeTypeToggled(RelationKind, bool),
	/// Search form submitted with this text.
	SearchSubmitted(String),
	/// Dropdown entry chosen.
	SuggestionPicked(NodeId),
	/// Job-creation mode switched on or off.
	JobModeChanged(bool),
	/// Badge for this skill clicked.
	JobSkillRemoved(String),
}

/// Side effects requested by a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
	/// Request the graph for `skill`; answer with `Loaded` or `LoadFailed`.
	Fetch {
		/// Search term, possibly empty.
		skill: String,
		/// Echoed back in the answering event.
		request: RequestId,
	},
	/// Animate the view onto a node.
	Focus(NodeId),
	/// Blocking user-facing message.
	Alert(String),
}

/// The whole client state.
#[derive(Clone, Debug, Default)]
pub struct AppState {
	store: GraphStore,
	focal: Option<NodeId>,
	panel: PanelState,
	filters: FilterSettings,
	job_mode: bool,
	job_skills: JobSkills,
	last_request: RequestId,
	in_flight: Option<RequestId>,
	pending_search: Option<String>,
	loaded: bool,
}

impl AppState {
	/// Empty state with the configured default depth.
	pub fn new(config: &AppConfig) -> Self {
		Self {
			filters: FilterSettings::with_level(config.default_level),
			..Self::default()
		}
	}

	/// Current graph.
	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	/// Selected node, if any.
	pub fn focal(&self) -> Option<&NodeId> {
		self.focal.as_ref()
	}

	/// What the info panel shows.
	pub fn panel(&self) -> &PanelState {
		&self.panel
	}

	/// Content for the info panel, if it is showing a known node.
	pub fn panel_details(&self) -> Option<NodeDetails> {
		self.panel
			.node()
			.and_then(|id| self.store.node(id))
			.map(NodeDetails::from_node)
	}

	/// Filter panel settings.
	pub fn filters(&self) -> &FilterSettings {
		&self.filters
	}

	/// Whether clicks collect job skills instead of selecting.
	pub fn job_mode(&self) -> bool {
		self.job_mode
	}

	/// Skills collected in job mode.
	pub fn job_skills(&self) -> &JobSkills {
		&self.job_skills
	}

	/// A fetch is outstanding.
	pub fn is_loading(&self) -> bool {
		self.in_flight.is_some()
	}

	/// Apply `event` and return the side effects to run.
	pub fn dispatch(&mut self, event: Event) -> Vec<Command> {
		match event {
			Event::LoadRequested(skill) => self.request_load(skill),
			Event::Loaded { request, payload } => self.on_loaded(request, payload),
			Event::LoadFailed { request, error } => self.on_load_failed(request, error),
			Event::NodeClicked(id) => self.on_node_clicked(id),
			Event::CanvasClicked => self.on_canvas_clicked(),
			Event::NodeHovered(id) => {
				if self.store.contains(&id) {
					self.panel.hover(id);
				}
				Vec::new()
			}
			Event::NodeBlurred => {
				self.panel.blur();
				Vec::new()
			}
			Event::LevelChanged(level) => {
				self.filters.level = level;
				self.refresh_visibility();
				Vec::new()
			}
			Event::PrerequisitesToggled(enabled) => {
				self.filters.prerequisites_only = enabled;
				apply_prerequisite_filter(&mut self.store, enabled, self.focal.as_ref());
				if !enabled {
					self.refresh_visibility();
				}
				Vec::new()
			}
			Event::NodeTypeToggled(kind, shown) => {
				self.filters.node_types.set(&kind, shown);
				apply_node_type_filter(
					&mut self.store,
					&self.filters.node_types,
					&self.filters.edge_types,
				);
				Vec::new()
			}
			Event::EdgeTypeToggled(kind, shown) => {
				self.filters.edge_types.set(&kind, shown);
				apply_edge_type_filter(&mut self.store, &self.filters.edge_types);
				Vec::new()
			}
			Event::SearchSubmitted(term) => self.on_search(term),
			Event::SuggestionPicked(id) => {
				if self.store.contains(&id) {
					self.focus_node(id)
				} else {
					Vec::new()
				}
			}
			Event::JobModeChanged(enabled) => {
				self.job_mode = enabled;
				Vec::new()
			}
			Event::JobSkillRemoved(skill) => {
				self.job_skills.remove(&skill);
				Vec::new()
			}
		}
	}

	fn request_load(&mut self, skill: String) -> Vec<Command> {
		self.last_request += 1;
		self.in_flight = Some(self.last_request);
		vec![Command::Fetch {
			skill,
			request: self.last_request,
		}]
	}

	fn on_loaded(&mut self, request: RequestId, payload: GraphPayload) -> Vec<Command> {
		if request != self.last_request {
			debug!("dropping stale graph response {request}");
			return Vec::new();
		}
		self.in_flight = None;
		self.store = GraphStore::from_payload(payload, request);
		self.loaded = true;
		self.focal = None;
		self.panel = PanelState::Hidden;
		info!(
			"graph loaded: {} nodes, {} edges",
			self.store.nodes().len(),
			self.store.edges().len()
		);
		apply_node_type_filter(
			&mut self.store,
			&self.filters.node_types,
			&self.filters.edge_types,
		);

		match self.pending_search.take() {
			Some(term) => self.search(&term),
			None => Vec::new(),
		}
	}

	fn on_load_failed(&mut self, request: RequestId, err: GraphError) -> Vec<Command> {
		if request != self.last_request {
			debug!("dropping stale graph failure {request}: {err}");
			return Vec::new();
		}
		error!("graph load failed: {err}");
		self.in_flight = None;
		self.store = GraphStore::default();
		self.loaded = false;
		self.focal = None;
		self.panel = PanelState::Hidden;
		self.pending_search = None;
		vec![Command::Alert(err.user_message().to_owned())]
	}

	fn on_node_clicked(&mut self, id: NodeId) -> Vec<Command> {
		let Some(node) = self.store.node(&id) else {
			return Vec::new();
		};
		if self.job_mode {
			let label = node.label.clone();
			if self.job_skills.insert(&label) {
				debug!("job skill added: {label}");
			}
			return Vec::new();
		}
		self.select(id.clone());
		self.panel = PanelState::Pinned(id);
		self.refresh_visibility();
		Vec::new()
	}

	fn on_canvas_clicked(&mut self) -> Vec<Command> {
		if self.job_mode {
			return Vec::new();
		}
		self.panel = PanelState::Hidden;
		if self.clear_focal() {
			self.refresh_visibility();
		}
		Vec::new()
	}

	fn on_search(&mut self, term: String) -> Vec<Command> {
		let term = term.trim();
		if term.is_empty() {
			self.store.show_all();
			self.clear_focal();
			return Vec::new();
		}
		if !self.loaded {
			self.pending_search = Some(term.to_owned());
			return self.request_load(String::new());
		}
		self.search(term)
	}

	fn search(&mut self, term: &str) -> Vec<Command> {
		match first_match(&self.store, term) {
			Some(node) => {
				let id = node.id.clone();
				self.focus_node(id)
			}
			None => vec![Command::Alert(NOT_FOUND.to_owned())],
		}
	}

	fn focus_node(&mut self, id: NodeId) -> Vec<Command> {
		self.select(id.clone());
		self.panel.show(id.clone());
		self.refresh_visibility();
		vec![Command::Focus(id)]
	}

	fn select(&mut self, id: NodeId) {
		self.clear_focal();
		self.store.set_style(&id, NodeStyle::selected());
		self.focal = Some(id);
	}

	/// Returns whether there was a focal node to clear.
	fn clear_focal(&mut self) -> bool {
		match self.focal.take() {
			Some(prev) => {
				self.store.set_style(&prev, NodeStyle::default_node());
				true
			}
			None => false,
		}
	}

	/// Re-run the focal-centred filter: the prerequisite one while its
	/// checkbox is on and a node is selected, the depth one otherwise.
	fn refresh_visibility(&mut self) {
		match (self.filters.prerequisites_only, self.focal.as_ref()) {
			(true, Some(focal)) => apply_prerequisite_filter(&mut self.store, true, Some(focal)),
			(_, focal) => {
				apply_depth_filter(&mut self.store, focal, self.filters.level);
				apply_edge_type_filter(&mut self.store, &self.filters.edge_types);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::NodeColor;
	use crate::graph::{Edge, Node};

	fn java_payload() -> GraphPayload {
		GraphPayload {
			nodes: vec![
				Node::new(1, "Java", NodeType::Skill),
				Node::new(2, "OOP", NodeType::Competency),
				Node::new(3, "Python", NodeType::Skill),
			],
			edges: vec![
				Edge::new("e1", 1, 2, RelationKind::Requires),
				Edge::new("e2", 2, 3, RelationKind::ComposedOf),
			],
		}
	}

	fn loaded() -> AppState {
		let mut state = AppState::default();
		let commands = state.dispatch(Event::LoadRequested(String::new()));
		let Some(Command::Fetch { request, .. }) = commands.first().cloned() else {
			panic!("expected a fetch, got {commands:?}");
		};
		assert!(state.is_loading());
		state.dispatch(Event::Loaded {
			request,
			payload: java_payload(),
		});
		assert!(!state.is_loading());
		state
	}

	fn visible(state: &AppState) -> Vec<String> {
		let mut ids: Vec<_> = state
			.store()
			.visible_node_ids()
			.into_iter()
			.map(|i| i.to_string())
			.collect();
		ids.sort();
		ids
	}

	#[test]
	fn click_selects_pins_and_filters() {
		let mut state = loaded();
		state.dispatch(Event::LevelChanged(DepthBound::Hops(1)));
		state.dispatch(Event::NodeClicked(1.into()));
		assert_eq!(state.focal(), Some(&NodeId::from(1)));
		assert!(state.panel().is_pinned());
		assert_eq!(visible(&state), ["1", "2"]);
		assert_eq!(state.store().node(&1.into()).unwrap().style, NodeStyle::selected());

		state.dispatch(Event::NodeClicked(3.into()));
		assert_eq!(state.store().node(&1.into()).unwrap().style, NodeStyle::default_node());
		assert_eq!(state.store().node(&3.into()).unwrap().style, NodeStyle::selected());
		assert_eq!(visible(&state), ["2", "3"]);

		state.dispatch(Event::CanvasClicked);
		assert_eq!(state.focal(), None);
		assert_eq!(state.panel(), &PanelState::Hidden);
		assert_eq!(visible(&state), ["1", "2", "3"]);
	}

	#[test]
	fn level_zero_hides_edges_to_hidden_nodes() {
		let mut state = loaded();
		state.dispatch(Event::NodeClicked(1.into()));
		state.dispatch(Event::LevelChanged(DepthBound::Hops(0)));
		assert_eq!(visible(&state), ["1"]);
		assert!(state.store().edge(&"e1".into()).unwrap().hidden);
	}

	#[test]
	fn hover_respects_pin() {
		let mut state = loaded();
		state.dispatch(Event::NodeHovered(2.into()));
		assert_eq!(state.panel_details().unwrap().title, "OOP");
		state.dispatch(Event::NodeBlurred);
		assert!(state.panel_details().is_none());

		state.dispatch(Event::NodeClicked(1.into()));
		state.dispatch(Event::NodeHovered(2.into()));
		state.dispatch(Event::NodeBlurred);
		assert_eq!(state.panel_details().unwrap().title, "Java");
	}

	#[test]
	fn job_mode_collects_labels_once() {
		let mut state = loaded();
		state.dispatch(Event::JobModeChanged(true));
		state.dispatch(Event::NodeClicked(3.into()));
		state.dispatch(Event::NodeClicked(3.into()));
		state.dispatch(Event::NodeClicked(1.into()));
		assert_eq!(state.job_skills().joined(), "Python,Java");
		assert_eq!(state.focal(), None);
		assert!(!state.panel().is_pinned());

		state.dispatch(Event::JobSkillRemoved("Python".into()));
		assert_eq!(state.job_skills().joined(), "Java");
	}

	#[test]
	fn search_focuses_first_match() {
		let mut state = loaded();
		let commands = state.dispatch(Event::SearchSubmitted("  oop ".into()));
		assert_eq!(commands, vec![Command::Focus(2.into())]);
		assert_eq!(state.focal(), Some(&NodeId::from(2)));
		assert_eq!(state.panel(), &PanelState::Preview(2.into()));

		let commands = state.dispatch(Event::SearchSubmitted("rust".into()));
		assert_eq!(commands, vec![Command::Alert(NOT_FOUND.into())]);
		assert_eq!(state.focal(), Some(&NodeId::from(2)));
	}

	#[test]
	fn empty_search_shows_everything() {
		let mut state = loaded();
		state.dispatch(Event::LevelChanged(DepthBound::Hops(0)));
		state.dispatch(Event::NodeClicked(1.into()));
		state.dispatch(Event::SearchSubmitted(" ".into()));
		assert_eq!(state.focal(), None);
		assert_eq!(visible(&state).len(), 3);
		assert_eq!(state.store().visible_edge_ids().len(), 2);
	}

	#[test]
	fn search_before_load_fetches_then_searches() {
		let mut state = AppState::default();
		let commands = state.dispatch(Event::SearchSubmitted("python".into()));
		assert_eq!(
			commands,
			vec![Command::Fetch {
				skill: String::new(),
				request: 1
			}]
		);
		let commands = state.dispatch(Event::Loaded {
			request: 1,
			payload: java_payload(),
		});
		assert_eq!(commands, vec![Command::Focus(3.into())]);
	}

	#[test]
	fn stale_responses_are_ignored() {
		let mut state = AppState::default();
		state.dispatch(Event::LoadRequested("Java".into()));
		state.dispatch(Event::LoadRequested("Python".into()));
		let commands = state.dispatch(Event::LoadFailed {
			request: 1,
			error: GraphError::Status(404),
		});
		assert!(commands.is_empty());
		assert!(state.is_loading());

		state.dispatch(Event::Loaded {
			request: 2,
			payload: java_payload(),
		});
		assert!(!state.store().is_empty());
		assert!(!state.is_loading());
	}

	#[test]
	fn failed_load_clears_graph_and_alerts() {
		let mut state = loaded();
		let commands = state.dispatch(Event::LoadRequested("nope".into()));
		let Some(Command::Fetch { request, .. }) = commands.first().cloned() else {
			panic!("expected a fetch");
		};
		let commands = state.dispatch(Event::LoadFailed {
			request,
			error: GraphError::Network("offline".into()),
		});
		assert_eq!(commands, vec![Command::Alert("Skill not found".into())]);
		assert!(state.store().is_empty());
		assert!(!state.is_loading());
	}

	#[test]
	fn prerequisite_toggle_off_reapplies_depth() {
		let mut state = loaded();
		state.dispatch(Event::NodeClicked(1.into()));
		state.dispatch(Event::PrerequisitesToggled(true));
		assert_eq!(visible(&state), ["1", "2"]);
		assert!(state.store().edge(&"e2".into()).unwrap().hidden);

		state.dispatch(Event::LevelChanged(DepthBound::Hops(0)));
		state.dispatch(Event::PrerequisitesToggled(false));
		assert_eq!(visible(&state), ["1"]);
	}

	#[test]
	fn prerequisite_toggle_applies_on_next_selection() {
		let mut state = loaded();
		state.dispatch(Event::PrerequisitesToggled(true));
		assert_eq!(visible(&state), ["1", "2", "3"]);

		state.dispatch(Event::NodeClicked(1.into()));
		assert_eq!(visible(&state), ["1", "2"]);
		assert!(!state.store().edge(&"e1".into()).unwrap().hidden);
		assert!(state.store().edge(&"e2".into()).unwrap().hidden);

		state.dispatch(Event::LevelChanged(DepthBound::Hops(0)));
		assert_eq!(visible(&state), ["1", "2"]);

		state.dispatch(Event::CanvasClicked);
		assert_eq!(visible(&state), ["1", "2", "3"]);
	}

	#[test]
	fn deselected_node_gets_default_style() {
		let mut colored = Node::new(1, "Java", NodeType::Skill);
		colored.color = Some(NodeColor::Plain("#FFA500".into()));
		let mut state = AppState::default();
		state.dispatch(Event::LoadRequested(String::new()));
		state.dispatch(Event::Loaded {
			request: 1,
			payload: GraphPayload {
				nodes: vec![colored, Node::new(2, "OOP", NodeType::Competency)],
				edges: Vec::new(),
			},
		});
		assert_eq!(state.store().node(&1.into()).unwrap().style.background, "#FFA500");

		state.dispatch(Event::NodeClicked(1.into()));
		state.dispatch(Event::NodeClicked(2.into()));
		assert_eq!(state.store().node(&1.into()).unwrap().style, NodeStyle::default_node());
	}

	#[test]
	fn type_toggles_apply_to_fresh_graphs() {
		let mut state = AppState::default();
		state.dispatch(Event::NodeTypeToggled(NodeType::Competency, false));
		state.dispatch(Event::LoadRequested(String::new()));
		state.dispatch(Event::Loaded {
			request: 1,
			payload: java_payload(),
		});
		assert_eq!(visible(&state), ["1", "3"]);
		assert!(state.store().visible_edge_ids().is_empty());

		state.dispatch(Event::EdgeTypeToggled(RelationKind::Requires, false));
		state.dispatch(Event::NodeTypeToggled(NodeType::Competency, true));
		let edges: Vec<_> = state
			.store()
			.visible_edge_ids()
			.into_iter()
			.map(|e| e.to_string())
			.collect();
		assert_eq!(edges, ["e2"]);
	}
}
