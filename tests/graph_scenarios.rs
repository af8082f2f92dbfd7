//! End-to-end scenarios driven through `AppState::dispatch`.

use competency_graph::app_state::{AppState, Command, Event, PanelState};
use competency_graph::config::AppConfig;
use competency_graph::graph::filter::reachable_within;
use competency_graph::graph::{DepthBound, GraphPayload, GraphStore, NodeId, RelationKind};

const JAVA_GRAPH: &str = r#"{
	"nodes": [
		{"id": 1, "label": "Java", "type": "oskus"},
		{"id": 2, "label": "OOP", "type": "kompetents"}
	],
	"edges": [
		{"id": "e1", "from": 1, "to": 2, "label": "eeldab"}
	]
}"#;

fn load(state: &mut AppState, skill: &str, json: &str) {
	let commands = state.dispatch(Event::LoadRequested(skill.into()));
	let [Command::Fetch { request, .. }] = commands.as_slice() else {
		panic!("expected a single fetch, got {commands:?}");
	};
	let payload: GraphPayload = serde_json::from_str(json).unwrap();
	state.dispatch(Event::Loaded {
		request: *request,
		payload,
	});
}

fn visible_nodes(state: &AppState) -> Vec<String> {
	let mut ids: Vec<_> = state
		.store()
		.nodes()
		.iter()
		.filter(|n| !n.hidden)
		.map(|n| n.id.to_string())
		.collect();
	ids.sort();
	ids
}

#[test]
fn java_scenario() {
	let mut state = AppState::new(&AppConfig::default());
	load(&mut state, "Java", JAVA_GRAPH);

	state.dispatch(Event::LevelChanged(DepthBound::Hops(1)));
	state.dispatch(Event::NodeClicked(1.into()));
	assert_eq!(visible_nodes(&state), ["1", "2"]);
	assert!(!state.store().edge(&"e1".into()).unwrap().hidden);

	state.dispatch(Event::LevelChanged(DepthBound::Hops(0)));
	assert_eq!(visible_nodes(&state), ["1"]);
	assert!(state.store().edge(&"e1".into()).unwrap().hidden);
}

#[test]
fn server_shaped_payload_without_edge_ids() {
	let json = r##"{
		"nodes": [
			{"id": "Programmeerimine", "label": "Oskus: Programmeerimine", "type": "oskus",
			 "description": "", "link": "https://oppekava.edu.ee/a/Programmeerimine",
			 "esco_link": "", "osk_reg_kood": "42", "color": "#a1c9f1", "size": 13.0,
			 "relevant_occupations": [{"uri": "http://data.europa.eu/esco/occupation/1", "label": "Developer"}]},
			{"id": "Algoritmid", "label": "Oskus: Algoritmid", "type": "oskus"},
			{"id": "Tn1", "label": "Tegevusnäitaja: Tn1", "type": "tegevusnaitaja"}
		],
		"edges": [
			{"from": "Algoritmid", "to": "Programmeerimine", "color": "#2980b9", "label": "eeldab"},
			{"from": "Tn1", "to": "Programmeerimine", "color": "#27ae60", "label": "sisaldab Tn"},
			{"from": "Puudub", "to": "Programmeerimine", "label": "eeldab"}
		]
	}"##;
	let mut state = AppState::default();
	load(&mut state, "", json);
	assert_eq!(state.store().edges().len(), 2);

	state.dispatch(Event::NodeClicked("Programmeerimine".into()));
	let details = state.panel_details().unwrap();
	assert_eq!(details.title, "Oskus: Programmeerimine");
	assert_eq!(details.link.as_deref(), Some("https://oppekava.edu.ee/a/Programmeerimine"));
	assert_eq!(details.extra.len(), 2);

	state.dispatch(Event::PrerequisitesToggled(true));
	assert_eq!(visible_nodes(&state), ["Algoritmid", "Programmeerimine"]);

	state.dispatch(Event::PrerequisitesToggled(false));
	assert_eq!(visible_nodes(&state).len(), 3);
	assert!(state.store().edges().iter().all(|e| !e.hidden));
}

#[test]
fn hidden_edge_types_stay_hidden_through_depth_changes() {
	let mut state = AppState::default();
	load(&mut state, "Java", JAVA_GRAPH);
	state.dispatch(Event::EdgeTypeToggled(RelationKind::Requires, false));
	state.dispatch(Event::NodeClicked(2.into()));
	state.dispatch(Event::LevelChanged(DepthBound::Hops(3)));
	assert_eq!(visible_nodes(&state), ["1", "2"]);
	assert!(state.store().edge(&"e1".into()).unwrap().hidden);
}

#[test]
fn search_then_hover_then_blur() {
	let mut state = AppState::default();
	load(&mut state, "", JAVA_GRAPH);
	let commands = state.dispatch(Event::SearchSubmitted("java".into()));
	assert_eq!(commands, vec![Command::Focus(1.into())]);
	assert_eq!(state.panel(), &PanelState::Preview(1.into()));

	state.dispatch(Event::NodeHovered(2.into()));
	state.dispatch(Event::NodeBlurred);
	assert_eq!(state.panel(), &PanelState::Hidden);
	assert_eq!(state.focal(), Some(&NodeId::from(1)));
}

#[test]
fn depth_matches_shortest_path_on_a_ring() {
	// 0-1-2-3-4-5-0
	let nodes: Vec<String> = (0..6)
		.map(|i| format!(r#"{{"id":{i},"label":"n{i}"}}"#))
		.collect();
	let edges: Vec<String> = (0..6)
		.map(|i| format!(r#"{{"from":{i},"to":{},"label":"koosneb"}}"#, (i + 1) % 6))
		.collect();
	let json = format!(r#"{{"nodes":[{}],"edges":[{}]}}"#, nodes.join(","), edges.join(","));
	let store = GraphStore::from_payload(serde_json::from_str(&json).unwrap(), 1);

	let distance = |n: u32| n.min(6 - n);
	for bound in 0..4 {
		let reached = reachable_within(&store, &0.into(), bound);
		for n in 0..6u32 {
			assert_eq!(
				reached.contains(&NodeId::from(i64::from(n))),
				distance(n) <= bound,
				"node {n} at bound {bound}"
			);
		}
	}
}
