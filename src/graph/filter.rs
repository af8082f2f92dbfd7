//! Visibility filters over a [`GraphStore`].
//!
//! Each filter rewrites hidden flags from scratch; none of them remembers
//! what another filter did. Combining them is up to the caller.

use std::collections::{HashSet, VecDeque};

use log::debug;
use serde::Deserialize;

use super::model::{EdgeId, NodeId, NodeType, RelationKind};
use super::store::GraphStore;

/// Depth select value meaning "show everything".
pub const UNBOUNDED_LEVEL: u32 = 99;

/// How many hops from the focal node stay visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "u32")]
pub enum DepthBound {
	/// At most this many hops.
	Hops(u32),
	/// No depth limit.
	#[default]
	Unbounded,
}

impl DepthBound {
	/// Parse a level-select value. `99` and anything non-numeric mean unbounded.
	pub fn from_select(value: &str) -> Self {
		value
			.trim()
			.parse::<u32>()
			.map(Self::from)
			.unwrap_or(Self::Unbounded)
	}

	/// Option value for the level select.
	pub fn select_value(self) -> String {
		match self {
			Self::Hops(n) => n.to_string(),
			Self::Unbounded => UNBOUNDED_LEVEL.to_string(),
		}
	}
}

impl From<u32> for DepthBound {
	fn from(n: u32) -> Self {
		if n == UNBOUNDED_LEVEL {
			Self::Unbounded
		} else {
			Self::Hops(n)
		}
	}
}

/// Ids of nodes at most `bound` undirected hops from `focal`, focal included.
pub fn reachable_within(store: &GraphStore, focal: &NodeId, bound: u32) -> HashSet<NodeId> {
	let mut visited = HashSet::new();
	if !store.contains(focal) {
		return visited;
	}
	visited.insert(focal.clone());
	let mut queue = VecDeque::from([(focal.clone(), 0u32)]);

	while let Some((id, depth)) = queue.pop_front() {
		if depth >= bound {
			continue;
		}
		for edge in store.incident_edges(&id) {
			let Some(next) = edge.other_end(&id) else {
				continue;
			};
			if visited.insert(next.clone()) {
				queue.push_back((next.clone(), depth + 1));
			}
		}
	}
	visited
}

/// Hide every node farther than `bound` from `focal`. Edges are left alone.
///
/// Without a focal node, or with an unbounded depth, everything is shown.
pub fn apply_depth_filter(store: &mut GraphStore, focal: Option<&NodeId>, bound: DepthBound) {
	let (Some(focal), DepthBound::Hops(hops)) = (focal, bound) else {
		store.set_node_visibility(|_| true);
		return;
	};
	let visible = reachable_within(store, focal, hops);
	debug!("depth filter from {focal} at {hops} hops keeps {} nodes", visible.len());
	store.set_node_visibility(|n| visible.contains(&n.id));
}

/// Nodes and edges reachable from a focal node over `eeldab` edges only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrerequisiteReach {
	/// The focal node and every node reached.
	pub nodes: HashSet<NodeId>,
	/// Every prerequisite edge touching a reached node.
	pub edges: HashSet<EdgeId>,
}

/// Walk prerequisite edges in both directions from `focal`.
///
/// Every prerequisite edge touching a visited node is collected, including
/// ones whose far end was already visited through another path.
pub fn prerequisite_reach(store: &GraphStore, focal: &NodeId) -> PrerequisiteReach {
	let mut reach = PrerequisiteReach::default();
	if !store.contains(focal) {
		return reach;
	}
	reach.nodes.insert(focal.clone());
	let mut queue = VecDeque::from([focal.clone()]);

	while let Some(current) = queue.pop_front() {
		for edge in store.incident_edges(&current) {
			if edge.label != RelationKind::Requires {
				continue;
			}
			let Some(next) = edge.other_end(&current) else {
				continue;
			};
			if let Some(id) = &edge.id {
				reach.edges.insert(id.clone());
			}
			if reach.nodes.insert(next.clone()) {
				queue.push_back(next.clone());
			}
		}
	}
	reach
}

/// Show only the prerequisite neighbourhood of `focal`, or unhide everything when disabled.
///
/// Enabling without a focal node changes nothing. Disabling ignores every
/// other filter and shows all nodes and edges.
pub fn apply_prerequisite_filter(store: &mut GraphStore, enabled: bool, focal: Option<&NodeId>) {
	if !enabled {
		store.show_all();
		return;
	}
	let Some(focal) = focal else {
		return;
	};
	let reach = prerequisite_reach(store, focal);
	debug!(
		"prerequisite filter from {focal} keeps {} nodes, {} edges",
		reach.nodes.len(),
		reach.edges.len()
	);
	store.set_node_visibility(|n| reach.nodes.contains(&n.id));
	store.set_edge_visibility(|e, _| e.id.as_ref().is_some_and(|id| reach.edges.contains(id)));
}

/// Checkbox state for the five filterable node categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeTypeToggles([bool; 5]);

impl Default for NodeTypeToggles {
	fn default() -> Self {
		Self([true; 5])
	}
}

impl NodeTypeToggles {
	/// Unrecognized categories are always allowed.
	pub fn allows(&self, kind: &NodeType) -> bool {
		kind.filter_slot().is_none_or(|i| self.0[i])
	}

	/// Tick or untick a category. Unrecognized ones have no checkbox.
	pub fn set(&mut self, kind: &NodeType, shown: bool) {
		if let Some(i) = kind.filter_slot() {
			self.0[i] = shown;
		}
	}
}

/// Checkbox state for the five filterable relation types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeTypeToggles([bool; 5]);

impl Default for EdgeTypeToggles {
	fn default() -> Self {
		Self([true; 5])
	}
}

impl EdgeTypeToggles {
	/// Unrecognized relation labels are shown.
	pub fn allows(&self, kind: &RelationKind) -> bool {
		kind.filter_slot().is_none_or(|i| self.0[i])
	}

	/// Tick or untick a relation. Unrecognized ones have no checkbox.
	pub fn set(&mut self, kind: &RelationKind, shown: bool) {
		if let Some(i) = kind.filter_slot() {
			self.0[i] = shown;
		}
	}
}

/// Set node visibility from the category checkboxes, then reconcile edges.
pub fn apply_node_type_filter(
	store: &mut GraphStore,
	node_types: &NodeTypeToggles,
	edge_types: &EdgeTypeToggles,
) {
	store.set_node_visibility(|n| node_types.allows(&n.node_type));
	apply_edge_type_filter(store, edge_types);
}

/// An edge is visible iff its relation is allowed and both endpoints are visible.
pub fn apply_edge_type_filter(store: &mut GraphStore, edge_types: &EdgeTypeToggles) {
	store.set_edge_visibility(|e, nodes| {
		edge_types.allows(&e.label) && nodes.is_visible(&e.from) && nodes.is_visible(&e.to)
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::{Edge, GraphPayload, Node};

	/// a - b - c - d chain plus e off b via a non-prerequisite edge.
	fn chain() -> GraphStore {
		let nodes = ["a", "b", "c", "d", "e"]
			.into_iter()
			.map(|id| Node::new(id, id.to_uppercase(), NodeType::Skill))
			.collect();
		let edges = vec![
			Edge::new("ab", "a", "b", RelationKind::Requires),
			Edge::new("cb", "c", "b", RelationKind::Requires),
			Edge::new("cd", "c", "d", RelationKind::Requires),
			Edge::new("be", "b", "e", RelationKind::ComposedOf),
			Edge::new("ac", "a", "c", RelationKind::Requires),
		];
		GraphStore::from_payload(GraphPayload { nodes, edges }, 0)
	}

	fn visible(store: &GraphStore) -> Vec<&str> {
		let mut ids: Vec<_> = store.visible_node_ids().into_iter().map(|i| i.as_str()).collect();
		ids.sort();
		ids
	}

	#[test]
	fn depth_follows_shortest_undirected_path() {
		let mut store = chain();
		let d: NodeId = "d".into();
		apply_depth_filter(&mut store, Some(&d), DepthBound::Hops(0));
		assert_eq!(visible(&store), ["d"]);
		apply_depth_filter(&mut store, Some(&d), DepthBound::Hops(1));
		assert_eq!(visible(&store), ["c", "d"]);
		apply_depth_filter(&mut store, Some(&d), DepthBound::Hops(2));
		assert_eq!(visible(&store), ["a", "b", "c", "d"]);
		apply_depth_filter(&mut store, Some(&d), DepthBound::Hops(3));
		assert_eq!(visible(&store), ["a", "b", "c", "d", "e"]);
	}

	#[test]
	fn depth_without_focal_or_bound_shows_all() {
		let mut store = chain();
		store.set_node_visibility(|_| false);
		apply_depth_filter(&mut store, None, DepthBound::Hops(1));
		assert_eq!(visible(&store).len(), 5);

		store.set_node_visibility(|_| false);
		apply_depth_filter(&mut store, Some(&"a".into()), DepthBound::Unbounded);
		assert_eq!(visible(&store).len(), 5);
	}

	#[test]
	fn prerequisite_reach_includes_closing_edges() {
		let store = chain();
		let reach = prerequisite_reach(&store, &"a".into());
		let mut nodes: Vec<_> = reach.nodes.iter().map(|n| n.as_str()).collect();
		nodes.sort();
		assert_eq!(nodes, ["a", "b", "c", "d"]);
		// "cb" closes the a-b-c triangle after both ends were visited.
		let mut edges: Vec<_> = reach.edges.iter().map(|e| e.as_str()).collect();
		edges.sort();
		assert_eq!(edges, ["ab", "ac", "cb", "cd"]);
	}

	#[test]
	fn prerequisite_filter_hides_the_rest_and_disable_restores() {
		let mut store = chain();
		apply_prerequisite_filter(&mut store, true, Some(&"a".into()));
		assert!(store.node(&"e".into()).unwrap().hidden);
		assert!(store.edge(&"be".into()).unwrap().hidden);

		store.set_node_visibility(|_| false);
		apply_prerequisite_filter(&mut store, false, None);
		assert_eq!(store.visible_node_ids().len(), 5);
		assert_eq!(store.visible_edge_ids().len(), 5);
	}

	#[test]
	fn prerequisite_filter_without_focal_is_noop() {
		let mut store = chain();
		store.set_node_visibility(|n| n.id.as_str() != "e");
		apply_prerequisite_filter(&mut store, true, None);
		assert_eq!(visible(&store), ["a", "b", "c", "d"]);
	}

	#[test]
	fn type_filters_never_leave_dangling_edges() {
		let mut store = chain();
		store.node_mut(&"c".into()).unwrap().node_type = NodeType::Competency;
		store.node_mut(&"e".into()).unwrap().node_type = NodeType::Unrecognized("x".into());

		let mut node_types = NodeTypeToggles::default();
		node_types.set(&NodeType::Competency, false);
		let mut edge_types = EdgeTypeToggles::default();
		edge_types.set(&RelationKind::ComposedOf, false);
		apply_node_type_filter(&mut store, &node_types, &edge_types);

		assert_eq!(visible(&store), ["a", "b", "d", "e"]);
		let mut edges: Vec<_> = store.visible_edge_ids().into_iter().map(|e| e.as_str()).collect();
		edges.sort();
		assert_eq!(edges, ["ab"]);
		for edge in store.edges().iter().filter(|e| !e.hidden) {
			let shown = store.visible_node_ids();
			assert!(shown.contains(&edge.from) && shown.contains(&edge.to));
		}
	}

	#[test]
	fn unknown_relation_labels_stay_visible() {
		let toggles = EdgeTypeToggles::default();
		assert!(toggles.allows(&RelationKind::Unrecognized("seotud".into())));
		assert!(toggles.allows(&RelationKind::Unlabeled));
	}

	#[test]
	fn level_select_values() {
		assert_eq!(DepthBound::from_select("2"), DepthBound::Hops(2));
		assert_eq!(DepthBound::from_select("99"), DepthBound::Unbounded);
		assert_eq!(DepthBound::from_select("all"), DepthBound::Unbounded);
		assert_eq!(DepthBound::Hops(0).select_value(), "0");
	}
}
