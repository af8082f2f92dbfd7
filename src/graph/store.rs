//! Indexed in-memory node/edge store.
//!
//! The store is replaced wholesale on every successful fetch and mutated in
//! place afterwards (hidden flags, styles). Iteration order is payload order.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::model::{Edge, EdgeId, GraphPayload, Node, NodeId, NodeStyle};

/// Nodes and edges of the current graph, indexed by id.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	node_index: HashMap<NodeId, usize>,
	edge_index: HashMap<EdgeId, usize>,
	/// Edge positions incident to each node position.
	incident: Vec<Vec<usize>>,
	generation: u64,
}

impl GraphStore {
	/// Build a store from a decoded payload.
	///
	/// Duplicate node ids keep their first occurrence. Edges whose endpoints
	/// are unknown are dropped, so every stored edge references stored nodes.
	/// Edges without an id, or repeating an earlier one, get `edge-<n>`, `n`
	/// being the payload position, suffixed until no stored edge has it.
	pub fn from_payload(payload: GraphPayload, generation: u64) -> Self {
		let mut store = Self {
			generation,
			..Self::default()
		};

		for mut node in payload.nodes {
			if store.node_index.contains_key(&node.id) {
				warn!("duplicate node id {}, keeping the first one", node.id);
				continue;
			}
			node.init_style();
			store.node_index.insert(node.id.clone(), store.nodes.len());
			store.nodes.push(node);
		}
		store.incident = vec![Vec::new(); store.nodes.len()];

		for (n, mut edge) in payload.edges.into_iter().enumerate() {
			let (Some(&from), Some(&to)) = (
				store.node_index.get(&edge.from),
				store.node_index.get(&edge.to),
			) else {
				warn!(
					"dropping edge {} -> {}: endpoint not in graph",
					edge.from, edge.to
				);
				continue;
			};
			let id = match edge.id.take() {
				Some(id) if !store.edge_index.contains_key(&id) => id,
				_ => store.free_edge_id(n),
			};
			edge.id = Some(id.clone());
			edge.init_style();

			let pos = store.edges.len();
			store.edge_index.insert(id, pos);
			store.incident[from].push(pos);
			if to != from {
				store.incident[to].push(pos);
			}
			store.edges.push(edge);
		}

		store
	}

	fn free_edge_id(&self, n: usize) -> EdgeId {
		let mut id = EdgeId::from(format!("edge-{n}"));
		let mut suffix = 1;
		while self.edge_index.contains_key(&id) {
			id = EdgeId::from(format!("edge-{n}-{suffix}"));
			suffix += 1;
		}
		id
	}

	/// Bumped by the owner on every wholesale replacement.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// No nodes loaded.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// All nodes in payload order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All kept edges in payload order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Node by id.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.node_index.get(id).map(|&i| &self.nodes[i])
	}

	/// Mutable node by id.
	pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
		self.node_index.get(id).map(|&i| &mut self.nodes[i])
	}

	/// Edge by id.
	pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
		self.edge_index.get(id).map(|&i| &self.edges[i])
	}

	/// Whether a node with this id exists.
	pub fn contains(&self, id: &NodeId) -> bool {
		self.node_index.contains_key(id)
	}

	/// Edges touching `id`, in either direction.
	pub fn incident_edges(&self, id: &NodeId) -> impl Iterator<Item = &Edge> {
		self.node_index
			.get(id)
			.map(|&i| self.incident[i].as_slice())
			.unwrap_or_default()
			.iter()
			.map(|&e| &self.edges[e])
	}

	/// Set every node's hidden flag from `visible`.
	pub fn set_node_visibility(&mut self, mut visible: impl FnMut(&Node) -> bool) {
		for node in &mut self.nodes {
			node.hidden = !visible(node);
		}
	}

	/// Set every edge's hidden flag from `visible`, given read access to the nodes.
	pub fn set_edge_visibility(&mut self, mut visible: impl FnMut(&Edge, &NodeLookup<'_>) -> bool) {
		let lookup = NodeLookup {
			nodes: &self.nodes,
			index: &self.node_index,
		};
		for edge in &mut self.edges {
			edge.hidden = !visible(edge, &lookup);
		}
	}

	/// Clear every hidden flag.
	pub fn show_all(&mut self) {
		self.nodes.iter_mut().for_each(|n| n.hidden = false);
		self.edges.iter_mut().for_each(|e| e.hidden = false);
	}

	/// Replace a node's drawing style. Unknown ids are ignored.
	pub fn set_style(&mut self, id: &NodeId, style: NodeStyle) {
		if let Some(node) = self.node_mut(id) {
			node.style = style;
		}
	}

	/// Ids of nodes not hidden.
	pub fn visible_node_ids(&self) -> HashSet<&NodeId> {
		self.nodes
			.iter()
			.filter(|n| !n.hidden)
			.map(|n| &n.id)
			.collect()
	}

	/// Ids of edges not hidden.
	pub fn visible_edge_ids(&self) -> HashSet<&EdgeId> {
		self.edges
			.iter()
			.filter(|e| !e.hidden)
			.filter_map(|e| e.id.as_ref())
			.collect()
	}
}

/// Read-only node view handed to edge predicates.
pub struct NodeLookup<'a> {
	nodes: &'a [Node],
	index: &'a HashMap<NodeId, usize>,
}

impl NodeLookup<'_> {
	/// Exists and is not hidden.
	pub fn is_visible(&self, id: &NodeId) -> bool {
		self.index.get(id).is_some_and(|&i| !self.nodes[i].hidden)
	}
}
