//! Label search over the store, in store order.

use super::model::Node;
use super::store::GraphStore;

fn label_matches(node: &Node, needle: &str) -> bool {
	node.label.to_lowercase().contains(needle)
}

/// Nodes whose label contains `query` case-insensitively, at most `limit` of them.
///
/// An empty query matches nothing.
pub fn suggestions<'a>(store: &'a GraphStore, query: &str, limit: usize) -> Vec<&'a Node> {
	let needle = query.to_lowercase();
	if needle.is_empty() {
		return Vec::new();
	}
	store
		.nodes()
		.iter()
		.filter(|n| label_matches(n, &needle))
		.take(limit)
		.collect()
}

/// The first `limit` nodes, used to populate the dropdown before anything is typed.
pub fn initial_suggestions(store: &GraphStore, limit: usize) -> Vec<&Node> {
	store.nodes().iter().take(limit).collect()
}

/// First node whose label contains `query` case-insensitively.
pub fn first_match<'a>(store: &'a GraphStore, query: &str) -> Option<&'a Node> {
	let needle = query.to_lowercase();
	store.nodes().iter().find(|n| label_matches(n, &needle))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::{GraphPayload, NodeType};

	fn store() -> GraphStore {
		let nodes = ["Data Analysis", "data entry", "Python", "Big DATA"]
			.iter()
			.enumerate()
			.map(|(i, l)| Node::new(i as i64, *l, NodeType::Skill))
			.collect();
		GraphStore::from_payload(
			GraphPayload {
				nodes,
				edges: Vec::new(),
			},
			0,
		)
	}

	#[test]
	fn first_match_is_case_insensitive_and_ordered() {
		let store = store();
		assert_eq!(first_match(&store, "data").unwrap().label, "Data Analysis");
		assert_eq!(first_match(&store, "ENTRY").unwrap().label, "data entry");
		assert!(first_match(&store, "rust").is_none());
	}

	#[test]
	fn suggestions_are_capped_and_keep_order() {
		let store = store();
		let labels: Vec<_> = suggestions(&store, "DaTa", 30).iter().map(|n| n.label.as_str()).collect();
		assert_eq!(labels, ["Data Analysis", "data entry", "Big DATA"]);
		assert_eq!(suggestions(&store, "data", 2).len(), 2);
		assert!(suggestions(&store, "", 30).is_empty());
		assert_eq!(initial_suggestions(&store, 200).len(), 4);
	}
}
