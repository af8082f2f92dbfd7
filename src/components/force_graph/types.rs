use crate::graph::{EdgeId, NodeId, NodeStyle};

/// Ask the canvas to animate onto a node. `serial` makes repeat requests distinct.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusRequest {
	pub node: NodeId,
	pub serial: u64,
	pub scale: f64,
	pub duration_ms: f64,
}

/// What the canvas reports back about the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerEvent {
	Click(Option<NodeId>),
	Hover(NodeId),
	Blur,
}

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub style: NodeStyle,
	pub radius: f64,
	pub hidden: bool,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub id: Option<EdgeId>,
	pub label: String,
	pub color: String,
	pub highlight: String,
	pub dashed: bool,
	pub hidden: bool,
}
