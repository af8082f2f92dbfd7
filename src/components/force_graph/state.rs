use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{EdgeInfo, FocusRequest, NodeInfo, PointerEvent};
use crate::graph::{GraphStore, NodeId};

pub const NODE_RADIUS: f64 = 10.0;
pub const HIT_PADDING: f64 = 4.0;
/// Pointer travel (screen px) below which a press counts as a click.
pub const CLICK_TOLERANCE: f64 = 4.0;

fn ease_in_out_quad(t: f64) -> f64 {
	if t < 0.5 {
		2.0 * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub highlight_t: f64,
}

#[derive(Clone, Debug)]
struct FocusAnimation {
	target: DefaultNodeIdx,
	from: ViewTransform,
	to_k: f64,
	elapsed: f64,
	duration: f64,
}

#[derive(Clone, Debug)]
pub struct DrawnEdge {
	pub src: DefaultNodeIdx,
	pub tgt: DefaultNodeIdx,
	pub info: EdgeInfo,
}

/// Position and visibility of a node for one frame.
#[derive(Clone, Copy, Debug)]
pub struct NodeFrame {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub hidden: bool,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<DrawnEdge>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	press: Option<(f64, f64)>,
	focus: Option<FocusAnimation>,
	generation: u64,
	id_to_idx: HashMap<NodeId, DefaultNodeIdx>,
}

impl ForceGraphState {
	pub fn new(store: &GraphStore, params: SimulationParameters, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(params);
		let mut id_to_idx = HashMap::new();
		let count = store.nodes().len().max(1) as f64;
		let ring = 100.0 + 12.0 * count.sqrt();

		for (i, node) in store.nodes().iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let (x, y) = ((ring * angle.cos()) as f32, (ring * angle.sin()) as f32);
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					style: node.style.clone(),
					radius: node.size.unwrap_or(NODE_RADIUS).clamp(4.0, 40.0),
					hidden: node.hidden,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut edges = Vec::with_capacity(store.edges().len());
		for edge in store.edges() {
			let (Some(&src), Some(&tgt)) = (id_to_idx.get(&edge.from), id_to_idx.get(&edge.to))
			else {
				continue;
			};
			if src != tgt {
				graph.add_edge(src, tgt, EdgeData::default());
			}
			edges.push(DrawnEdge {
				src,
				tgt,
				info: EdgeInfo {
					id: edge.id.clone(),
					label: edge.label.wire_name().to_owned(),
					color: edge.style.color.clone(),
					highlight: edge.style.highlight.clone(),
					dashed: edge.style.dashed,
					hidden: edge.hidden,
				},
			});
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			press: None,
			focus: None,
			generation: store.generation(),
			id_to_idx,
		}
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Copy hidden flags and styles from the store without touching layout.
	pub fn sync(&mut self, store: &GraphStore) {
		self.graph.visit_nodes_mut(|node| {
			let info = &mut node.data.user_data;
			if let Some(src) = store.node(&info.id) {
				info.hidden = src.hidden;
				info.style = src.style.clone();
			}
		});
		for edge in &mut self.edges {
			if let Some(src) = edge.info.id.as_ref().and_then(|id| store.edge(id)) {
				edge.info.hidden = src.hidden;
			}
		}
		if let Some(idx) = self.hover.node {
			if self.frames().get(&idx).is_none_or(|f| f.hidden) {
				self.hover.node = None;
			}
		}
	}

	pub fn frames(&self) -> HashMap<DefaultNodeIdx, NodeFrame> {
		let mut frames = HashMap::new();
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			frames.insert(
				node.index(),
				NodeFrame {
					x: node.x() as f64,
					y: node.y() as f64,
					radius: info.radius,
					hidden: info.hidden,
				},
			);
		});
		frames
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost visible node under a screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if info.hidden {
				return;
			}
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < info.radius + HIT_PADDING {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<NodeId> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
	}

	/// Update hover from a pointer position and report blur/hover transitions.
	pub fn hover_at(&mut self, sx: f64, sy: f64) -> Vec<PointerEvent> {
		let hovered = self.node_at_position(sx, sy);
		if hovered == self.hover.node {
			return Vec::new();
		}
		let mut events = Vec::new();
		if self.hover.node.take().is_some() {
			events.push(PointerEvent::Blur);
		}
		if let Some(idx) = hovered {
			self.hover.node = Some(idx);
			self.hover.highlight_t = 0.0;
			if let Some(id) = self.node_id(idx) {
				events.push(PointerEvent::Hover(id));
			}
		}
		events
	}

	pub fn leave(&mut self) -> Option<PointerEvent> {
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
		self.press = None;
		self.hover.node.take().map(|_| PointerEvent::Blur)
	}

	pub fn press_at(&mut self, sx: f64, sy: f64) {
		self.press = Some((sx, sy));
		self.focus = None;
		if let Some(idx) = self.node_at_position(sx, sy) {
			let (nx, ny) = self.node_position(idx).unwrap_or_default();
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: sx,
				start_y: sy,
				node_start_x: nx as f32,
				node_start_y: ny as f32,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn move_to(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(sx - self.drag.start_x) / self.transform.k,
					(sy - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// End a press. A press that barely moved is a click on whatever is under it.
	pub fn release_at(&mut self, sx: f64, sy: f64) -> Option<PointerEvent> {
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
		let (px, py) = self.press.take()?;
		if (sx - px).hypot(sy - py) > CLICK_TOLERANCE {
			return None;
		}
		let id = self
			.node_at_position(sx, sy)
			.and_then(|idx| self.node_id(idx));
		Some(PointerEvent::Click(id))
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		self.focus = None;
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Start animating the view so `request.node` ends up centred at `request.scale`.
	pub fn focus_on(&mut self, request: &FocusRequest) -> bool {
		let Some(&target) = self.id_to_idx.get(&request.node) else {
			return false;
		};
		self.focus = Some(FocusAnimation {
			target,
			from: self.transform.clone(),
			to_k: request.scale,
			elapsed: 0.0,
			duration: request.duration_ms / 1000.0,
		});
		true
	}

	fn step_focus(&mut self, dt: f64) {
		let Some(anim) = self.focus.as_mut() else {
			return;
		};
		anim.elapsed += dt;
		let t = if anim.duration <= 0.0 {
			1.0
		} else {
			(anim.elapsed / anim.duration).min(1.0)
		};
		let (target, from, to_k) = (anim.target, anim.from.clone(), anim.to_k);
		let Some((nx, ny)) = self.node_position(target) else {
			self.focus = None;
			return;
		};

		let e = ease_in_out_quad(t);
		let k = from.k + (to_k - from.k) * e;
		let (tx, ty) = (self.width / 2.0 - nx * k, self.height / 2.0 - ny * k);
		self.transform = ViewTransform {
			x: from.x + (tx - from.x) * e,
			y: from.y + (ty - from.y) * e,
			k,
		};
		if t >= 1.0 {
			self.focus = None;
		}
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.step_focus(dt as f64);

		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 1.8 * dt as f64;
		if self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::PhysicsConfig;
	use crate::graph::{Edge, GraphPayload, Node, NodeType, RelationKind};

	fn store() -> GraphStore {
		GraphStore::from_payload(
			GraphPayload {
				nodes: vec![
					Node::new("a", "A", NodeType::Skill),
					Node::new("b", "B", NodeType::Skill),
				],
				edges: vec![Edge::new("ab", "a", "b", RelationKind::Requires)],
			},
			7,
		)
	}

	fn canvas(store: &GraphStore) -> ForceGraphState {
		ForceGraphState::new(
			store,
			PhysicsConfig::default().simulation_parameters(),
			800.0,
			600.0,
		)
	}

	fn screen_pos(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let idx = state.id_to_idx[&NodeId::from(id)];
		let f = state.frames()[&idx];
		(
			f.x * state.transform.k + state.transform.x,
			f.y * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn hidden_nodes_are_not_hit() {
		let mut store = store();
		let mut state = canvas(&store);
		assert_eq!(state.generation(), 7);
		let (x, y) = screen_pos(&state, "a");
		assert!(state.node_at_position(x, y).is_some());

		store.set_node_visibility(|n| n.id.as_str() != "a");
		state.sync(&store);
		assert!(state.node_at_position(x, y).is_none());
	}

	#[test]
	fn short_press_is_a_click() {
		let store = store();
		let mut state = canvas(&store);
		let (x, y) = screen_pos(&state, "b");
		state.press_at(x, y);
		assert_eq!(
			state.release_at(x + 1.0, y),
			Some(PointerEvent::Click(Some("b".into())))
		);

		state.press_at(5.0, 5.0);
		assert_eq!(state.release_at(5.0, 5.0), Some(PointerEvent::Click(None)));

		state.press_at(5.0, 5.0);
		state.move_to(60.0, 60.0);
		assert_eq!(state.release_at(60.0, 60.0), None);
	}

	#[test]
	fn hover_reports_blur_then_hover() {
		let store = store();
		let mut state = canvas(&store);
		let (ax, ay) = screen_pos(&state, "a");
		let (bx, by) = screen_pos(&state, "b");
		assert_eq!(state.hover_at(ax, ay), vec![PointerEvent::Hover("a".into())]);
		assert!(state.hover_at(ax, ay).is_empty());
		assert_eq!(
			state.hover_at(bx, by),
			vec![PointerEvent::Blur, PointerEvent::Hover("b".into())]
		);
		assert_eq!(state.leave(), Some(PointerEvent::Blur));
	}

	#[test]
	fn focus_centres_the_node() {
		let store = store();
		let mut state = canvas(&store);
		state.animation_running = false;
		let request = FocusRequest {
			node: "a".into(),
			serial: 0,
			scale: 1.2,
			duration_ms: 100.0,
		};
		assert!(state.focus_on(&request));
		state.step_focus(0.2);
		assert!(state.focus.is_none());
		let (x, y) = screen_pos(&state, "a");
		assert!((x - 400.0).abs() < 1e-6 && (y - 300.0).abs() < 1e-6);
		assert!((state.transform.k - 1.2).abs() < 1e-9);
	}
}
