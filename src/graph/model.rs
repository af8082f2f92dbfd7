//! Wire and in-memory types for the competency graph.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Text(String),
	Int(i64),
	Float(f64),
}

impl From<RawId> for String {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Text(s) => s,
			RawId::Int(i) => i.to_string(),
			RawId::Float(f) => f.to_string(),
		}
	}
}

macro_rules! string_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			/// Borrow the id as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl From<&str> for $name {
			fn from(s: &str) -> Self {
				Self(s.to_owned())
			}
		}

		impl From<String> for $name {
			fn from(s: String) -> Self {
				Self(s)
			}
		}

		impl From<i64> for $name {
			fn from(i: i64) -> Self {
				Self(i.to_string())
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl<'de> Deserialize<'de> for $name {
			fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
				RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
			}
		}
	};
}

string_id!(
	/// Node identifier. The server sends strings or integers; both land here as text.
	NodeId
);
string_id!(
	/// Edge identifier.
	EdgeId
);

/// Node category. Wire values are the lowercase Estonian names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
	/// `oskus`
	Skill,
	/// `kompetents`
	Competency,
	/// `tegevusnaitaja`
	Indicator,
	/// `knobit`
	Knobit,
	/// `muu`
	Other,
	/// Anything the client does not know about.
	Unrecognized(String),
	/// Missing `type` field.
	#[default]
	Untyped,
}

impl NodeType {
	/// The five categories that have a filter checkbox.
	pub const FILTERABLE: [NodeType; 5] = [
		NodeType::Skill,
		NodeType::Competency,
		NodeType::Indicator,
		NodeType::Knobit,
		NodeType::Other,
	];

	/// Position in [`NodeType::FILTERABLE`], if this is one of them.
	pub fn filter_slot(&self) -> Option<usize> {
		match self {
			NodeType::Skill => Some(0),
			NodeType::Competency => Some(1),
			NodeType::Indicator => Some(2),
			NodeType::Knobit => Some(3),
			NodeType::Other => Some(4),
			NodeType::Unrecognized(_) | NodeType::Untyped => None,
		}
	}

	/// The `type` string the server uses for this category.
	pub fn wire_name(&self) -> &str {
		match self {
			NodeType::Skill => "oskus",
			NodeType::Competency => "kompetents",
			NodeType::Indicator => "tegevusnaitaja",
			NodeType::Knobit => "knobit",
			NodeType::Other => "muu",
			NodeType::Unrecognized(s) => s,
			NodeType::Untyped => "",
		}
	}

	/// Checkbox label.
	pub fn display_name(&self) -> &str {
		match self {
			NodeType::Skill => "Skill",
			NodeType::Competency => "Competency",
			NodeType::Indicator => "Indicator",
			NodeType::Knobit => "Knobit",
			NodeType::Other => "Other",
			NodeType::Unrecognized(s) => s,
			NodeType::Untyped => "Untyped",
		}
	}
}

impl From<String> for NodeType {
	fn from(s: String) -> Self {
		match s.as_str() {
			"oskus" => NodeType::Skill,
			"kompetents" => NodeType::Competency,
			"tegevusnaitaja" => NodeType::Indicator,
			"knobit" => NodeType::Knobit,
			"muu" => NodeType::Other,
			"" => NodeType::Untyped,
			_ => NodeType::Unrecognized(s),
		}
	}
}

impl<'de> Deserialize<'de> for NodeType {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Option::<String>::deserialize(deserializer).map(|s| s.unwrap_or_default().into())
	}
}

/// Relation type carried in an edge's `label`. Matched by exact string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum RelationKind {
	/// `eeldab`
	Requires,
	/// `koosneb`
	ComposedOf,
	/// `sisaldab Tn`
	ContainsIndicator,
	/// `sisaldab knobitit`
	ContainsKnobit,
	/// `Tn eeldab`
	IndicatorRequires,
	/// Any other label, including the empty one.
	Unrecognized(String),
	/// Missing `label` field.
	#[default]
	Unlabeled,
}

impl RelationKind {
	/// The five relations that have a filter checkbox.
	pub const FILTERABLE: [RelationKind; 5] = [
		RelationKind::Requires,
		RelationKind::ComposedOf,
		RelationKind::ContainsIndicator,
		RelationKind::ContainsKnobit,
		RelationKind::IndicatorRequires,
	];

	/// Position in [`RelationKind::FILTERABLE`], if this is one of them.
	pub fn filter_slot(&self) -> Option<usize> {
		match self {
			RelationKind::Requires => Some(0),
			RelationKind::ComposedOf => Some(1),
			RelationKind::ContainsIndicator => Some(2),
			RelationKind::ContainsKnobit => Some(3),
			RelationKind::IndicatorRequires => Some(4),
			RelationKind::Unrecognized(_) | RelationKind::Unlabeled => None,
		}
	}

	/// The edge `label` string for this relation.
	pub fn wire_name(&self) -> &str {
		match self {
			RelationKind::Requires => "eeldab",
			RelationKind::ComposedOf => "koosneb",
			RelationKind::ContainsIndicator => "sisaldab Tn",
			RelationKind::ContainsKnobit => "sisaldab knobitit",
			RelationKind::IndicatorRequires => "Tn eeldab",
			RelationKind::Unrecognized(s) => s,
			RelationKind::Unlabeled => "",
		}
	}

	/// Checkbox label.
	pub fn display_name(&self) -> &str {
		match self {
			RelationKind::Requires => "Requires",
			RelationKind::ComposedOf => "Composed of",
			RelationKind::ContainsIndicator => "Contains indicator",
			RelationKind::ContainsKnobit => "Contains knobit",
			RelationKind::IndicatorRequires => "Indicator requires",
			RelationKind::Unrecognized(s) => s,
			RelationKind::Unlabeled => "Unlabeled",
		}
	}
}

impl From<String> for RelationKind {
	fn from(s: String) -> Self {
		match s.as_str() {
			"eeldab" => RelationKind::Requires,
			"koosneb" => RelationKind::ComposedOf,
			"sisaldab Tn" => RelationKind::ContainsIndicator,
			"sisaldab knobitit" => RelationKind::ContainsKnobit,
			"Tn eeldab" => RelationKind::IndicatorRequires,
			_ => RelationKind::Unrecognized(s),
		}
	}
}

impl<'de> Deserialize<'de> for RelationKind {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Option::<String>::deserialize(deserializer)
			.map(|s| s.map(RelationKind::from).unwrap_or(RelationKind::Unlabeled))
	}
}

/// Occupation linked to a node.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Occupation {
	/// ESCO occupation URI.
	pub uri: String,
	/// Human-readable name; may be empty.
	#[serde(default)]
	pub label: String,
}

/// Colors used while a node is hovered.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HighlightColor {
	/// Fill while hovered.
	pub background: Option<String>,
	/// Outline while hovered.
	pub border: Option<String>,
}

/// Node color as the server may send it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NodeColor {
	/// A single fill color.
	Plain(String),
	/// Separate fill, outline and hover colors.
	Detailed {
		/// Fill.
		background: Option<String>,
		/// Outline.
		border: Option<String>,
		/// Hover colors.
		highlight: Option<HighlightColor>,
	},
}

/// Edge color as the server may send it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EdgeColor {
	/// Line color only.
	Plain(String),
	/// Line color plus a hover color.
	Detailed {
		/// Line color.
		color: Option<String>,
		/// Hover color.
		highlight: Option<String>,
	},
}

/// Fill and border colors of a node, plus the pair used while hovered.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	/// Fill.
	pub background: String,
	/// Outline.
	pub border: String,
	/// Fill while hovered.
	pub highlight_background: String,
	/// Outline while hovered.
	pub highlight_border: String,
	/// Outline width in graph units.
	pub border_width: f64,
}

impl NodeStyle {
	/// White fill, blue border.
	pub fn default_node() -> Self {
		Self {
			background: "#ffffff".into(),
			border: "#007bff".into(),
			highlight_background: "#e0f0ff".into(),
			highlight_border: "#0056b3".into(),
			border_width: 1.0,
		}
	}

	/// Style of the focal node.
	pub fn selected() -> Self {
		Self {
			background: "#007bff".into(),
			border: "#f89090".into(),
			highlight_background: "#0056b3".into(),
			highlight_border: "#f89090".into(),
			border_width: 0.5,
		}
	}

	fn from_color(color: &NodeColor) -> Self {
		let defaults = Self::default_node();
		match color {
			NodeColor::Plain(c) => Self {
				background: c.clone(),
				highlight_background: c.clone(),
				..defaults
			},
			NodeColor::Detailed {
				background,
				border,
				highlight,
			} => {
				let background = background.clone().unwrap_or(defaults.background);
				let border = border.clone().unwrap_or(defaults.border);
				let (hb, hr) = match highlight {
					Some(h) => (
						h.background.clone().unwrap_or_else(|| background.clone()),
						h.border.clone().unwrap_or_else(|| border.clone()),
					),
					None => (background.clone(), border.clone()),
				};
				Self {
					background,
					border,
					highlight_background: hb,
					highlight_border: hr,
					border_width: defaults.border_width,
				}
			}
		}
	}
}

impl Default for NodeStyle {
	fn default() -> Self {
		Self::default_node()
	}
}

/// Line color of edges the server sent no color for.
pub const DEFAULT_EDGE_COLOR: &str = "#cccccc";
/// Line color of edges touching the hovered node.
pub const EDGE_HIGHLIGHT_COLOR: &str = "#999999";

/// Resolved drawing style of an edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Line and arrow color.
	pub color: String,
	/// Color while an endpoint is hovered.
	pub highlight: String,
	/// Draw as a dashed line.
	pub dashed: bool,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			color: DEFAULT_EDGE_COLOR.into(),
			highlight: EDGE_HIGHLIGHT_COLOR.into(),
			dashed: false,
		}
	}
}

/// A graph vertex as delivered by `/graph`, plus transient view state.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	/// Unique within a payload.
	pub id: NodeId,
	/// Display label, also what search matches against.
	#[serde(default)]
	pub label: String,
	/// Category, from the wire `type` field.
	#[serde(default, rename = "type")]
	pub node_type: NodeType,
	/// Free text for the info panel.
	#[serde(default)]
	pub description: Option<String>,
	/// Source page of the node.
	#[serde(default)]
	pub link: Option<String>,
	/// ESCO skill page.
	#[serde(default)]
	pub esco_link: Option<String>,
	/// Matching ESCO concept label.
	#[serde(default)]
	pub esco_vaste: Option<String>,
	/// Verb describing the skill.
	#[serde(default)]
	pub skill_verb: Option<String>,
	/// Code in the OSKA skills register.
	#[serde(default)]
	pub osk_reg_kood: Option<String>,
	/// Occupations the skill is relevant to.
	#[serde(default)]
	pub relevant_occupations: Vec<Occupation>,
	/// Initial color sent by the server.
	#[serde(default)]
	pub color: Option<NodeColor>,
	/// Radius hint for the canvas.
	#[serde(default)]
	pub size: Option<f64>,
	/// Depth the server assigned, if any. Not used for filtering.
	#[serde(default)]
	pub level: Option<i64>,
	/// Hidden by the current filters.
	#[serde(default)]
	pub hidden: bool,
	/// Current drawing style.
	#[serde(skip)]
	pub style: NodeStyle,
}

impl Node {
	/// Bare node with the given id, label and category. Mostly useful in tests.
	pub fn new(id: impl Into<NodeId>, label: impl Into<String>, node_type: NodeType) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			node_type,
			description: None,
			link: None,
			esco_link: None,
			esco_vaste: None,
			skill_verb: None,
			osk_reg_kood: None,
			relevant_occupations: Vec::new(),
			color: None,
			size: None,
			level: None,
			hidden: false,
			style: NodeStyle::default(),
		}
	}

	/// Resolve the server color, if any, into the current style.
	pub fn init_style(&mut self) {
		self.style = self
			.color
			.as_ref()
			.map(NodeStyle::from_color)
			.unwrap_or_default();
	}

	/// Non-blank description.
	pub fn description(&self) -> Option<&str> {
		non_empty(&self.description)
	}

	/// Non-blank source link.
	pub fn link(&self) -> Option<&str> {
		non_empty(&self.link)
	}

	/// Non-blank ESCO link.
	pub fn esco_link(&self) -> Option<&str> {
		non_empty(&self.esco_link)
	}

	/// Non-blank ESCO match.
	pub fn esco_vaste(&self) -> Option<&str> {
		non_empty(&self.esco_vaste)
	}

	/// Non-blank skill verb.
	pub fn skill_verb(&self) -> Option<&str> {
		non_empty(&self.skill_verb)
	}

	/// Non-blank skills register code.
	pub fn osk_reg_kood(&self) -> Option<&str> {
		non_empty(&self.osk_reg_kood)
	}
}

/// A directed, typed relation between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Edge {
	/// Absent on the wire for most servers; the store fills it in.
	#[serde(default)]
	pub id: Option<EdgeId>,
	/// Source node.
	pub from: NodeId,
	/// Target node.
	pub to: NodeId,
	/// Relation type.
	#[serde(default)]
	pub label: RelationKind,
	/// Line color sent by the server.
	#[serde(default)]
	pub color: Option<EdgeColor>,
	/// Draw dashed.
	#[serde(default)]
	pub dashes: bool,
	/// Hidden by the current filters.
	#[serde(default)]
	pub hidden: bool,
	/// Resolved drawing style.
	#[serde(skip)]
	pub style: EdgeStyle,
}

impl Edge {
	/// Edge with an explicit id and default styling.
	pub fn new(
		id: impl Into<EdgeId>,
		from: impl Into<NodeId>,
		to: impl Into<NodeId>,
		label: RelationKind,
	) -> Self {
		Self {
			id: Some(id.into()),
			from: from.into(),
			to: to.into(),
			label,
			color: None,
			dashes: false,
			hidden: false,
			style: EdgeStyle::default(),
		}
	}

	/// Resolve the server color and dash flag into `style`.
	pub fn init_style(&mut self) {
		let mut style = EdgeStyle {
			dashed: self.dashes,
			..EdgeStyle::default()
		};
		match &self.color {
			Some(EdgeColor::Plain(c)) => style.color = c.clone(),
			Some(EdgeColor::Detailed { color, highlight }) => {
				if let Some(c) = color {
					style.color = c.clone();
				}
				if let Some(h) = highlight {
					style.highlight = h.clone();
				}
			}
			None => {}
		}
		self.style = style;
	}

	/// The endpoint opposite `id`, treating the edge as undirected.
	pub fn other_end(&self, id: &NodeId) -> Option<&NodeId> {
		if &self.from == id {
			Some(&self.to)
		} else if &self.to == id {
			Some(&self.from)
		} else {
			None
		}
	}
}

/// Body of a successful `GET /graph` response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphPayload {
	/// Graph vertices in server order.
	#[serde(default)]
	pub nodes: Vec<Node>,
	/// Relations; may reference unknown nodes.
	#[serde(default)]
	pub edges: Vec<Edge>,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
	field.as_deref().filter(|s| !s.trim().is_empty())
}
