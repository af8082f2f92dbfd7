//! Info panel state and the content shown in it.

use crate::graph::{Node, NodeId};

/// Description shown for nodes without one.
pub const NO_DESCRIPTION: &str = "No description available";
/// Prefix of skills register links; the code is appended.
pub const SKILL_REGISTER_URL: &str = "https://oska.kutsekoda.ee/oskuste_register/oskused/";

/// Visibility of the info panel and the node it describes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
	/// Nothing shown.
	#[default]
	Hidden,
	/// Shown by hover or search; the next blur hides it.
	Preview(NodeId),
	/// Shown by a click; stays until an empty-canvas click.
	Pinned(NodeId),
}

impl PanelState {
	/// The node being described.
	pub fn node(&self) -> Option<&NodeId> {
		match self {
			PanelState::Hidden => None,
			PanelState::Preview(id) | PanelState::Pinned(id) => Some(id),
		}
	}

	/// Shown by a click.
	pub fn is_pinned(&self) -> bool {
		matches!(self, PanelState::Pinned(_))
	}

	/// Show `id` without touching the pin.
	pub fn show(&mut self, id: NodeId) {
		*self = match self {
			PanelState::Pinned(_) => PanelState::Pinned(id),
			_ => PanelState::Preview(id),
		};
	}

	/// Preview `id` unless pinned.
	pub fn hover(&mut self, id: NodeId) {
		if !self.is_pinned() {
			*self = PanelState::Preview(id);
		}
	}

	/// Hide a preview; a pinned panel stays.
	pub fn blur(&mut self) {
		if !self.is_pinned() {
			*self = PanelState::Hidden;
		}
	}
}

/// An anchor in the panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
	/// Target URL.
	pub href: String,
	/// Anchor text.
	pub text: String,
}

/// A titled row of links below the description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRow {
	/// Row heading.
	pub title: &'static str,
	/// Comma-separated in the view.
	pub links: Vec<Link>,
}

/// Everything the panel renders for one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDetails {
	/// Node label.
	pub title: String,
	/// Description or [`NO_DESCRIPTION`].
	pub description: String,
	/// Source page button.
	pub link: Option<String>,
	/// Rows for the non-empty optional fields.
	pub extra: Vec<DetailRow>,
}

impl NodeDetails {
	/// Collect the panel content for `node`.
	pub fn from_node(node: &Node) -> Self {
		let mut extra = Vec::new();
		let mut push_plain = |title: &'static str, value: Option<&str>| {
			if let Some(v) = value {
				extra.push(DetailRow {
					title,
					links: vec![Link {
						href: v.to_owned(),
						text: v.to_owned(),
					}],
				});
			}
		};
		push_plain("ESCO link", node.esco_link());
		push_plain("ESCO match", node.esco_vaste());
		push_plain("Verb", node.skill_verb());

		if let Some(code) = node.osk_reg_kood() {
			extra.push(DetailRow {
				title: "Skills register code",
				links: vec![Link {
					href: format!("{SKILL_REGISTER_URL}{code}"),
					text: code.to_owned(),
				}],
			});
		}

		if !node.relevant_occupations.is_empty() {
			extra.push(DetailRow {
				title: "Related occupations",
				links: node
					.relevant_occupations
					.iter()
					.map(|o| Link {
						href: o.uri.clone(),
						text: if o.label.is_empty() { o.uri.clone() } else { o.label.clone() },
					})
					.collect(),
			});
		}

		Self {
			title: node.label.clone(),
			description: node.description().unwrap_or(NO_DESCRIPTION).to_owned(),
			link: node.link().map(str::to_owned),
			extra,
		}
	}
}
