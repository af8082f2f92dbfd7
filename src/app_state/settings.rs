use crate::graph::{DepthBound, EdgeTypeToggles, NodeTypeToggles};

/// Everything the filter panel controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterSettings {
	/// Depth select.
	pub level: DepthBound,
	/// "Prerequisites only" checkbox.
	pub prerequisites_only: bool,
	/// Node category checkboxes.
	pub node_types: NodeTypeToggles,
	/// Relation checkboxes.
	pub edge_types: EdgeTypeToggles,
}

impl FilterSettings {
	/// Defaults with the given depth.
	pub fn with_level(level: DepthBound) -> Self {
		Self {
			level,
			..Self::default()
		}
	}
}
