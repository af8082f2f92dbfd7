//! Runtime configuration.
//!
//! Read once at start-up from an optional JSON block in the host page:
//!
//! ```html
//! <script type="application/json" id="competency-graph-config">
//!   { "graph_endpoint": "/api/graph", "max_depth": 3 }
//! </script>
//! ```
//!
//! Missing keys keep their defaults.

use force_graph::SimulationParameters;
use log::Level;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::graph::DepthBound;

/// Id of the `<script>` element holding the JSON config.
pub const CONFIG_ELEMENT_ID: &str = "competency-graph-config";

/// Settings read from the host page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Path or URL answering `GET ?skill=<term>`.
	pub graph_endpoint: String,
	/// Forwarded as `limit_recursion=true&max_depth=<n>` when set.
	pub max_depth: Option<u32>,
	/// Most suggestions listed while typing.
	pub suggestion_limit: usize,
	/// Most nodes listed in the dropdown before anything is typed.
	pub dropdown_limit: usize,
	/// Depth selected at start-up.
	pub default_level: DepthBound,
	/// Zoom reached when focusing a node.
	pub focus_scale: f64,
	/// Length of the focus animation.
	pub focus_duration_ms: f64,
	/// Layout simulation settings.
	pub physics: PhysicsConfig,
	/// `log` level name; unknown names mean `debug`.
	pub log_level: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			graph_endpoint: "/graph".into(),
			max_depth: None,
			suggestion_limit: 30,
			dropdown_limit: 200,
			default_level: DepthBound::Unbounded,
			focus_scale: 1.2,
			focus_duration_ms: 800.0,
			physics: PhysicsConfig::default(),
			log_level: "debug".into(),
		}
	}
}

/// Knobs passed straight to the layout simulation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
	/// Node repulsion.
	pub force_charge: f32,
	/// Edge spring stiffness.
	pub force_spring: f32,
	/// Cap on the force applied per step.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity kept per step.
	pub damping_factor: f32,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			force_charge: 450.0,
			force_spring: 0.05,
			force_max: 140.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

impl PhysicsConfig {
	/// Convert to the simulation's own parameter type.
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

impl AppConfig {
	/// Parse a JSON object; missing keys keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Load from the config element, or defaults when the page has none.
	pub fn from_document() -> Result<Self, ConfigError> {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content());
		match text {
			Some(json) if !json.trim().is_empty() => Self::from_json(&json),
			_ => Ok(Self::default()),
		}
	}

	/// Configured level, falling back to `Debug` on anything unparseable.
	pub fn log_level(&self) -> Level {
		self.log_level.parse().unwrap_or(Level::Debug)
	}

	/// Query string pairs for a graph request.
	pub fn graph_query(&self, skill: &str) -> Vec<(&'static str, String)> {
		let mut params = vec![("skill", skill.trim().to_string())];
		if let Some(depth) = self.max_depth {
			params.push(("limit_recursion", "true".into()));
			params.push(("max_depth", depth.to_string()));
		}
		params
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config =
			AppConfig::from_json(r#"{"graph_endpoint":"/api/graph","default_level":2}"#).unwrap();
		assert_eq!(config.graph_endpoint, "/api/graph");
		assert_eq!(config.default_level, DepthBound::Hops(2));
		assert_eq!(config.suggestion_limit, 30);
		assert_eq!(config.dropdown_limit, 200);
		assert_eq!(config.physics, PhysicsConfig::default());
	}

	#[test]
	fn level_99_means_everything() {
		let config = AppConfig::from_json(r#"{"default_level":99}"#).unwrap();
		assert_eq!(config.default_level, DepthBound::Unbounded);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(matches!(
			AppConfig::from_json("{not json"),
			Err(ConfigError::Parse(_))
		));
	}

	#[test]
	fn log_level_falls_back_to_debug() {
		let mut config = AppConfig::default();
		config.log_level = "warn".into();
		assert_eq!(config.log_level(), Level::Warn);
		config.log_level = "loud".into();
		assert_eq!(config.log_level(), Level::Debug);
	}

	#[test]
	fn depth_limit_is_forwarded() {
		let mut config = AppConfig::default();
		assert_eq!(config.graph_query(" Java "), vec![("skill", "Java".to_string())]);
		config.max_depth = Some(3);
		assert_eq!(
			config.graph_query(""),
			vec![
				("skill", String::new()),
				("limit_recursion", "true".to_string()),
				("max_depth", "3".to_string()),
			]
		);
	}
}
