//! Error types.

use thiserror::Error;

/// Message shown for every failed graph load.
pub const SKILL_NOT_FOUND: &str = "Skill not found";

/// Why a `/graph` request produced no graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	/// Non-2xx response.
	#[error("graph request returned HTTP {0}")]
	Status(u16),
	/// The request never got a response.
	#[error("graph request failed: {0}")]
	Network(String),
	/// The body was not a graph.
	#[error("could not decode graph payload: {0}")]
	Decode(String),
}

impl GraphError {
	/// The UI has one error channel and one message for it.
	pub fn user_message(&self) -> &'static str {
		SKILL_NOT_FOUND
	}
}

/// Why the page config could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Malformed JSON or a mistyped key.
	#[error("invalid configuration JSON: {0}")]
	Parse(#[from] serde_json::Error),
}
