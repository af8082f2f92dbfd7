//! Client for the graph endpoint.

use gloo_net::http::Request;
use log::debug;

use crate::config::AppConfig;
use crate::error::GraphError;
use crate::graph::GraphPayload;

/// `GET <graph_endpoint>?skill=<term>`. Any non-2xx status is a failure.
pub async fn fetch_graph(config: &AppConfig, skill: &str) -> Result<GraphPayload, GraphError> {
	let params = config.graph_query(skill);
	debug!("fetching graph for {skill:?}");

	let response = Request::get(&config.graph_endpoint)
		.query(params.iter().map(|(k, v)| (*k, v.as_str())))
		.send()
		.await
		.map_err(|e| GraphError::Network(e.to_string()))?;

	if !response.ok() {
		return Err(GraphError::Status(response.status()));
	}

	response
		.json::<GraphPayload>()
		.await
		.map_err(|e| GraphError::Decode(e.to_string()))
}
