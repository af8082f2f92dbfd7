//! Graph data model and the filters that run over it.

pub mod filter;
pub mod model;
pub mod search;
pub mod store;

pub use filter::{DepthBound, EdgeTypeToggles, NodeTypeToggles};
pub use model::{Edge, EdgeId, GraphPayload, Node, NodeId, NodeStyle, NodeType, RelationKind};
pub use store::GraphStore;
