//! Build failures and data-integrity warnings.

use thiserror::Error;

use super::model::NodeId;

/// Failures that stop the dome from being built at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
	/// The lattice is too small to give every node its own vertex.
	#[error("lattice has {vertices} vertices but {nodes} nodes need a place")]
	LayoutCapacity {
		/// Nodes waiting for a position.
		nodes: usize,
		/// Distinct vertices on offer.
		vertices: usize,
	},
	/// Two seed rows share an id.
	#[error("node id `{0}` is declared more than once")]
	DuplicateNode(NodeId),
	/// A seed row has an empty id.
	#[error("a node was declared with an empty id")]
	EmptyNodeId,
}

/// Recoverable problems in the seed data. The offending edge is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityWarning {
	/// `to` is not a declared node.
	#[error("`{from}` connects to unknown node `{to}`")]
	DanglingConnection {
		/// Node that declared the connection.
		from: NodeId,
		/// The missing target.
		to: NodeId,
	},
	/// A node lists its own id.
	#[error("`{0}` lists itself as a connection")]
	SelfConnection(NodeId),
}
