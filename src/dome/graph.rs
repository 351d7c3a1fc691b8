//! Adjacency over the validated node list, built once.

use std::collections::{BTreeSet, HashMap, HashSet};

use log::warn;

use super::error::DataIntegrityWarning;
use super::model::{Category, EmotionNode, NodeId};

/// An undirected relationship between two nodes.
///
/// `from` is the node that declared the connection first; for highlighting the
/// direction does not matter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Node that declared the connection.
	pub from: NodeId,
	/// Node it points at.
	pub to: NodeId,
	/// Category of `from`.
	pub from_category: Category,
	/// Category of `to`.
	pub to_category: Category,
}

impl Edge {
	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: &str) -> bool {
		self.from.as_str() == id || self.to.as_str() == id
	}
}

/// Id lookup, deduplicated edges and symmetric adjacency over the nodes.
#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
	nodes: Vec<EmotionNode>,
	by_id: HashMap<NodeId, usize>,
	edges: Vec<Edge>,
	neighbors: HashMap<NodeId, BTreeSet<NodeId>>,
	warnings: Vec<DataIntegrityWarning>,
}

impl GraphIndex {
	/// Index `nodes` (ids must already be unique).
	///
	/// Dangling and self connections never become edges; each one is logged
	/// and kept in [`GraphIndex::warnings`].
	pub fn build(nodes: Vec<EmotionNode>) -> Self {
		let by_id: HashMap<NodeId, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		debug_assert_eq!(by_id.len(), nodes.len(), "node ids must be unique");

		let mut edges = Vec::new();
		let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
		let mut neighbors: HashMap<NodeId, BTreeSet<NodeId>> = nodes
			.iter()
			.map(|n| (n.id.clone(), BTreeSet::new()))
			.collect();
		let mut warnings = Vec::new();

		for node in &nodes {
			for target in &node.connections {
				if *target == node.id {
					warnings.push(DataIntegrityWarning::SelfConnection(node.id.clone()));
					continue;
				}
				let Some(&ti) = by_id.get(target) else {
					warnings.push(DataIntegrityWarning::DanglingConnection {
						from: node.id.clone(),
						to: target.clone(),
					});
					continue;
				};
				let key = if node.id < *target {
					(node.id.clone(), target.clone())
				} else {
					(target.clone(), node.id.clone())
				};
				if !seen.insert(key) {
					continue;
				}
				edges.push(Edge {
					from: node.id.clone(),
					to: target.clone(),
					from_category: node.category,
					to_category: nodes[ti].category,
				});
				if let Some(set) = neighbors.get_mut(&node.id) {
					set.insert(target.clone());
				}
				if let Some(set) = neighbors.get_mut(target) {
					set.insert(node.id.clone());
				}
			}
		}

		for warning in &warnings {
			warn!("dropped connection: {warning}");
		}

		Self {
			nodes,
			by_id,
			edges,
			neighbors,
			warnings,
		}
	}

	/// Look a node up by id.
	pub fn node(&self, id: &str) -> Option<&EmotionNode> {
		self.by_id.get(id).map(|&i| &self.nodes[i])
	}

	/// Whether `id` is a declared node.
	pub fn contains(&self, id: &str) -> bool {
		self.by_id.contains_key(id)
	}

	/// Nodes in dataset order.
	pub fn nodes(&self) -> &[EmotionNode] {
		&self.nodes
	}

	/// Deduplicated edges, in declaration order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Everything sharing an edge with `id`, whichever side declared it.
	pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a NodeId> + use<'a> {
		self.neighbors.get(id).into_iter().flatten()
	}

	/// Whether `a` and `b` share an edge, in either direction.
	pub fn are_neighbors(&self, a: &str, b: &str) -> bool {
		self.neighbors.get(a).is_some_and(|set| set.contains(b))
	}

	/// Connections that were dropped while building.
	pub fn warnings(&self) -> &[DataIntegrityWarning] {
		&self.warnings
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of distinct edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}
}
