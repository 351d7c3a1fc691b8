//! Pure `ViewState × GraphIndex → visual directives`.
//!
//! Nothing here animates or draws. The renderer eases towards these targets
//! at whatever cadence it likes; calling [`resolve`] twice on the same input
//! gives the same frame.

use super::graph::GraphIndex;
use super::model::{NodeId, Rgb};
use super::state::ViewState;

/// Opacity levels and tints used by [`resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightConfig {
	/// Node opacity when it passes the filters or has focus.
	pub node_full: f32,
	/// Node opacity when filtered out.
	pub node_dimmed: f32,
	/// Label opacity when lit.
	pub label_full: f32,
	/// Label opacity when dimmed.
	pub label_dimmed: f32,
	/// Edge opacity with no focus node.
	pub edge_ambient: f32,
	/// Opacity of edges touching the focus node.
	pub edge_emphasized: f32,
	/// Opacity of every other edge while something has focus.
	pub edge_background: f32,
	/// Tint of edges not touching the focus node.
	pub edge_ambient_tint: Rgb,
}

impl Default for HighlightConfig {
	fn default() -> Self {
		Self {
			node_full: 1.0,
			node_dimmed: 0.2,
			label_full: 0.9,
			label_dimmed: 0.2,
			edge_ambient: 0.3,
			edge_emphasized: 0.8,
			edge_background: 0.1,
			edge_ambient_tint: Rgb::WHITE,
		}
	}
}

/// Visual directive for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePatch {
	/// Node the patch applies to.
	pub id: NodeId,
	/// Target node opacity.
	pub opacity: f32,
	/// Target label opacity.
	pub label_opacity: f32,
	/// Whether this node is the focus node.
	pub focused: bool,
}

/// Visual directive for one edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePatch {
	/// Declaring endpoint.
	pub from: NodeId,
	/// Other endpoint.
	pub to: NodeId,
	/// Target edge opacity.
	pub opacity: f32,
	/// The focus node's color when emphasized, else the ambient tint.
	pub tint: Rgb,
	/// Whether the edge touches the focus node.
	pub emphasized: bool,
}

/// One patch per node and per edge, in graph order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightFrame {
	/// Node patches.
	pub nodes: Vec<NodePatch>,
	/// Edge patches.
	pub edges: Vec<EdgePatch>,
}

impl HighlightFrame {
	/// Patch for `id`.
	pub fn node(&self, id: &str) -> Option<&NodePatch> {
		self.nodes.iter().find(|p| p.id.as_str() == id)
	}

	/// Edges touching the focus node.
	pub fn emphasized_edges(&self) -> impl Iterator<Item = &EdgePatch> {
		self.edges.iter().filter(|e| e.emphasized)
	}
}

/// Turn a view state into per-node and per-edge directives. Pure.
pub fn resolve(state: &ViewState, graph: &GraphIndex, config: &HighlightConfig) -> HighlightFrame {
	let focus = state.focus().and_then(|id| graph.node(id.as_str()));

	let nodes = graph
		.nodes()
		.iter()
		.map(|node| {
			let focused = focus.is_some_and(|f| f.id == node.id);
			let lit = focused || state.passes_filters(node);
			NodePatch {
				id: node.id.clone(),
				opacity: if lit { config.node_full } else { config.node_dimmed },
				label_opacity: if lit { config.label_full } else { config.label_dimmed },
				focused,
			}
		})
		.collect();

	let edges = graph
		.edges()
		.iter()
		.map(|edge| {
			let (opacity, tint, emphasized) = match focus {
				Some(f) if edge.touches(f.id.as_str()) => (config.edge_emphasized, f.color, true),
				Some(_) => (config.edge_background, config.edge_ambient_tint, false),
				None => (config.edge_ambient, config.edge_ambient_tint, false),
			};
			EdgePatch {
				from: edge.from.clone(),
				to: edge.to.clone(),
				opacity,
				tint,
				emphasized,
			}
		})
		.collect();

	HighlightFrame { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dome::model::{Category, CategoryFilter, load_nodes};
	use crate::dome::search::find_matches;
	use crate::dome::seed::EMOTIONS;

	fn graph() -> GraphIndex {
		GraphIndex::build(load_nodes(EMOTIONS).unwrap())
	}

	#[test]
	fn idle_state_is_all_ambient() {
		let g = graph();
		let cfg = HighlightConfig::default();
		let frame = resolve(&ViewState::default(), &g, &cfg);
		assert!(frame.nodes.iter().all(|n| n.opacity == cfg.node_full && !n.focused));
		assert!(frame.edges.iter().all(|e| e.opacity == cfg.edge_ambient && e.tint == Rgb::WHITE));
	}

	#[test]
	fn category_mask_dims_other_families() {
		let g = graph();
		let cfg = HighlightConfig::default();
		let state = ViewState {
			category: CategoryFilter::Only(Category::Anger),
			..ViewState::default()
		};
		let frame = resolve(&state, &g, &cfg);
		assert_eq!(frame.node("joy").unwrap().opacity, cfg.node_dimmed);
		assert_eq!(frame.node("joy").unwrap().label_opacity, cfg.label_dimmed);
		assert_eq!(frame.node("anger").unwrap().opacity, cfg.node_full);
	}

	#[test]
	fn focused_node_overrides_both_masks() {
		let g = graph();
		let cfg = HighlightConfig::default();
		let state = ViewState {
			selected: Some(NodeId::from("joy")),
			category: CategoryFilter::Only(Category::Fear),
			query: "valiant".into(),
			matches: find_matches(&g, "valiant"),
			..ViewState::default()
		};
		let frame = resolve(&state, &g, &cfg);
		let joy = frame.node("joy").unwrap();
		assert!(joy.focused);
		assert_eq!(joy.opacity, cfg.node_full);
		// courage matches the query but not the category
		assert_eq!(frame.node("courage").unwrap().opacity, cfg.node_dimmed);
	}

	#[test]
	fn hover_focus_tints_touching_edges() {
		let g = graph();
		let cfg = HighlightConfig::default();
		let state = ViewState {
			hovered: Some(NodeId::from("courage")),
			..ViewState::default()
		};
		let frame = resolve(&state, &g, &cfg);
		let courage = g.node("courage").unwrap().color;
		let lit: Vec<_> = frame.emphasized_edges().collect();
		assert_eq!(lit.len(), g.neighbors("courage").count());
		assert!(lit.iter().all(|e| e.tint == courage && e.opacity == cfg.edge_emphasized));
		assert!(
			frame
				.edges
				.iter()
				.filter(|e| !e.emphasized)
				.all(|e| e.opacity == cfg.edge_background)
		);
	}

	#[test]
	fn stale_focus_id_resolves_to_no_focus() {
		let g = graph();
		let state = ViewState {
			selected: Some(NodeId::from("ennui")),
			..ViewState::default()
		};
		let frame = resolve(&state, &g, &HighlightConfig::default());
		assert!(frame.nodes.iter().all(|n| !n.focused));
		assert_eq!(frame.emphasized_edges().count(), 0);
	}
}
