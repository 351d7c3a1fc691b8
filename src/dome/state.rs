//! The interaction state machine.
//!
//! Every input resolves to an [`Event`]; [`transition`] maps the current
//! [`ViewState`] and an event to the next state without touching anything
//! else. [`InteractionMachine`] owns the live state and the bounded undo
//! history, and is the only place a `ViewState` is ever replaced.

use std::collections::{BTreeSet, VecDeque};

use log::debug;

use super::graph::GraphIndex;
use super::model::{CategoryFilter, EmotionNode, NodeId};
use super::search::find_matches;

/// Default capacity of the undo ring.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Everything that decides what the dome currently looks like.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
	/// Node under the pointer.
	pub hovered: Option<NodeId>,
	/// Node the user clicked.
	pub selected: Option<NodeId>,
	/// Active category filter.
	pub category: CategoryFilter,
	/// Current search text, possibly empty.
	pub query: String,
	/// Ids matching `query`.
	pub matches: BTreeSet<NodeId>,
}

impl ViewState {
	/// Selection wins over hover.
	pub fn focus(&self) -> Option<&NodeId> {
		self.selected.as_ref().or(self.hovered.as_ref())
	}

	/// Whether a non-empty search is active.
	pub fn has_query(&self) -> bool {
		!self.query.is_empty()
	}

	/// Whether `node` survives both the category and the search mask.
	pub fn passes_filters(&self, node: &EmotionNode) -> bool {
		self.category.admits(node.category) && (!self.has_query() || self.matches.contains(&node.id))
	}
}

/// Input events understood by the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
	/// Pointer moved onto a node, or off all of them.
	PointerHover(Option<NodeId>),
	/// Click on a node.
	PointerClick(NodeId),
	/// Click that hit no node.
	PointerClickEmpty,
	/// Pick a category filter directly.
	CategorySelect(CategoryFilter),
	/// Move through [`CategoryFilter::CYCLE`] by this many steps.
	CycleCategory(isize),
	/// Already debounced.
	SearchInput(String),
	/// Select the first match in dataset order.
	SubmitSearch,
	/// Restore the state before the last change.
	Undo,
	/// Back to the default view.
	Reset,
}

fn known(id: &NodeId, graph: &GraphIndex) -> Option<NodeId> {
	graph.contains(id.as_str()).then(|| id.clone())
}

/// Next state for `event`. Total: ids the graph does not know are treated as
/// "no node". `Undo` needs history and is left to the machine, so here it
/// returns the state unchanged.
pub fn transition(state: &ViewState, event: &Event, graph: &GraphIndex) -> ViewState {
	let mut next = state.clone();
	match event {
		Event::PointerHover(id) => {
			next.hovered = id.as_ref().and_then(|id| known(id, graph));
		}
		Event::PointerClick(id) => {
			next.selected = known(id, graph);
		}
		Event::PointerClickEmpty => {
			next.selected = None;
		}
		Event::CategorySelect(filter) => {
			next.category = *filter;
		}
		Event::CycleCategory(step) => {
			next.category = state.category.cycled(*step);
		}
		Event::SearchInput(text) => {
			next.matches = find_matches(graph, text);
			next.query = text.clone();
		}
		Event::SubmitSearch => {
			if let Some(first) = graph.nodes().iter().find(|n| state.matches.contains(&n.id)) {
				next.selected = Some(first.id.clone());
			}
		}
		Event::Undo => {}
		Event::Reset => {
			next = ViewState::default();
		}
	}
	next
}

/// Owner of the live [`ViewState`] and its undo ring.
#[derive(Clone, Debug)]
pub struct InteractionMachine {
	state: ViewState,
	history: VecDeque<ViewState>,
	limit: usize,
}

impl Default for InteractionMachine {
	fn default() -> Self {
		Self::new(DEFAULT_HISTORY_LIMIT)
	}
}

impl InteractionMachine {
	/// Empty machine with an undo ring of `limit` entries.
	pub fn new(limit: usize) -> Self {
		Self::with_state(ViewState::default(), limit)
	}

	/// Start from `state` with an empty history.
	pub fn with_state(state: ViewState, limit: usize) -> Self {
		Self {
			state,
			history: VecDeque::with_capacity(limit),
			limit,
		}
	}

	/// Current view state.
	pub fn state(&self) -> &ViewState {
		&self.state
	}

	/// Number of states that `Undo` can step back through.
	pub fn history_len(&self) -> usize {
		self.history.len()
	}

	/// Apply `event`; returns whether the observable state changed.
	///
	/// Only changing transitions are recorded, so `Undo` always steps back
	/// over the last one that did something.
	pub fn apply(&mut self, event: &Event, graph: &GraphIndex) -> bool {
		if let Event::Undo = event {
			let Some(previous) = self.history.pop_back() else {
				debug!("undo with empty history");
				return false;
			};
			let changed = previous != self.state;
			self.state = previous;
			return changed;
		}

		let next = transition(&self.state, event, graph);
		if next == self.state {
			return false;
		}
		debug!("{event:?} -> {next:?}");
		if self.limit > 0 {
			if self.history.len() == self.limit {
				self.history.pop_front();
			}
			self.history.push_back(std::mem::replace(&mut self.state, next));
		} else {
			self.state = next;
		}
		true
	}
}
