//! Text search over emotions, plus the debounce that feeds it.

use std::collections::BTreeSet;

use super::graph::GraphIndex;
use super::model::{EmotionNode, NodeId};
use super::state::Event;

/// Case-insensitive substring match over name, description, keywords and
/// category. An empty query matches nothing.
pub fn matches_query(node: &EmotionNode, query: &str) -> bool {
	if query.is_empty() {
		return false;
	}
	let needle = query.to_lowercase();
	node.name.to_lowercase().contains(&needle)
		|| node.description.to_lowercase().contains(&needle)
		|| node.keywords.iter().any(|k| k.to_lowercase().contains(&needle))
		|| node.category.key().contains(&needle)
}

/// Ids of every node matching `query`.
pub fn find_matches(graph: &GraphIndex, query: &str) -> BTreeSet<NodeId> {
	graph
		.nodes()
		.iter()
		.filter(|n| matches_query(n, query))
		.map(|n| n.id.clone())
		.collect()
}

/// Cancel-and-replace debounce for the search box.
///
/// Time is whatever monotonic millisecond clock the caller has
/// (`performance.now()` in the browser). At most one query is pending; a new
/// keystroke replaces it and pushes the deadline back.
#[derive(Clone, Debug)]
pub struct SearchDebounce {
	delay_ms: f64,
	pending: Option<(String, f64)>,
}

impl SearchDebounce {
	/// Debounce that waits `delay_ms` after the last keystroke.
	pub fn new(delay_ms: f64) -> Self {
		Self {
			delay_ms,
			pending: None,
		}
	}

	/// Replace any pending query; the deadline restarts at `now_ms`.
	pub fn push(&mut self, text: impl Into<String>, now_ms: f64) {
		self.pending = Some((text.into(), now_ms + self.delay_ms));
	}

	/// The pending query, once its deadline has passed.
	pub fn poll(&mut self, now_ms: f64) -> Option<String> {
		let due = self
			.pending
			.as_ref()
			.is_some_and(|(_, deadline)| *deadline <= now_ms);
		if due { self.flush() } else { None }
	}

	/// The pending query right away, deadline or not.
	pub fn flush(&mut self) -> Option<String> {
		self.pending.take().map(|(text, _)| text)
	}

	/// Drop the pending query.
	pub fn cancel(&mut self) {
		self.pending = None;
	}

	/// Drop a pending query that `event` is about to overwrite. `Reset` and
	/// `Undo` rewrite the query themselves, and a late keystroke landing after
	/// them would undo their work.
	pub fn discard_stale(&mut self, event: &Event) {
		if matches!(event, Event::Reset | Event::Undo) {
			self.cancel();
		}
	}

	/// Whether a query is waiting for its deadline.
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}
}
