//! Composition root: dataset, lattice layout, graph index and live view state
//! behind one owner, with the renderer and audio collaborators plugged in at
//! narrow seams.

use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::{DataIntegrityWarning, EngineError};
use super::graph::GraphIndex;
use super::lattice::geodesic_vertices;
use super::layout::{Layout, place};
use super::model::{CategoryFilter, EmotionNode, EmotionSeed, NodeId};
use super::resolve::{EdgePatch, HighlightConfig, HighlightFrame, NodePatch, resolve};
use super::search::find_matches;
use super::state::{DEFAULT_HISTORY_LIMIT, Event, InteractionMachine, ViewState};

/// Knobs for building and running the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct DomeConfig {
	/// Sphere radius the lattice is projected onto.
	pub radius: f32,
	/// Icosahedron subdivision level for the vertex pool.
	pub detail: u32,
	/// Fixed layout seed; `None` draws from entropy.
	pub seed: Option<u64>,
	/// Undo ring capacity; 0 disables undo.
	pub history_limit: usize,
	/// Quiet period before a keystroke becomes a search.
	pub search_debounce_ms: f64,
	/// Opacity levels and tints handed to the resolver.
	pub highlight: HighlightConfig,
}

impl Default for DomeConfig {
	fn default() -> Self {
		Self {
			radius: 6.0,
			detail: 2,
			seed: None,
			history_limit: DEFAULT_HISTORY_LIMIT,
			search_debounce_ms: 300.0,
			highlight: HighlightConfig::default(),
		}
	}
}

/// Receives layout and highlight updates. Implemented by the drawing side.
pub trait RenderSink {
	/// Called once with the final node positions.
	fn on_layout_ready(&mut self, layout: &Layout);
	/// Called after every effective state change, with one patch per node and edge.
	fn on_highlight_update(&mut self, nodes: &[NodePatch], edges: &[EdgePatch]);
}

/// Fire-and-forget sound cues.
pub trait AudioSink {
	/// The pointer entered a node.
	fn notify_hover_enter(&mut self, id: &NodeId);
	/// A known node was clicked, repeats included.
	fn notify_click(&mut self, id: &NodeId);
}

impl RenderSink for () {
	fn on_layout_ready(&mut self, _: &Layout) {}
	fn on_highlight_update(&mut self, _: &[NodePatch], _: &[EdgePatch]) {}
}

impl AudioSink for () {
	fn notify_hover_enter(&mut self, _: &NodeId) {}
	fn notify_click(&mut self, _: &NodeId) {}
}

/// The slice of view state worth keeping between visits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedView {
	/// Stored as the bare category key.
	pub active_category: CategoryFilter,
	/// Raw query text; matches are recomputed on import.
	pub search_query: String,
}

/// Owner of everything the dome needs at runtime.
pub struct EngineContext {
	graph: GraphIndex,
	layout: Layout,
	machine: InteractionMachine,
	config: DomeConfig,
	renderer: Box<dyn RenderSink>,
	audio: Box<dyn AudioSink>,
}

impl EngineContext {
	/// Build with the configured seed, or entropy when there is none.
	pub fn build(seeds: &[EmotionSeed], config: DomeConfig) -> Result<Self, EngineError> {
		let mut rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		Self::build_with_rng(seeds, config, &mut rng)
	}

	/// Build with an injected random source, for reproducible layouts.
	pub fn build_with_rng<R: Rng>(
		seeds: &[EmotionSeed],
		config: DomeConfig,
		rng: &mut R,
	) -> Result<Self, EngineError> {
		let nodes = super::model::load_nodes(seeds)?;
		Self::from_nodes(nodes, config, rng)
	}

	/// Build from already loaded nodes.
	pub fn from_nodes<R: Rng>(
		nodes: Vec<EmotionNode>,
		config: DomeConfig,
		rng: &mut R,
	) -> Result<Self, EngineError> {
		let graph = GraphIndex::build(nodes);
		let vertices = geodesic_vertices(config.radius, config.detail);
		let layout = place(graph.nodes().iter().map(|n| &n.id), &vertices, rng)?;
		info!(
			"emotion dome: {} nodes on {} lattice vertices, {} edges, {} data warnings",
			graph.node_count(),
			vertices.len(),
			graph.edge_count(),
			graph.warnings().len()
		);

		Ok(Self {
			machine: InteractionMachine::new(config.history_limit),
			graph,
			layout,
			config,
			renderer: Box::new(()),
			audio: Box::new(()),
		})
	}

	/// Hand the layout to `renderer` and push the current highlight straight
	/// away.
	pub fn attach_renderer(&mut self, renderer: Box<dyn RenderSink>) {
		self.renderer = renderer;
		self.renderer.on_layout_ready(&self.layout);
		self.publish();
	}

	/// Replace the audio collaborator. No cue is replayed.
	pub fn attach_audio(&mut self, audio: Box<dyn AudioSink>) {
		self.audio = audio;
	}

	/// Replace the live state with a restored category and query. History is
	/// cleared; hover and selection start empty.
	pub fn seed_view(&mut self, view: PersistedView) {
		let state = ViewState {
			category: view.active_category,
			matches: find_matches(&self.graph, &view.search_query),
			query: view.search_query,
			..ViewState::default()
		};
		self.machine = InteractionMachine::with_state(state, self.config.history_limit);
		self.publish();
	}

	/// Category and query of the live view, for storage.
	pub fn export_view(&self) -> PersistedView {
		let state = self.machine.state();
		PersistedView {
			active_category: state.category,
			search_query: state.query.clone(),
		}
	}

	/// Feed one input event through the state machine. Returns whether the
	/// view changed; the renderer hears about it only when it did.
	pub fn dispatch(&mut self, event: Event) -> bool {
		let changed = self.machine.apply(&event, &self.graph);

		match &event {
			Event::PointerHover(Some(_)) if changed => {
				if let Some(id) = &self.machine.state().hovered {
					self.audio.notify_hover_enter(id);
				}
			}
			Event::PointerClick(id) if self.graph.contains(id.as_str()) => {
				self.audio.notify_click(id);
			}
			_ => {}
		}

		if changed {
			self.publish();
		} else {
			// pointer moves land here constantly
			trace!("{event:?} left the view unchanged");
		}
		changed
	}

	fn publish(&mut self) {
		let frame = self.highlight();
		self.renderer.on_highlight_update(&frame.nodes, &frame.edges);
	}

	/// Resolve the current view into patches without publishing them.
	pub fn highlight(&self) -> HighlightFrame {
		resolve(self.machine.state(), &self.graph, &self.config.highlight)
	}

	/// Live view state.
	pub fn state(&self) -> &ViewState {
		self.machine.state()
	}

	/// The immutable node and edge index.
	pub fn graph(&self) -> &GraphIndex {
		&self.graph
	}

	/// Where every node sits on the lattice.
	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	/// Configuration the engine was built with.
	pub fn config(&self) -> &DomeConfig {
		&self.config
	}

	/// Connections dropped while indexing.
	pub fn diagnostics(&self) -> &[DataIntegrityWarning] {
		self.graph.warnings()
	}

	/// The selected node, else the hovered one.
	pub fn focus_node(&self) -> Option<&EmotionNode> {
		self.state().focus().and_then(|id| self.graph.node(id.as_str()))
	}

	/// Current search matches in dataset order.
	pub fn search_results(&self) -> Vec<&EmotionNode> {
		let state = self.state();
		self.graph
			.nodes()
			.iter()
			.filter(|n| state.matches.contains(&n.id))
			.collect()
	}
}

/// Parse a stored view, falling back to defaults when it is unreadable.
pub fn decode_persisted_view(raw: &str) -> PersistedView {
	serde_json::from_str(raw).unwrap_or_else(|err| {
		warn!("ignoring stored view state: {err}");
		PersistedView::default()
	})
}

/// Serialize a view for storage.
pub fn encode_persisted_view(view: &PersistedView) -> String {
	// a struct of a string and a unit-like enum always serializes
	serde_json::to_string(view).unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::dome::model::Category;
	use crate::dome::seed::EMOTIONS;

	#[derive(Default)]
	struct Log {
		layouts: usize,
		updates: Vec<HighlightFrame>,
		hovers: Vec<NodeId>,
		clicks: Vec<NodeId>,
	}

	#[derive(Clone, Default)]
	struct Recorder(Rc<RefCell<Log>>);

	impl RenderSink for Recorder {
		fn on_layout_ready(&mut self, _: &Layout) {
			self.0.borrow_mut().layouts += 1;
		}

		fn on_highlight_update(&mut self, nodes: &[NodePatch], edges: &[EdgePatch]) {
			self.0.borrow_mut().updates.push(HighlightFrame {
				nodes: nodes.to_vec(),
				edges: edges.to_vec(),
			});
		}
	}

	impl AudioSink for Recorder {
		fn notify_hover_enter(&mut self, id: &NodeId) {
			self.0.borrow_mut().hovers.push(id.clone());
		}

		fn notify_click(&mut self, id: &NodeId) {
			self.0.borrow_mut().clicks.push(id.clone());
		}
	}

	fn engine() -> (EngineContext, Recorder) {
		let config = DomeConfig {
			seed: Some(3),
			..DomeConfig::default()
		};
		let mut engine = EngineContext::build(EMOTIONS, config).unwrap();
		let recorder = Recorder::default();
		engine.attach_renderer(Box::new(recorder.clone()));
		engine.attach_audio(Box::new(recorder.clone()));
		(engine, recorder)
	}

	#[test]
	fn attaching_a_renderer_sends_layout_then_one_frame() {
		let (dome, rec) = engine();
		let log = rec.0.borrow();
		assert_eq!(log.layouts, 1);
		assert_eq!(log.updates.len(), 1);
		assert_eq!(dome.layout().len(), 22);
	}

	#[test]
	fn renderer_only_hears_about_changes() {
		let (mut dome, rec) = engine();
		assert!(dome.dispatch(Event::PointerHover(Some(NodeId::from("joy")))));
		assert!(!dome.dispatch(Event::PointerHover(Some(NodeId::from("joy")))));
		assert_eq!(rec.0.borrow().updates.len(), 2);
		assert!(dome.dispatch(Event::Undo));
		assert!(dome.state().hovered.is_none());
		assert_eq!(rec.0.borrow().updates.len(), 3);
	}

	#[test]
	fn audio_cues_fire_on_hover_enter_and_known_clicks() {
		let (mut dome, rec) = engine();
		dome.dispatch(Event::PointerHover(Some(NodeId::from("joy"))));
		dome.dispatch(Event::PointerHover(Some(NodeId::from("joy"))));
		dome.dispatch(Event::PointerHover(None));
		dome.dispatch(Event::PointerClick(NodeId::from("love")));
		dome.dispatch(Event::PointerClick(NodeId::from("love")));
		dome.dispatch(Event::PointerClick(NodeId::from("ennui")));
		let log = rec.0.borrow();
		assert_eq!(log.hovers, vec![NodeId::from("joy")]);
		assert_eq!(log.clicks, vec![NodeId::from("love"), NodeId::from("love")]);
	}

	#[test]
	fn too_small_lattice_fails_the_build() {
		let config = DomeConfig {
			detail: 0,
			seed: Some(1),
			..DomeConfig::default()
		};
		let err = EngineContext::build(EMOTIONS, config).err();
		assert_eq!(
			err,
			Some(EngineError::LayoutCapacity {
				nodes: 22,
				vertices: 12
			})
		);
	}

	#[test]
	fn persisted_view_round_trips_category_and_query_only() {
		let (mut dome, _) = engine();
		dome.dispatch(Event::CategorySelect(CategoryFilter::Only(Category::Calm)));
		dome.dispatch(Event::SearchInput("hope".into()));
		dome.dispatch(Event::PointerClick(NodeId::from("hope")));

		let raw = encode_persisted_view(&dome.export_view());
		assert_eq!(raw, r#"{"activeCategory":"calm","searchQuery":"hope"}"#);

		let (mut fresh, _) = engine();
		fresh.seed_view(decode_persisted_view(&raw));
		assert_eq!(fresh.state().category, CategoryFilter::Only(Category::Calm));
		assert_eq!(fresh.state().query, "hope");
		assert!(fresh.state().matches.contains("hope"));
		assert_eq!(fresh.state().selected, None);
		assert!(!fresh.dispatch(Event::Undo));
	}

	#[test]
	fn corrupt_stored_view_falls_back_to_defaults() {
		assert_eq!(decode_persisted_view("{not json"), PersistedView::default());
		assert_eq!(
			decode_persisted_view(r#"{"activeCategory":"rage"}"#),
			PersistedView::default()
		);
		assert_eq!(
			decode_persisted_view(r#"{"searchQuery":"calm"}"#).search_query,
			"calm"
		);
	}

	/// Records log lines per thread so parallel tests do not see each other.
	struct Capture(std::sync::Mutex<Vec<(std::thread::ThreadId, log::Level, String)>>);

	impl log::Log for Capture {
		fn enabled(&self, _: &log::Metadata<'_>) -> bool {
			true
		}

		fn log(&self, record: &log::Record<'_>) {
			if let Ok(mut lines) = self.0.lock() {
				lines.push((std::thread::current().id(), record.level(), record.args().to_string()));
			}
		}

		fn flush(&self) {}
	}

	static CAPTURE: Capture = Capture(std::sync::Mutex::new(Vec::new()));

	#[test]
	fn pointer_moves_over_the_same_node_stay_quiet_at_debug() {
		let _ = log::set_logger(&CAPTURE);
		log::set_max_level(log::LevelFilter::Trace);
		let (mut dome, _) = engine();
		dome.dispatch(Event::PointerHover(Some(NodeId::from("joy"))));

		let me = std::thread::current().id();
		CAPTURE.0.lock().unwrap().retain(|(thread, _, _)| *thread != me);
		for _ in 0..10 {
			assert!(!dome.dispatch(Event::PointerHover(Some(NodeId::from("joy")))));
		}

		let lines = CAPTURE.0.lock().unwrap();
		let mine: Vec<_> = lines.iter().filter(|(thread, _, _)| *thread == me).collect();
		assert!(mine.iter().all(|(_, level, _)| *level == log::Level::Trace), "{mine:?}");
	}
}
