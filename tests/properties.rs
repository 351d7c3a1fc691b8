//! Property checks for layout, adjacency and the interaction machine.

use std::collections::HashSet;

use emotion_dome::dome::graph::GraphIndex;
use emotion_dome::dome::lattice::{Point3, geodesic_vertices};
use emotion_dome::dome::layout::place;
use emotion_dome::dome::model::load_nodes;
use emotion_dome::dome::seed::EMOTIONS;
use emotion_dome::dome::state::{InteractionMachine, transition};
use emotion_dome::dome::{Category, CategoryFilter, EmotionNode, Event, NodeId, Rgb};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn node(i: usize, connections: Vec<NodeId>) -> EmotionNode {
	EmotionNode {
		id: NodeId::from(format!("n{i}")),
		name: format!("n{i}"),
		category: Category::ALL[i % Category::ALL.len()],
		color: Rgb::WHITE,
		description: String::new(),
		quote: String::new(),
		strength_percent: 50,
		keywords: Vec::new(),
		connections,
	}
}

/// Random nodes `n0..n{count}` whose connections may point at themselves or
/// at ids that do not exist.
fn arb_graph() -> impl Strategy<Value = GraphIndex> {
	(1usize..12).prop_flat_map(|count| {
		prop::collection::vec(prop::collection::vec(0usize..count + 3, 0..5), count).prop_map(
			|targets| {
				let nodes = targets
					.into_iter()
					.enumerate()
					.map(|(i, ts)| node(i, ts.into_iter().map(|t| NodeId::from(format!("n{t}"))).collect()))
					.collect();
				GraphIndex::build(nodes)
			},
		)
	})
}

fn seed_graph() -> GraphIndex {
	GraphIndex::build(load_nodes(EMOTIONS).unwrap())
}

fn arb_id() -> impl Strategy<Value = NodeId> {
	prop_oneof![
		prop::sample::select(EMOTIONS.iter().map(|s| s.id).collect::<Vec<_>>()),
		Just("ennui"),
	]
	.prop_map(NodeId::from)
}

fn arb_event() -> impl Strategy<Value = Event> {
	prop_oneof![
		prop::option::of(arb_id()).prop_map(Event::PointerHover),
		arb_id().prop_map(Event::PointerClick),
		Just(Event::PointerClickEmpty),
		prop::sample::select(CategoryFilter::CYCLE.to_vec()).prop_map(Event::CategorySelect),
		(-8isize..8).prop_map(Event::CycleCategory),
		prop::sample::select(vec!["", "grat", "JOY", "fear", "zz", "a"])
			.prop_map(|q| Event::SearchInput(q.to_owned())),
		Just(Event::SubmitSearch),
		Just(Event::Undo),
		Just(Event::Reset),
	]
}

proptest! {
	#[test]
	fn layout_never_shares_a_vertex(seed in any::<u64>(), detail in 0u32..3, take in 0usize..=22) {
		let graph = seed_graph();
		let vertices = geodesic_vertices(6.0, detail);
		let ids: Vec<&NodeId> = graph.nodes().iter().map(|n| &n.id).take(take).collect();
		let result = place(ids.iter().copied(), &vertices, &mut StdRng::seed_from_u64(seed));

		if take > vertices.len() {
			prop_assert!(result.is_err());
		} else {
			let layout = result.unwrap();
			prop_assert_eq!(layout.len(), take);
			let mut seen: Vec<Point3> = Vec::new();
			for (_, p) in layout.iter() {
				prop_assert!(vertices.contains(&p));
				prop_assert!(seen.iter().all(|q| q.distance(p) > 1e-4));
				seen.push(p);
			}
		}
	}

	#[test]
	fn adjacency_is_symmetric_and_loop_free(graph in arb_graph()) {
		let declares = |a: &NodeId, b: &NodeId| {
			graph.node(a.as_str()).is_some_and(|n| n.connections.contains(b))
		};
		for node in graph.nodes() {
			for other in graph.neighbors(node.id.as_str()) {
				prop_assert_ne!(other, &node.id);
				prop_assert!(graph.contains(other.as_str()));
				prop_assert!(graph.are_neighbors(other.as_str(), node.id.as_str()));
				// every neighbor pair traces back to a declaration on one side
				prop_assert!(declares(&node.id, other) || declares(other, &node.id));
			}
			// and every valid declaration shows up, from both ends
			for target in &node.connections {
				if *target != node.id && graph.contains(target.as_str()) {
					prop_assert!(graph.are_neighbors(node.id.as_str(), target.as_str()));
					prop_assert!(graph.are_neighbors(target.as_str(), node.id.as_str()));
				}
			}
		}
		let pairs: HashSet<(&str, &str)> = graph
			.edges()
			.iter()
			.map(|e| {
				let (a, b) = (e.from.as_str(), e.to.as_str());
				if a < b { (a, b) } else { (b, a) }
			})
			.collect();
		prop_assert_eq!(pairs.len(), graph.edge_count());
	}

	#[test]
	fn repeated_events_settle(events in prop::collection::vec(arb_event(), 0..20), last in arb_event()) {
		let graph = seed_graph();
		let mut machine = InteractionMachine::default();
		for event in &events {
			machine.apply(event, &graph);
		}
		if !matches!(last, Event::Undo | Event::CycleCategory(_)) {
			let once = transition(machine.state(), &last, &graph);
			let twice = transition(&once, &last, &graph);
			prop_assert_eq!(once, twice);
		}
	}

	#[test]
	fn undo_reverts_the_last_change(events in prop::collection::vec(arb_event(), 0..20), next in arb_event()) {
		let graph = seed_graph();
		let mut machine = InteractionMachine::default();
		for event in &events {
			machine.apply(event, &graph);
		}
		prop_assume!(next != Event::Undo);
		let before = machine.state().clone();
		if machine.apply(&next, &graph) {
			prop_assert!(machine.apply(&Event::Undo, &graph));
			prop_assert_eq!(machine.state(), &before);
		} else {
			prop_assert_eq!(machine.state(), &before);
		}
	}

	#[test]
	fn state_only_names_known_nodes(events in prop::collection::vec(arb_event(), 0..30)) {
		let graph = seed_graph();
		let mut machine = InteractionMachine::default();
		for event in &events {
			machine.apply(event, &graph);
			let state = machine.state();
			prop_assert!(state.hovered.iter().chain(state.selected.iter()).all(|id| graph.contains(id.as_str())));
			prop_assert!(state.matches.iter().all(|id| graph.contains(id.as_str())));
			prop_assert!(state.has_query() || state.matches.is_empty());
		}
	}

	#[test]
	fn cycling_there_and_back_is_identity(start in prop::sample::select(CategoryFilter::CYCLE.to_vec()), step in -20isize..20) {
		prop_assert_eq!(start.cycled(step).cycled(-step), start);
	}
}
