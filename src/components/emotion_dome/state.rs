use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::dome::graph::GraphIndex;
use crate::dome::lattice::Point3;
use crate::dome::layout::Layout;
use crate::dome::{EdgePatch, NodeId, NodePatch, RenderSink, Rgb};

pub const NODE_RADIUS: f64 = 9.0;
pub const HIT_RADIUS: f64 = 14.0;
pub const CAMERA_DISTANCE: f64 = 15.0;
const FIELD_OF_VIEW: f64 = 75.0;
const AUTO_ROTATE_SPEED: f64 = 0.15;
const DRAG_ROTATE_SPEED: f64 = 0.008;
const CLICK_SLOP: f64 = 4.0;
// opacity tweens settle in roughly a third of a second
const EASE_RATE: f64 = 9.0;

/// A value easing towards its target every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Eased {
	pub value: f64,
	pub target: f64,
}

impl Eased {
	fn settled(v: f64) -> Self {
		Self {
			value: v,
			target: v,
		}
	}

	fn step(&mut self, dt: f64) {
		self.value += (self.target - self.value) * (EASE_RATE * dt).min(1.0);
		if (self.target - self.value).abs() < 0.002 {
			self.value = self.target;
		}
	}
}

#[derive(Clone, Debug)]
pub struct SceneNode {
	pub id: NodeId,
	pub label: String,
	pub color: Rgb,
	pub base: Point3,
	pub opacity: Eased,
	pub label_opacity: Eased,
	pub focused: bool,
}

#[derive(Clone, Debug)]
pub struct SceneEdge {
	pub from: usize,
	pub to: usize,
	pub opacity: Eased,
	pub tint: Rgb,
	pub emphasized: bool,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub yaw_start: f64,
	pub pitch_start: f64,
}

/// Screen-space placement of a scene point.
#[derive(Clone, Copy, Debug)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Perspective size multiplier, 1.0 at the dome's centre depth.
	pub scale: f64,
	pub depth: f64,
}

pub struct DomeCanvasState {
	pub nodes: Vec<SceneNode>,
	pub edges: Vec<SceneEdge>,
	index: HashMap<NodeId, usize>,
	pub yaw: f64,
	pub pitch: f64,
	pub zoom: f64,
	pub drag: DragState,
	pub width: f64,
	pub height: f64,
	pub auto_rotate: bool,
	pub flow_time: f64,
}

impl DomeCanvasState {
	pub fn new(graph: &GraphIndex, width: f64, height: f64) -> Self {
		let nodes: Vec<SceneNode> = graph
			.nodes()
			.iter()
			.map(|n| SceneNode {
				id: n.id.clone(),
				label: n.name.clone(),
				color: n.color,
				base: Point3::default(),
				opacity: Eased::settled(1.0),
				label_opacity: Eased::settled(0.9),
				focused: false,
			})
			.collect();
		let index: HashMap<NodeId, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		let edges = graph
			.edges()
			.iter()
			.filter_map(|e| {
				Some(SceneEdge {
					from: *index.get(&e.from)?,
					to: *index.get(&e.to)?,
					opacity: Eased::settled(0.3),
					tint: Rgb::WHITE,
					emphasized: false,
				})
			})
			.collect();

		Self {
			nodes,
			edges,
			index,
			yaw: 0.0,
			pitch: 0.25,
			zoom: 1.0,
			drag: DragState::default(),
			width,
			height,
			auto_rotate: true,
			flow_time: 0.0,
		}
	}

	pub fn apply_layout(&mut self, layout: &Layout) {
		for (id, position) in layout.iter() {
			if let Some(&i) = self.index.get(id) {
				self.nodes[i].base = position;
			}
		}
	}

	pub fn apply_highlight(&mut self, nodes: &[NodePatch], edges: &[EdgePatch]) {
		for patch in nodes {
			let Some(&i) = self.index.get(&patch.id) else {
				continue;
			};
			let node = &mut self.nodes[i];
			node.opacity.target = patch.opacity as f64;
			node.label_opacity.target = patch.label_opacity as f64;
			node.focused = patch.focused;
		}
		// patches arrive in graph edge order, same as ours
		for (edge, patch) in self.edges.iter_mut().zip(edges) {
			edge.opacity.target = patch.opacity as f64;
			edge.tint = patch.tint;
			edge.emphasized = patch.emphasized;
		}
	}

	/// Node position this frame, including the idle float.
	pub fn animated_position(&self, i: usize) -> Point3 {
		let base = self.nodes[i].base;
		let bob = (self.flow_time * 0.5 + i as f64).sin() * 0.1;
		Point3::new(base.x, base.y + bob as f32, base.z)
	}

	fn focal_length(&self) -> f64 {
		let half_fov = (FIELD_OF_VIEW / 2.0).to_radians();
		self.height / 2.0 / half_fov.tan() * self.zoom
	}

	pub fn project(&self, p: Point3) -> Projected {
		let (x, y, z) = (p.x as f64, p.y as f64, p.z as f64);
		let (sy, cy) = self.yaw.sin_cos();
		let (x1, z1) = (x * cy + z * sy, -x * sy + z * cy);
		let (sp, cp) = self.pitch.sin_cos();
		let (y2, z2) = (y * cp - z1 * sp, y * sp + z1 * cp);

		let depth = (CAMERA_DISTANCE - z2).max(0.1);
		let f = self.focal_length();
		Projected {
			x: self.width / 2.0 + x1 * f / depth,
			y: self.height / 2.0 - y2 * f / depth,
			scale: CAMERA_DISTANCE / depth,
			depth,
		}
	}

	/// Front-most node under the pointer, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let mut found: Option<(usize, f64)> = None;
		for i in 0..self.nodes.len() {
			let p = self.project(self.animated_position(i));
			let (dx, dy) = (p.x - sx, p.y - sy);
			// HIT_RADIUS scales with perspective like the nodes do
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS * p.scale
				&& found.is_none_or(|(_, depth)| p.depth < depth)
			{
				found = Some((i, p.depth));
			}
		}
		found.map(|(i, _)| self.nodes[i].id.clone())
	}

	pub fn begin_drag(&mut self, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			yaw_start: self.yaw,
			pitch_start: self.pitch,
		};
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
		if !self.drag.moved && dx.hypot(dy) < CLICK_SLOP {
			return;
		}
		self.drag.moved = true;
		self.yaw = self.drag.yaw_start + dx * DRAG_ROTATE_SPEED;
		self.pitch = (self.drag.pitch_start + dy * DRAG_ROTATE_SPEED).clamp(-1.4, 1.4);
	}

	/// Ends the drag; true when it never moved far enough to count as one.
	pub fn end_drag(&mut self) -> bool {
		let was_click = self.drag.active && !self.drag.moved;
		self.drag = DragState::default();
		was_click
	}

	pub fn zoom_by(&mut self, factor: f64) {
		self.zoom = (self.zoom * factor).clamp(0.5, 2.5);
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
		if self.auto_rotate && !self.drag.active {
			self.yaw += AUTO_ROTATE_SPEED * dt;
		}
		for node in &mut self.nodes {
			node.opacity.step(dt);
			node.label_opacity.step(dt);
		}
		for edge in &mut self.edges {
			edge.opacity.step(dt);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// The engine's renderer seam, writing into shared canvas state.
pub struct CanvasSink(pub Rc<RefCell<DomeCanvasState>>);

impl RenderSink for CanvasSink {
	fn on_layout_ready(&mut self, layout: &Layout) {
		self.0.borrow_mut().apply_layout(layout);
	}

	fn on_highlight_update(&mut self, nodes: &[NodePatch], edges: &[EdgePatch]) {
		self.0.borrow_mut().apply_highlight(nodes, edges);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::dome::lattice::geodesic_vertices;
	use crate::dome::layout::place;
	use crate::dome::model::load_nodes;
	use crate::dome::resolve::{HighlightConfig, resolve};
	use crate::dome::seed::EMOTIONS;
	use crate::dome::state::ViewState;

	fn scene() -> (GraphIndex, DomeCanvasState) {
		let graph = GraphIndex::build(load_nodes(EMOTIONS).unwrap());
		let vertices = geodesic_vertices(6.0, 2);
		let layout = place(
			graph.nodes().iter().map(|n| &n.id),
			&vertices,
			&mut StdRng::seed_from_u64(9),
		)
		.unwrap();
		let mut state = DomeCanvasState::new(&graph, 800.0, 600.0);
		state.apply_layout(&layout);
		(graph, state)
	}

	#[test]
	fn origin_projects_to_the_centre() {
		let (_, state) = scene();
		let p = state.project(Point3::default());
		assert!((p.x - 400.0).abs() < 1e-9 && (p.y - 300.0).abs() < 1e-9);
		assert!((p.scale - 1.0).abs() < 1e-9);
	}

	#[test]
	fn hit_test_finds_the_node_drawn_there() {
		let (_, state) = scene();
		let nearest = (0..state.nodes.len())
			.min_by(|&a, &b| {
				let da = state.project(state.animated_position(a)).depth;
				let db = state.project(state.animated_position(b)).depth;
				da.total_cmp(&db)
			})
			.unwrap();
		let p = state.project(state.animated_position(nearest));
		assert_eq!(state.node_at_position(p.x, p.y), Some(state.nodes[nearest].id.clone()));
		assert_eq!(state.node_at_position(-500.0, -500.0), None);
	}

	#[test]
	fn opacity_eases_to_the_patch_targets() {
		let (graph, mut state) = scene();
		let focus = ViewState {
			selected: Some(NodeId::from("joy")),
			query: "grat".into(),
			matches: [NodeId::from("gratitude")].into(),
			..ViewState::default()
		};
		let frame = resolve(&focus, &graph, &HighlightConfig::default());
		state.apply_highlight(&frame.nodes, &frame.edges);
		for _ in 0..120 {
			state.tick(1.0 / 60.0);
		}
		let anger = state.nodes.iter().find(|n| n.id.as_str() == "anger").unwrap();
		assert_eq!(anger.opacity.value, 0.2f32 as f64);
		assert!(state.edges.iter().filter(|e| e.emphasized).count() > 0);
	}

	#[test]
	fn a_short_press_is_a_click() {
		let (_, mut state) = scene();
		state.begin_drag(10.0, 10.0);
		state.drag_to(11.0, 12.0);
		assert!(state.end_drag());
		state.begin_drag(10.0, 10.0);
		state.drag_to(60.0, 10.0);
		assert!(!state.end_drag());
	}
}
