use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{DomeCanvasState, NODE_RADIUS, Projected};
use crate::dome::lattice::Point3;

pub fn render(state: &DomeCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#0a0e27");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let projected: Vec<Projected> = (0..state.nodes.len())
		.map(|i| state.project(state.animated_position(i)))
		.collect();
	draw_edges(state, ctx, &projected);
	draw_nodes(state, ctx, &projected);
}

fn draw_edges(state: &DomeCanvasState, ctx: &CanvasRenderingContext2d, projected: &[Projected]) {
	let (dash, gap) = (8.0, 4.0);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	for edge in &state.edges {
		let (a, b) = (
			state.animated_position(edge.from),
			state.animated_position(edge.to),
		);
		// arc through the midpoint lifted one unit, like a dome rib
		let mid = state.project(Point3::new(
			(a.x + b.x) / 2.0,
			(a.y + b.y) / 2.0 + 1.0,
			(a.z + b.z) / 2.0,
		));
		let (pa, pb) = (projected[edge.from], projected[edge.to]);
		let (cx, cy) = (
			2.0 * mid.x - (pa.x + pb.x) / 2.0,
			2.0 * mid.y - (pa.y + pb.y) / 2.0,
		);

		ctx.set_stroke_style_str(&edge.tint.css(edge.opacity.value));
		if edge.emphasized {
			ctx.set_line_width(2.0);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			ctx.set_line_width(1.0);
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}
		ctx.begin_path();
		ctx.move_to(pa.x, pa.y);
		ctx.quadratic_curve_to(cx, cy, pb.x, pb.y);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &DomeCanvasState, ctx: &CanvasRenderingContext2d, projected: &[Projected]) {
	// far side first so near nodes paint over it
	let mut order: Vec<usize> = (0..state.nodes.len()).collect();
	order.sort_by(|&a, &b| projected[b].depth.total_cmp(&projected[a].depth));

	for i in order {
		let node = &state.nodes[i];
		let p = projected[i];
		let radius = NODE_RADIUS * p.scale * if node.focused { 1.3 } else { 1.0 };
		let alpha = node.opacity.value;

		ctx.set_global_alpha(alpha);
		// glow
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius * 1.25, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color.css(0.3));
		ctx.fill();

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color.css(1.0));
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if node.focused {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius + 3.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		let label_alpha = node.label_opacity.value;
		if label_alpha > 0.01 {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {label_alpha:.3})"));
			ctx.set_font(&format!("bold {:.0}px Inter, sans-serif", 12.0 * p.scale));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(&node.label, p.x, p.y - radius - 6.0);
		}
	}
}
