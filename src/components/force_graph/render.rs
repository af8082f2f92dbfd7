use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NodeFrame};

const BACKGROUND: &str = "#ffffff";
const LABEL_COLOR: &str = "#5c5c5c";
const LABEL_SIZE: f64 = 14.0;
const EDGE_LABEL_SIZE: f64 = 11.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	let frames = state.frames();
	draw_edges(state, ctx, &frames);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	frames: &std::collections::HashMap<force_graph::DefaultNodeIdx, NodeFrame>,
) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k.max(0.5), 6.0, 4.0, 8.0);
	let t = ease_out_cubic(state.hover.highlight_t);

	for edge in &state.edges {
		if edge.info.hidden {
			continue;
		}
		let (Some(a), Some(b)) = (frames.get(&edge.src), frames.get(&edge.tgt)) else {
			continue;
		};
		// never draw an edge whose endpoint is hidden
		if a.hidden || b.hidden {
			continue;
		}
		let (dx, dy) = (b.x - a.x, b.y - a.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < a.radius + b.radius {
			continue;
		}

		let touches_hover = state.is_hovered(edge.src) || state.is_hovered(edge.tgt);
		let (color, width) = if touches_hover && t > 0.01 {
			(edge.info.highlight.as_str(), line_width * (1.0 + 0.5 * t))
		} else {
			(edge.info.color.as_str(), line_width)
		};

		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		if edge.info.dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(a.x + ux * a.radius, a.y + uy * a.radius);
		ctx.line_to(
			b.x - ux * (b.radius + arrow_size),
			b.y - uy * (b.radius + arrow_size),
		);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(color);
		let (tip_x, tip_y) = (b.x - ux * b.radius, b.y - uy * b.radius);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if !edge.info.label.is_empty() {
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font(&format!("{}px sans-serif", EDGE_LABEL_SIZE));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(&edge.info.label, (a.x + b.x) / 2.0, (a.y + b.y) / 2.0 - 3.0);
			ctx.set_text_align("start");
		}
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);
	let k = state.transform.k;

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if info.hidden {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let hovered = state.is_hovered(node.index()) && t > 0.01;
		let style = &info.style;
		let (fill, border) = if hovered {
			(&style.highlight_background, &style.highlight_border)
		} else {
			(&style.background, &style.border)
		};
		let radius = if hovered {
			info.radius * (1.0 + 0.15 * t)
		} else {
			info.radius
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_stroke_style_str(border);
		ctx.set_line_width((style.border_width * 2.0).max(0.5) / k.max(0.5));
		ctx.stroke();

		if !info.label.is_empty() {
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font(&format!("{}px sans-serif", LABEL_SIZE));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(&info.label, x, y + radius + LABEL_SIZE);
			ctx.set_text_align("start");
		}
	});
}
