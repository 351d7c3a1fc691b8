use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent,
	WheelEvent, Window,
};

use super::render;
use super::state::{CanvasSink, DomeCanvasState};
use crate::dome::engine::{decode_persisted_view, encode_persisted_view};
use crate::dome::keys::shortcut;
use crate::dome::search::SearchDebounce;
use crate::dome::{
	AudioSink, CategoryFilter, EmotionNode, EngineContext, Event, NodeId, PersistedView,
};

const VIEW_STORAGE_KEY: &str = "emotionDomeView";

#[derive(Clone, Debug, PartialEq)]
struct PanelInfo {
	name: String,
	category: &'static str,
	strength: u8,
	description: String,
	quote: String,
	color: String,
	neighbors: Vec<String>,
}

impl PanelInfo {
	fn new(node: &EmotionNode, engine: &EngineContext) -> Self {
		let graph = engine.graph();
		Self {
			name: node.name.clone(),
			category: node.category.label(),
			strength: node.strength_percent,
			description: node.description.clone(),
			quote: node.quote.clone(),
			color: node.color.css(1.0),
			neighbors: graph
				.neighbors(node.id.as_str())
				.filter_map(|id| graph.node(id.as_str()))
				.map(|n| n.name.clone())
				.collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
struct ResultRow {
	id: NodeId,
	name: String,
	category: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct SearchSummary {
	active: bool,
	rows: Vec<ResultRow>,
}

/// Write ends of everything the sidebar and info panel render from.
#[derive(Clone, Copy)]
struct UiSignals {
	panel: WriteSignal<Option<PanelInfo>>,
	category: WriteSignal<CategoryFilter>,
	search: WriteSignal<SearchSummary>,
	query: WriteSignal<String>,
}

impl UiSignals {
	fn sync(self, engine: &EngineContext, echo_query: bool) {
		let state = engine.state();
		self.panel.set(engine.focus_node().map(|n| PanelInfo::new(n, engine)));
		self.category.set(state.category);
		self.search.set(SearchSummary {
			active: state.has_query(),
			rows: engine
				.search_results()
				.into_iter()
				.map(|n| ResultRow {
					id: n.id.clone(),
					name: n.name.clone(),
					category: n.category.key(),
				})
				.collect(),
		});
		// leave the box alone while the user is the one typing into it
		if echo_query {
			self.query.set(state.query.clone());
		}
	}
}

/// Engine plus the boundary bits around it: search debounce and persistence.
struct Dome {
	engine: EngineContext,
	debounce: SearchDebounce,
	saved: PersistedView,
	ui: UiSignals,
}

impl Dome {
	fn dispatch(&mut self, event: Event) {
		self.debounce.discard_stale(&event);
		let echo_query = !matches!(event, Event::SearchInput(_));
		if !self.engine.dispatch(event) {
			return;
		}
		self.ui.sync(&self.engine, echo_query);
		let view = self.engine.export_view();
		if view != self.saved {
			save_view(&view);
			self.saved = view;
		}
	}

	fn poll_search(&mut self, now: f64) {
		if let Some(text) = self.debounce.poll(now) {
			self.dispatch(Event::SearchInput(text));
		}
	}

	fn submit_search(&mut self) {
		if let Some(text) = self.debounce.flush() {
			self.dispatch(Event::SearchInput(text));
		}
		self.dispatch(Event::SubmitSearch);
	}
}

/// Sound is someone else's job; leave a trace so cues can be checked.
struct ConsoleChime;

impl AudioSink for ConsoleChime {
	fn notify_hover_enter(&mut self, id: &NodeId) {
		debug!("hover cue: {id}");
	}

	fn notify_click(&mut self, id: &NodeId) {
		debug!("click cue: {id}");
	}
}

fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or_else(js_sys::Date::now)
}

fn load_view() -> Option<PersistedView> {
	let storage = web_sys::window()?.local_storage().ok()??;
	let raw = storage.get_item(VIEW_STORAGE_KEY).ok()??;
	Some(decode_persisted_view(&raw))
}

fn save_view(view: &PersistedView) {
	let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
		return;
	};
	let _ = storage.set_item(VIEW_STORAGE_KEY, &encode_persisted_view(view));
}

fn viewport_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn typing_in_field(ev: &KeyboardEvent) -> bool {
	ev.target()
		.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
		.is_some()
}

#[component]
pub fn EmotionDomeCanvas(
	engine: EngineContext,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let search_ref = NodeRef::<leptos::html::Input>::new();
	let (panel, set_panel) = signal(None::<PanelInfo>);
	let (category, set_category) = signal(CategoryFilter::All);
	let (search, set_search) = signal(SearchSummary::default());
	let (query, set_query) = signal(String::new());
	// clicks from reactive views land here and are dispatched by one effect
	let (intent, set_intent) = signal(None::<Event>);
	let ui = UiSignals {
		panel: set_panel,
		category: set_category,
		search: set_search,
		query: set_query,
	};

	let (node_count, edge_count, warning_count) = (
		engine.graph().node_count(),
		engine.graph().edge_count(),
		engine.diagnostics().len(),
	);
	let scene = Rc::new(RefCell::new(DomeCanvasState::new(
		engine.graph(),
		width.unwrap_or(800.0),
		height.unwrap_or(600.0),
	)));

	let mut engine = engine;
	if let Some(view) = load_view() {
		engine.seed_view(view);
	}
	engine.attach_renderer(Box::new(CanvasSink(scene.clone())));
	engine.attach_audio(Box::new(ConsoleChime));
	ui.sync(&engine, true);
	let dome = Rc::new(RefCell::new(Dome {
		debounce: SearchDebounce::new(engine.config().search_debounce_ms),
		saved: engine.export_view(),
		engine,
		ui,
	}));

	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (scene_init, dome_init, animate_init, resize_cb_init, keydown_init) = (
		scene.clone(),
		dome.clone(),
		animate.clone(),
		resize_cb.clone(),
		keydown_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		scene_init.borrow_mut().resize(w, h);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};

		if fullscreen {
			let (scene_resize, canvas_resize) = (scene_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				scene_resize.borrow_mut().resize(nw, nh);
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (scene_keys, dome_keys) = (scene_init.clone(), dome_init.clone());
		*keydown_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if typing_in_field(&ev) {
				return;
			}
			let code = ev.code();
			match code.as_str() {
				"Space" => {
					ev.prevent_default();
					let mut s = scene_keys.borrow_mut();
					s.auto_rotate = !s.auto_rotate;
				}
				"Slash" => {
					ev.prevent_default();
					if let Some(input) = search_ref.get() {
						let _ = input.focus();
					}
				}
				_ => {
					let Some(event) = shortcut(&code, ev.ctrl_key() || ev.meta_key()) else {
						return;
					};
					if event == Event::Undo {
						ev.prevent_default();
					}
					dome_keys.borrow_mut().dispatch(event);
				}
			}
		}));
		if let Some(ref cb) = *keydown_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (scene_anim, dome_anim, animate_inner) =
			(scene_init.clone(), dome_init.clone(), animate_init.clone());
		let mut last = now_ms();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = now_ms();
			let dt = ((now - last) / 1000.0).clamp(0.0, 0.1);
			last = now;
			// the debounce timer fires here, as a plain searchInput event
			dome_anim.borrow_mut().poll_search(now);
			{
				let mut s = scene_anim.borrow_mut();
				s.tick(dt);
				render::render(&s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let dome_intent = dome.clone();
	Effect::new(move |_| {
		if let Some(event) = intent.get() {
			dome_intent.borrow_mut().dispatch(event);
		}
	});

	let scene_md = scene.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		scene_md.borrow_mut().begin_drag(x, y);
	};

	let (scene_mm, dome_mm) = (scene.clone(), dome.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let hovered = {
			let mut s = scene_mm.borrow_mut();
			if s.drag.active {
				s.drag_to(x, y);
				if s.drag.moved {
					return;
				}
			}
			s.node_at_position(x, y)
		};
		dome_mm.borrow_mut().dispatch(Event::PointerHover(hovered));
	};

	let (scene_mu, dome_mu) = (scene.clone(), dome.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let clicked = {
			let mut s = scene_mu.borrow_mut();
			if !s.end_drag() {
				return;
			}
			let Some((x, y)) = pointer(canvas_ref, &ev) else {
				return;
			};
			s.node_at_position(x, y)
		};
		let event = match clicked {
			Some(id) => Event::PointerClick(id),
			None => Event::PointerClickEmpty,
		};
		dome_mu.borrow_mut().dispatch(event);
	};

	let (scene_ml, dome_ml) = (scene.clone(), dome.clone());
	let on_mouseleave = move |_: MouseEvent| {
		scene_ml.borrow_mut().end_drag();
		dome_ml.borrow_mut().dispatch(Event::PointerHover(None));
	};

	let scene_wh = scene.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		scene_wh.borrow_mut().zoom_by(factor);
	};

	let dome_input = dome.clone();
	let on_search_input = move |ev: web_sys::Event| {
		let text = event_target_value(&ev);
		dome_input.borrow_mut().debounce.push(text, now_ms());
	};

	let dome_enter = dome.clone();
	let on_search_key = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			dome_enter.borrow_mut().submit_search();
		}
	};

	let category_buttons = CategoryFilter::CYCLE
		.into_iter()
		.map(|filter| {
			let dome = dome.clone();
			view! {
				<button
					class="emotion-category"
					class:active=move || category.get() == filter
					on:click=move |_| dome.borrow_mut().dispatch(Event::CategorySelect(filter))
				>
					{filter.label()}
				</button>
			}
		})
		.collect_view();

	let (dome_undo, dome_reset) = (dome.clone(), dome.clone());

	view! {
		<div class="emotion-dome">
			<canvas
				node_ref=canvas_ref
				class="emotion-dome-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<aside class="dome-sidebar">
				<input
					node_ref=search_ref
					id="emotionSearch"
					type="search"
					placeholder="Search emotions (/)"
					prop:value=move || query.get()
					on:input=on_search_input
					on:keydown=on_search_key
				/>
				<div class="search-results">
					{move || {
						let summary = search.get();
						(summary.active && summary.rows.is_empty())
							.then(|| view! { <p class="no-results">"No emotions found"</p> })
					}}
					{move || {
						let rows = search.get().rows;
						let count = rows.len();
						(count > 0)
							.then(|| {
								let items = rows
									.into_iter()
									.map(|row| {
										let id = row.id;
										view! {
											<div
												class="result-item"
												on:click=move |_| {
													set_intent.set(Some(Event::PointerClick(id.clone())))
												}
											>
												<span class="result-name">{row.name}</span>
												<span class="result-category">{row.category}</span>
											</div>
										}
									})
									.collect_view();
								let plural = if count > 1 { "s" } else { "" };
								view! {
									<p class="results-count">{format!("{count} emotion{plural} found")}</p>
									<div class="results-list">{items}</div>
								}
							})
					}}
				</div>
				<nav class="emotion-categories">{category_buttons}</nav>
				<p class="active-category">"Showing: " {move || category.get().label()}</p>
				<div class="dome-stats">
					<span>{node_count} " emotions"</span>
					<span>{edge_count} " connections"</span>
					{(warning_count > 0)
						.then(|| view! { <span class="data-warnings">{warning_count} " data warnings"</span> })}
				</div>
				<div class="dome-actions">
					<button on:click=move |_| dome_undo.borrow_mut().dispatch(Event::Undo)>"Undo"</button>
					<button on:click=move |_| dome_reset.borrow_mut().dispatch(Event::Reset)>"Reset view"</button>
				</div>
			</aside>
			{move || {
				panel
					.get()
					.map(|info| {
						let PanelInfo { name, category, strength, description, quote, color, neighbors } = info;
						let connections = format!("{} connections", neighbors.len());
						let tags = neighbors
							.into_iter()
							.map(|n| view! { <span class="connection-tag">{n}</span> })
							.collect_view();
						view! {
							<section class="info-panel visible" style=format!("border-color: {color}")>
								<button
									class="close-info"
									on:click=move |_| set_intent.set(Some(Event::PointerClickEmpty))
								>
									"×"
								</button>
								<h2>{name}</h2>
								<p class="emotion-meta">{category} " · " {format!("{strength}%")}</p>
								<p class="emotion-desc">{description}</p>
								<blockquote>{quote}</blockquote>
								<p class="connection-count">{connections}</p>
								<div class="connections-list">{tags}</div>
							</section>
						}
					})
			}}
		</div>
	}
}
