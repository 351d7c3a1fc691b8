use leptos::prelude::*;
use log::error;

use crate::components::emotion_dome::EmotionDomeCanvas;
use crate::dome::seed::EMOTIONS;
use crate::dome::{DomeConfig, EngineContext};

/// Builds the engine from the bundled emotions. A failed build surfaces
/// through the surrounding error boundary instead of a blank canvas.
#[component]
fn Dome() -> impl IntoView {
	EngineContext::build(EMOTIONS, DomeConfig::default())
		.inspect_err(|err| error!("emotion dome failed to build: {err}"))
		.map(|engine| view! { <EmotionDomeCanvas engine=engine fullscreen=true /> })
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"The emotion dome could not be built"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-dome">
				<Dome />
				<div class="dome-overlay">
					<h1>"Geodesic Emotion Dome"</h1>
					<p class="subtitle">
						"Hover or click an emotion to trace its connections. Drag to rotate, scroll to zoom."
					</p>
					<p class="shortcuts">
						"Esc clear · 1-7 category · ←/→ cycle · / search · R reset · Ctrl+Z undo · Space pause"
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
