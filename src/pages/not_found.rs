use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Nothing here"</h1>
		<p>"The emotion dome lives at " <a href="/">"/"</a></p>
	}
}
