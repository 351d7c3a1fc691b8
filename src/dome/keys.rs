//! Keyboard shortcuts, as `KeyboardEvent.code` strings.

use super::model::CategoryFilter;
use super::state::Event;

/// Translate a `KeyboardEvent.code` into an engine event.
///
/// `command` is Ctrl on most platforms and Meta on macOS. Keys that only
/// drive the chrome (fullscreen, sound, help) are not the engine's business
/// and map to `None`.
pub fn shortcut(code: &str, command: bool) -> Option<Event> {
	let event = match code {
		"Escape" => Event::PointerClickEmpty,
		"KeyR" if !command => Event::Reset,
		"KeyZ" if command => Event::Undo,
		"ArrowLeft" => Event::CycleCategory(-1),
		"ArrowRight" => Event::CycleCategory(1),
		_ => {
			let digit = code.strip_prefix("Digit")?.parse::<usize>().ok()?;
			let filter = CategoryFilter::CYCLE.get(digit.checked_sub(1)?)?;
			Event::CategorySelect(*filter)
		}
	};
	Some(event)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dome::model::Category;

	#[test]
	fn digits_pick_categories_in_cycle_order() {
		assert_eq!(shortcut("Digit1", false), Some(Event::CategorySelect(CategoryFilter::All)));
		assert_eq!(
			shortcut("Digit7", false),
			Some(Event::CategorySelect(CategoryFilter::Only(Category::Calm)))
		);
		assert_eq!(shortcut("Digit0", false), None);
		assert_eq!(shortcut("Digit8", false), None);
	}

	#[test]
	fn undo_needs_the_command_modifier() {
		assert_eq!(shortcut("KeyZ", true), Some(Event::Undo));
		assert_eq!(shortcut("KeyZ", false), None);
		// ctrl+r is the browser's reload, leave it be
		assert_eq!(shortcut("KeyR", true), None);
	}

	#[test]
	fn chrome_keys_are_ignored() {
		for code in ["Space", "KeyF", "KeyS", "KeyH", "Slash"] {
			assert_eq!(shortcut(code, false), None, "{code}");
		}
	}
}
