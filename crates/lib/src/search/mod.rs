//! Search screen model: what the search list shows and how user intents turn into actions.
//!
//! Rendering is left to the UI; this module decides sections, item keys, scroll targets
//! and navigation, and dispatches through the [`Dispatcher`](crate::actions::Dispatcher).

mod screen;
mod sections;

pub use screen::{Effect, SearchScreen};
pub use sections::{
    apply_modifier, build_sections, modifiers, results_scroll_offset, should_scroll_to_results,
    Modifier, Placeholder, SearchItem, Section, SectionKey, MODIFIER_LABEL_HEIGHT,
    RECENT_LABEL_HEIGHT, RECENT_SEPARATOR_HEIGHT, SECTION_HEIGHT,
};
