//! Event bindings.
//!
//! Callbacks are attached to a *tag* (a widget path, a widget class or
//! `all`) and an event pattern. When the interpreter sees a matching event it
//! calls the registered action with the fields listed in
//! [`SUBSTITUTION_TEMPLATE`]; the action parses them into an [`Event`] and
//! runs the callback synchronously on the event loop thread.
//!
//! # Patterns
//!
//! A physical event pattern is any string wrapped in `<...>`, such as
//! `<Button-1>` or `<Control-Key-s>`. A virtual event is wrapped in
//! `<<...>>`, such as `<<Paste>>`, and fires whenever one of the physical
//! sequences mapped to it occurs (see [`Tk::add_virtual_event`](crate::Tk::add_virtual_event)).
//!
//! ```
//! use horizon_tk::event::{is_event, is_virtual_event};
//!
//! assert!(is_event("<Button-1>"));
//! assert!(!is_event("Button-1"));
//! assert!(is_virtual_event("<<Paste>>"));
//! assert!(!is_virtual_event("<Paste>"));
//! ```

mod bind;
mod key;
mod record;
mod send;
mod virtual_event;

pub use bind::{KeyBinding, KeyHandler};
pub use key::{KeyEvent, KeyModifier, ModifierTracker};
pub use record::{Event, EventKind, FIELD_COUNT, SUBSTITUTION_TEMPLATE};
pub use send::EventAttr;

/// Whether `event` has the bracket form of an event pattern, `<...>`.
///
/// Virtual events (`<<...>>`) also satisfy this check.
pub fn is_event(event: &str) -> bool {
    event.starts_with('<') && event.ends_with('>')
}

/// Whether `event` has the bracket form of a virtual event, `<<...>>`.
pub fn is_virtual_event(event: &str) -> bool {
    event.starts_with("<<") && event.ends_with(">>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_event() {
        assert!(is_event("<Button-1>"));
        assert!(is_event("<KeyPress>"));
        assert!(is_event("<<Paste>>"));
        assert!(!is_event("Button-1"));
        assert!(!is_event("<Button-1"));
        assert!(!is_event("Button-1>"));
        assert!(!is_event(""));
    }

    #[test]
    fn test_is_virtual_event() {
        assert!(is_virtual_event("<<Paste>>"));
        assert!(!is_virtual_event("<Paste>"));
        assert!(!is_virtual_event("<<Paste>"));
        assert!(!is_virtual_event("<Paste>>"));
        assert!(!is_virtual_event(""));
    }
}
