//! Binding callbacks to tags and event patterns.

use std::sync::Arc;

use horizon_tk_core::logging::{span_names, targets};
use horizon_tk_core::{Action, Command, PerfSpan, TkError, TkResult};
use parking_lot::Mutex;

use super::is_event;
use super::key::{KeyEvent, KeyModifier, ModifierTracker};
use super::record::{Event, SUBSTITUTION_TEMPLATE};
use crate::Tk;

/// Callback type for [`Tk::bind_key_event_ex`].
pub type KeyHandler = Box<dyn Fn(&KeyEvent<'_>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindMode {
    /// Replace any existing script for the tag and pattern.
    Replace,
    /// Run after the existing script.
    Append,
}

/// Handle to a press/release key binding pair.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    press_action: String,
    release_action: String,
    tracker: Arc<Mutex<ModifierTracker>>,
}

impl KeyBinding {
    /// Action id of the `<KeyPress>` handler.
    pub fn press_action(&self) -> &str {
        &self.press_action
    }

    /// Action id of the `<KeyRelease>` handler.
    pub fn release_action(&self) -> &str {
        &self.release_action
    }

    /// The tracker's session key, which is the press action id.
    pub fn session(&self) -> String {
        self.tracker.lock().session().to_string()
    }

    /// Modifiers currently considered held.
    pub fn modifier(&self) -> KeyModifier {
        self.tracker.lock().modifier()
    }

    /// Clear stuck modifiers, e.g. after the window lost focus.
    pub fn reset(&self) {
        self.tracker.lock().reset();
    }
}

fn validate_binding(tag: &str, event: &str) -> TkResult<()> {
    if tag.is_empty() {
        return Err(TkError::invalid("binding tag is empty"));
    }
    if !is_event(event) {
        return Err(TkError::invalid(format!(
            "event pattern {event:?} is not of the form <...>"
        )));
    }
    Ok(())
}

impl Tk {
    /// Bind `f` to `event` on `tag`, replacing any existing binding for that
    /// tag and pattern. Returns the id of the registered action.
    ///
    /// Fails with [`TkError::Invalid`] without contacting the interpreter if
    /// `tag` is empty or `event` is not wrapped in angle brackets.
    pub fn bind_event<F>(&self, tag: &str, event: &str, f: F) -> TkResult<String>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.bind_event_helper(tag, event, f, BindMode::Replace)
    }

    /// Like [`bind_event`](Self::bind_event), but keeps the existing binding
    /// and runs `f` after it.
    pub fn add_bind_event<F>(&self, tag: &str, event: &str, f: F) -> TkResult<String>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.bind_event_helper(tag, event, f, BindMode::Append)
    }

    fn bind_event_helper<F>(&self, tag: &str, event: &str, f: F, mode: BindMode) -> TkResult<String>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        validate_binding(tag, event)?;
        self.bind_action(self.next_action_id(), tag, event, f, mode)
    }

    fn bind_action<F>(
        &self,
        action_id: String,
        tag: &str,
        event: &str,
        f: F,
        mode: BindMode,
    ) -> TkResult<String>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let widgets = self.shared_widgets();
        let action: Action = Arc::new(move |args: &[String]| {
            let _span = PerfSpan::new(span_names::DISPATCH);
            let event = Event::parse(args, &widgets);
            f(&event);
        });
        self.create_action(&action_id, action)?;

        let body = match mode {
            BindMode::Replace => format!("{action_id} {SUBSTITUTION_TEMPLATE}"),
            BindMode::Append => format!("+{action_id} {SUBSTITUTION_TEMPLATE}"),
        };
        self.eval(&Command::new("bind").word(tag).word(event).script(body))?;

        tracing::debug!(target: targets::EVENT, %tag, %event, action = %action_id, ?mode, "bound event");
        Ok(action_id)
    }

    /// Replace the binding for `tag` and `event` with an empty script.
    ///
    /// The previously registered action stays defined in the interpreter;
    /// it is simply no longer invoked.
    pub fn clear_bind_event(&self, tag: &str, event: &str) -> TkResult<()> {
        validate_binding(tag, event)?;
        self.eval(&Command::new("bind").word(tag).word(event).script(""))?;
        tracing::debug!(target: targets::EVENT, %tag, %event, "cleared binding");
        Ok(())
    }

    /// Event patterns currently bound on `tag`.
    ///
    /// Returns an empty list for an empty tag or if the query fails.
    pub fn bind_info(&self, tag: &str) -> Vec<String> {
        if tag.is_empty() {
            return Vec::new();
        }
        self.eval_list(&Command::new("bind").word(tag))
            .unwrap_or_else(|err| {
                tracing::warn!(target: targets::EVENT, %tag, error = %err, "bind info failed");
                Vec::new()
            })
    }

    /// Bind key press and release handlers on `tag` that share modifier
    /// state.
    ///
    /// Pressing a key whose symbol starts with `Shift_`, `Control_`, `Alt_`,
    /// `Meta_` or `Super_` sets the matching [`KeyModifier`] before
    /// `on_press` runs. Releasing it clears the modifier after `on_release`
    /// runs, so the release handler still sees it held.
    pub fn bind_key_event_ex(
        &self,
        tag: &str,
        on_press: Option<KeyHandler>,
        on_release: Option<KeyHandler>,
    ) -> TkResult<KeyBinding> {
        validate_binding(tag, "<KeyPress>")?;
        let press_action = self.next_action_id();
        let tracker = Arc::new(Mutex::new(ModifierTracker::new(press_action.as_str())));

        let press_tracker = tracker.clone();
        let press_action = self.bind_action(
            press_action,
            tag,
            "<KeyPress>",
            move |event: &Event| {
                let modifier = press_tracker.lock().press(&event.key_sym);
                if let Some(f) = &on_press {
                    f(&KeyEvent::new(event, modifier));
                }
            },
            BindMode::Replace,
        )?;

        let release_tracker = tracker.clone();
        let release_action = self.bind_event(tag, "<KeyRelease>", move |event| {
            let modifier = release_tracker.lock().modifier();
            if let Some(f) = &on_release {
                f(&KeyEvent::new(event, modifier));
            }
            release_tracker.lock().release(&event.key_sym);
        })?;

        Ok(KeyBinding {
            press_action,
            release_action,
            tracker,
        })
    }
}
