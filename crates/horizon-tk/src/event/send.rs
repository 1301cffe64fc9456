//! Event injection.

use std::fmt;

use horizon_tk_core::logging::targets;
use horizon_tk_core::{Command, TkError, TkResult, WidgetId};

use super::is_event;
use crate::Tk;

/// An `event generate` option, such as `-x` or `-data`.
///
/// Keys and values are passed through to the interpreter unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAttr {
    key: String,
    value: String,
}

impl EventAttr {
    /// An arbitrary option `-key value`.
    pub fn native(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }

    /// `-data`: the user data delivered to virtual event handlers as `%d`.
    pub fn data(value: impl fmt::Display) -> Self {
        Self::native("data", value)
    }

    /// `-x`: pointer x relative to the target window.
    pub fn x(x: i32) -> Self {
        Self::native("x", x)
    }

    /// `-y`: pointer y relative to the target window.
    pub fn y(y: i32) -> Self {
        Self::native("y", y)
    }

    /// `-when`: `now`, `tail`, `head` or `mark`.
    pub fn when(when: impl fmt::Display) -> Self {
        Self::native("when", when)
    }

    /// The option name, without the leading dash.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The option value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Tk {
    /// Generate `event` on a registered widget.
    ///
    /// Fails with [`TkError::Invalid`] if the widget is not registered or
    /// the event is not wrapped in angle brackets.
    pub fn send_event(&self, widget: WidgetId, event: &str, attrs: &[EventAttr]) -> TkResult<()> {
        let Some(target) = self.widgets().resolve(widget) else {
            return Err(TkError::invalid(format!("widget {widget:?} is not registered")));
        };
        self.generate_event(Command::new("event").word("generate").word(target.path()), event, attrs)
    }

    /// Generate `event` on whichever widget has input focus.
    pub fn send_event_to_focus(&self, event: &str, attrs: &[EventAttr]) -> TkResult<()> {
        self.generate_event(Command::new("event").word("generate").raw("[focus]"), event, attrs)
    }

    fn generate_event(&self, cmd: Command, event: &str, attrs: &[EventAttr]) -> TkResult<()> {
        if !is_event(event) {
            return Err(TkError::invalid(format!(
                "event pattern {event:?} is not of the form <...>"
            )));
        }
        let cmd = attrs
            .iter()
            .fold(cmd.word(event), |cmd, attr| cmd.option(attr.key.as_str(), &attr.value));
        self.eval(&cmd)?;
        tracing::trace!(target: targets::EVENT, %event, attrs = attrs.len(), "generated event");
        Ok(())
    }
}
