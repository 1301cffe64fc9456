//! Virtual event definitions.

use horizon_tk_core::logging::targets;
use horizon_tk_core::{Command, TkError, TkResult};

use super::is_virtual_event;
use crate::Tk;

fn validate_virtual(virtual_event: &str) -> TkResult<()> {
    if is_virtual_event(virtual_event) {
        Ok(())
    } else {
        Err(TkError::invalid(format!(
            "virtual event {virtual_event:?} is not of the form <<...>>"
        )))
    }
}

impl Tk {
    /// Make `virtual_event` fire whenever any of `sequences` occurs.
    ///
    /// Sequences are added to those already associated with the virtual
    /// event; adding a sequence twice has no further effect.
    pub fn add_virtual_event(&self, virtual_event: &str, sequences: &[&str]) -> TkResult<()> {
        validate_virtual(virtual_event)?;
        if sequences.is_empty() {
            return Err(TkError::invalid(format!(
                "no physical sequences given for {virtual_event}"
            )));
        }
        self.eval(
            &Command::new("event")
                .word("add")
                .word(virtual_event)
                .words(sequences.iter().copied()),
        )?;
        tracing::debug!(target: targets::EVENT, %virtual_event, ?sequences, "added virtual event sequences");
        Ok(())
    }

    /// Remove `sequences` from `virtual_event`. Sequences that are not
    /// associated with it are ignored.
    ///
    /// With no sequences, every sequence is removed and the virtual event
    /// no longer fires.
    pub fn remove_virtual_event(&self, virtual_event: &str, sequences: &[&str]) -> TkResult<()> {
        validate_virtual(virtual_event)?;
        self.eval(
            &Command::new("event")
                .word("remove")
                .word(virtual_event)
                .words(sequences.iter().copied()),
        )?;
        tracing::debug!(target: targets::EVENT, %virtual_event, ?sequences, "removed virtual event sequences");
        Ok(())
    }

    /// Physical sequences currently associated with `virtual_event`.
    ///
    /// Returns an empty list if the name is not a virtual event or the query
    /// fails.
    pub fn virtual_event_info(&self, virtual_event: &str) -> Vec<String> {
        if validate_virtual(virtual_event).is_err() {
            return Vec::new();
        }
        self.eval_list(&Command::new("event").word("info").word(virtual_event))
            .unwrap_or_else(|err| {
                tracing::warn!(target: targets::EVENT, %virtual_event, error = %err, "event info failed");
                Vec::new()
            })
    }
}
