//! The binding session.

use std::fmt;
use std::sync::Arc;

use horizon_tk_core::logging::{span_names, targets};
use horizon_tk_core::{
    Action, Command, IdGenerator, Interpreter, PerfSpan, SessionConfig, TkError, TkResult,
    WidgetRegistry, split_list,
};

struct TkInner {
    interp: Arc<dyn Interpreter>,
    config: SessionConfig,
    image_ids: IdGenerator,
    action_ids: IdGenerator,
    widgets: Arc<WidgetRegistry>,
}

/// A handle to one interpreter and the state the bindings keep for it.
///
/// `Tk` is cheap to clone; clones share the interpreter, the widget
/// registry and the id generators.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_tk::Tk;
/// use horizon_tk_core::testing::RecordingInterpreter;
///
/// let interp = Arc::new(RecordingInterpreter::new());
/// let tk = Tk::new(interp.clone());
/// tk.bind_event(".", "<Button-1>", |event| {
///     println!("clicked at {}, {}", event.x, event.y);
/// }).unwrap();
/// assert!(interp.last_script().unwrap().starts_with("bind . <Button-1> {horizon_bind1 %T"));
/// ```
#[derive(Clone)]
pub struct Tk {
    inner: Arc<TkInner>,
}

impl Tk {
    /// Create a session with default configuration.
    pub fn new(interp: Arc<dyn Interpreter>) -> Self {
        Self::build(interp, SessionConfig::default())
    }

    /// Create a session with a custom configuration.
    pub fn with_config(interp: Arc<dyn Interpreter>, config: SessionConfig) -> TkResult<Self> {
        config.validate()?;
        Ok(Self::build(interp, config))
    }

    fn build(interp: Arc<dyn Interpreter>, config: SessionConfig) -> Self {
        let image_ids = IdGenerator::new(config.image_id_prefix.clone());
        let action_ids = IdGenerator::new(config.action_id_prefix.clone());
        horizon_tk_core::tk_debug!(
            image_prefix = %config.image_id_prefix,
            action_prefix = %config.action_id_prefix,
            "session created"
        );
        Self {
            inner: Arc::new(TkInner {
                interp,
                config,
                image_ids,
                action_ids,
                widgets: Arc::new(WidgetRegistry::new()),
            }),
        }
    }

    /// The underlying interpreter.
    pub fn interp(&self) -> &Arc<dyn Interpreter> {
        &self.inner.interp
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Registry of widgets known to this session.
    pub fn widgets(&self) -> &WidgetRegistry {
        &self.inner.widgets
    }

    pub(crate) fn shared_widgets(&self) -> Arc<WidgetRegistry> {
        self.inner.widgets.clone()
    }

    pub(crate) fn next_image_id(&self) -> String {
        self.inner.image_ids.next_id()
    }

    pub(crate) fn next_action_id(&self) -> String {
        self.inner.action_ids.next_id()
    }

    /// Evaluate a command.
    pub fn eval(&self, cmd: &Command) -> TkResult<String> {
        self.eval_script(&cmd.to_script())
    }

    /// Evaluate raw script text.
    pub fn eval_script(&self, script: &str) -> TkResult<String> {
        let _span = PerfSpan::new(span_names::EVAL);
        if self.inner.config.trace_scripts {
            tracing::trace!(target: targets::INTERP, %script, "eval");
        }
        self.inner.interp.eval(script).map_err(|err| {
            tracing::debug!(target: targets::INTERP, %script, error = %err.message, "eval failed");
            TkError::from(err)
        })
    }

    /// Evaluate a command whose result is a list.
    pub(crate) fn eval_list(&self, cmd: &Command) -> TkResult<Vec<String>> {
        let result = self.eval(cmd)?;
        Ok(split_list(&result)?)
    }

    /// Register an interpreter-level action.
    pub(crate) fn create_action(&self, id: &str, action: Action) -> TkResult<()> {
        tracing::trace!(target: targets::INTERP, %id, "create action");
        Ok(self.inner.interp.create_action(id, action)?)
    }
}

impl fmt::Debug for Tk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tk")
            .field("config", &self.inner.config)
            .field("widgets", &self.inner.widgets)
            .field("images_created", &self.inner.image_ids.issued())
            .field("actions_created", &self.inner.action_ids.issued())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_tk_core::testing::RecordingInterpreter;

    #[test]
    fn test_eval_records_script() {
        let interp = Arc::new(RecordingInterpreter::new());
        let tk = Tk::new(interp.clone());
        tk.eval(&Command::new("update").word("idletasks")).unwrap();
        assert_eq!(interp.last_script().as_deref(), Some("update idletasks"));
    }

    #[test]
    fn test_eval_error_maps_to_interp() {
        let interp = Arc::new(RecordingInterpreter::new());
        interp.fail("nosuch", "invalid command name \"nosuch\"");
        let tk = Tk::new(interp);
        let err = tk.eval_script("nosuch arg").unwrap_err();
        match err {
            TkError::Interp(e) => {
                assert_eq!(e.script, "nosuch arg");
                assert!(e.message.contains("invalid command name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_eval_list() {
        let interp = Arc::new(RecordingInterpreter::new());
        interp.respond("event info", "<Control-c> <Control-Insert>");
        let tk = Tk::new(interp);
        let items = tk
            .eval_list(&Command::new("event").word("info").word("<<Copy>>"))
            .unwrap();
        assert_eq!(items, vec!["<Control-c>", "<Control-Insert>"]);
    }

    #[test]
    fn test_with_config_prefixes() {
        let interp = Arc::new(RecordingInterpreter::new());
        let config = SessionConfig::new()
            .image_id_prefix("img")
            .action_id_prefix("cb")
            .trace_scripts(true);
        let tk = Tk::with_config(interp, config).unwrap();
        assert_eq!(tk.next_image_id(), "img1");
        assert_eq!(tk.next_action_id(), "cb1");
        assert!(tk.config().trace_scripts);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let interp = Arc::new(RecordingInterpreter::new());
        let config = SessionConfig::new().image_id_prefix("");
        assert!(matches!(
            Tk::with_config(interp, config),
            Err(TkError::Config(_))
        ));
    }

    #[test]
    fn test_clones_share_state() {
        let tk = Tk::new(Arc::new(RecordingInterpreter::new()));
        let other = tk.clone();
        tk.widgets().register(".a");
        assert!(other.widgets().find_by_path(".a").is_some());
        assert_eq!(tk.next_action_id(), "horizon_bind1");
        assert_eq!(other.next_action_id(), "horizon_bind2");
    }
}
