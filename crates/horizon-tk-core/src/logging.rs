//! Logging facilities for Horizon Tk.
//!
//! Horizon Tk uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_tk=debug,horizon_tk_core=trace")
//!         .init();
//! }
//! ```
//!
//! Runtime failures that the bindings tolerate (a gamma value that does not
//! parse, a pixel transfer the interpreter rejected) are reported here, on
//! the targets listed in [`targets`].

/// Span names used throughout Horizon Tk for tracing.
pub mod span_names {
    /// Script evaluation span.
    pub const EVAL: &str = "horizon_tk::eval";
    /// Bound event dispatch span.
    pub const DISPATCH: &str = "horizon_tk::dispatch";
    /// Photo pixel transfer span.
    pub const PHOTO_PUT: &str = "horizon_tk::photo_put";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core target.
    pub const CORE: &str = "horizon_tk_core";
    /// Script evaluation and action registration.
    pub const INTERP: &str = "horizon_tk_core::interp";
    /// Widget registry.
    pub const WIDGET: &str = "horizon_tk_core::widget";
    /// Event bindings and dispatch.
    pub const EVENT: &str = "horizon_tk::event";
    /// Photo images.
    pub const IMAGE: &str = "horizon_tk::image";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "horizon_tk::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Debug-level event on the [`targets::CORE`] target.
#[macro_export]
macro_rules! tk_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}
