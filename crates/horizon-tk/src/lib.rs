//! Horizon Tk - event bindings and photo images for an embedded Tk.
//!
//! Every operation is expressed as a script evaluated by an
//! [`Interpreter`](horizon_tk_core::Interpreter). The interpreter itself
//! (and its event loop) is supplied by the embedder; this crate owns the
//! session state around it: generated ids, the widget registry, and the
//! parsing of event fields handed back to callbacks.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_tk::prelude::*;
//! use horizon_tk_core::testing::RecordingInterpreter;
//!
//! let interp = Arc::new(RecordingInterpreter::new());
//! let tk = Tk::new(interp.clone());
//!
//! let canvas = tk.widgets().register(".c");
//! tk.bind_event(".c", "<Button-1>", |event: &Event| {
//!     println!("click at {},{}", event.x, event.y);
//! })
//! .unwrap();
//! tk.send_event(canvas, "<Button-1>", &[EventAttr::x(4), EventAttr::y(2)])
//!     .unwrap();
//! ```

pub mod event;
mod photo;
pub mod prelude;
mod session;

pub use event::{Event, EventAttr, EventKind, KeyBinding, KeyEvent, KeyHandler, KeyModifier};
pub use photo::{Image, ImageOpt};
pub use session::Tk;

pub use horizon_tk_core::{Command, SessionConfig, TkError, TkResult, WidgetId, WidgetRef, Zoom};

static_assertions::assert_impl_all!(Tk: Send, Sync, Clone);
static_assertions::assert_impl_all!(Image: Send, Sync);
