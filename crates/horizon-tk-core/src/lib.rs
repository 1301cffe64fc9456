//! Core systems for Horizon Tk.
//!
//! This crate provides the pieces every Horizon Tk binding is built from:
//!
//! - **Interpreter boundary**: the [`Interpreter`] and [`Photo`] traits that an
//!   embedded Tcl/Tk runtime implements
//! - **Commands**: a structured [`Command`] builder with explicit quoting, and
//!   [`split_list`] for list-valued results
//! - **Widget registry**: path-to-[`WidgetId`] lookup for widgets owned by the
//!   interpreter
//! - **Identifiers**: session-owned [`IdGenerator`]s for actions and images
//! - **Configuration**: [`SessionConfig`], loadable from TOML
//! - **Errors and logging**: [`TkError`] and the `tracing` targets in [`logging`]
//!
//! # Command Example
//!
//! ```
//! use horizon_tk_core::{split_list, Command};
//!
//! let cmd = Command::new("event")
//!     .word("add")
//!     .word("<<Copy>>")
//!     .words(["<Control-c>", "<Control-Insert>"]);
//! assert_eq!(cmd.to_script(), "event add <<Copy>> <Control-c> <Control-Insert>");
//!
//! let items = split_list("<Control-c> {<Key F16>}").unwrap();
//! assert_eq!(items, vec!["<Control-c>", "<Key F16>"]);
//! ```

pub mod command;
mod config;
mod error;
mod ids;
pub mod interp;
pub mod logging;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod widget;

pub use command::{Command, split_list};
pub use config::SessionConfig;
pub use error::{InterpError, InterpResult, TkError, TkResult};
pub use ids::IdGenerator;
pub use interp::{Action, Interpreter, Photo, Zoom};
pub use logging::PerfSpan;
pub use widget::{WidgetId, WidgetRef, WidgetRegistry};

static_assertions::assert_impl_all!(WidgetRegistry: Send, Sync);
static_assertions::assert_impl_all!(IdGenerator: Send, Sync);
static_assertions::assert_impl_all!(TkError: Send, Sync);
