//! Prelude module for Horizon Tk.
//!
//! ```
//! use horizon_tk::prelude::*;
//! ```

// ============================================================================
// Session
// ============================================================================

pub use crate::Tk;
pub use horizon_tk_core::{Command, SessionConfig, TkError, TkResult};

// ============================================================================
// Events
// ============================================================================

pub use crate::event::{Event, EventAttr, EventKind, KeyBinding, KeyEvent, KeyHandler, KeyModifier};

// ============================================================================
// Widgets
// ============================================================================

pub use horizon_tk_core::{WidgetId, WidgetRef};

// ============================================================================
// Images
// ============================================================================

pub use crate::{Image, ImageOpt};
pub use horizon_tk_core::Zoom;
