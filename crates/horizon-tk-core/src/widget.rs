//! Registry of live widgets.
//!
//! Widgets are owned by the interpreter and named by their path (`.`,
//! `.top.ok`, ...). The registry maps those paths to stable [`WidgetId`]s so
//! that events and event injection can refer to a widget without owning it.
//! Lookups that fail return `None`; they never panic.

use std::collections::HashMap;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A stable handle to a registered widget.
    ///
    /// Becomes invalid once the widget is unregistered.
    pub struct WidgetId;
}

/// A resolved reference to a live widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetRef {
    id: WidgetId,
    path: String,
}

impl WidgetRef {
    /// The registry handle.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The interpreter path name, e.g. `.top.ok`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Default)]
struct RegistryData {
    widgets: SlotMap<WidgetId, String>,
    by_path: HashMap<String, WidgetId>,
}

/// Maps widget path names to [`WidgetId`]s.
#[derive(Default)]
pub struct WidgetRegistry {
    data: RwLock<RegistryData>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget path. Registering a path twice returns the
    /// existing id.
    pub fn register(&self, path: impl Into<String>) -> WidgetId {
        let path = path.into();
        let mut data = self.data.write();
        if let Some(&id) = data.by_path.get(&path) {
            return id;
        }
        let id = data.widgets.insert(path.clone());
        tracing::trace!(target: targets::WIDGET, ?id, %path, "registered widget");
        data.by_path.insert(path, id);
        id
    }

    /// Forget a widget. Returns `false` if it was not registered.
    pub fn unregister(&self, id: WidgetId) -> bool {
        let mut data = self.data.write();
        match data.widgets.remove(id) {
            Some(path) => {
                tracing::trace!(target: targets::WIDGET, ?id, %path, "unregistered widget");
                data.by_path.remove(&path);
                true
            }
            None => false,
        }
    }

    /// Forget a widget by path.
    pub fn unregister_path(&self, path: &str) -> bool {
        let id = self.data.read().by_path.get(path).copied();
        id.is_some_and(|id| self.unregister(id))
    }

    /// Whether `id` refers to a registered widget.
    pub fn is_live(&self, id: WidgetId) -> bool {
        self.data.read().widgets.contains_key(id)
    }

    /// Resolve an id to its path.
    pub fn resolve(&self, id: WidgetId) -> Option<WidgetRef> {
        self.data.read().widgets.get(id).map(|path| WidgetRef {
            id,
            path: path.clone(),
        })
    }

    /// Look a widget up by path.
    pub fn find_by_path(&self, path: &str) -> Option<WidgetRef> {
        let data = self.data.read();
        data.by_path.get(path).map(|&id| WidgetRef {
            id,
            path: path.to_string(),
        })
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.data.read().widgets.len()
    }

    /// Whether no widgets are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("len", &self.len())
            .finish()
    }
}
