//! String-keyed event emitter with forwarding.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::id::{ColumnId, RowId};

/// Fired after a draw that rendered data rows.
pub const DRAW: &str = "draw";
/// Fired after a draw that found no data (message row or empty body).
pub const DRAW_EMPTY: &str = "draw.empty";
/// Fired when a column's visibility is set, carrying old/new values.
pub const COLUMN_VISIBLE: &str = "column.visible";
/// Fired when a row's visibility is set, carrying old/new values.
pub const ROW_VISIBLE: &str = "row.visible";

/// Payload handed to event listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum EventArgs {
    None,
    ColumnVisible {
        column_id: ColumnId,
        old_value: bool,
        new_value: bool,
    },
    RowVisible {
        row_id: RowId,
        old_value: bool,
        new_value: bool,
    },
}

pub type Listener = Arc<dyn Fn(&EventArgs) + Send + Sync>;

/// A cheap-to-clone pub/sub emitter. Clones share the same listener lists, so
/// handlers registered through any clone fire for all of them.
#[derive(Clone, Default)]
pub struct EventEmitter {
    listeners: Arc<RwLock<HashMap<String, Vec<Listener>>>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler to the event's list.
    pub fn on(&self, event: impl Into<String>, handler: impl Fn(&EventArgs) + Send + Sync + 'static) -> &Self {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners
                .entry(event.into())
                .or_default()
                .push(Arc::new(handler));
        }
        self
    }

    /// Invoke every handler for the event synchronously, in registration
    /// order. Handler panics are not caught.
    pub fn trigger(&self, event: &str, args: &EventArgs) -> &Self {
        let handlers: Vec<Listener> = self
            .listeners
            .read()
            .ok()
            .and_then(|l| l.get(event).cloned())
            .unwrap_or_default();
        // The lock is released before handlers run, so a handler may register
        // further listeners or trigger other events.
        for handler in handlers {
            handler(args);
        }
        self
    }

    /// Re-trigger this emitter's `event` (with the same payload) on another
    /// emitter whenever it fires here.
    pub fn forward(&self, event: impl Into<String>, target: &EventEmitter) -> &Self {
        let event = event.into();
        let target = target.clone();
        let forwarded = event.clone();
        self.on(event, move |args| {
            target.trigger(&forwarded, args);
        })
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .read()
            .ok()
            .and_then(|l| l.get(event).map(|h| h.len()))
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events = self
            .listeners
            .read()
            .map(|l| l.len())
            .unwrap_or(0);
        f.debug_struct("EventEmitter").field("events", &events).finish()
    }
}
