//! Semantic intents reported to the owning application.
//!
//! The diagram never mutates the domain store itself. Gestures are turned
//! into [`DiagramEvent`]s and handed to whichever handler is registered for
//! that kind in the [`EventRegistry`]. The application persists the change
//! and calls [`crate::DiagramController::update_graph`] once it settles.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use solution_diagram::events::{DiagramEvent, EventRegistry};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut registry = EventRegistry::new();
//! registry.on_connect({
//!     let seen = seen.clone();
//!     move |event| seen.borrow_mut().push(event.clone())
//! });
//!
//! registry.emit(DiagramEvent::connect("c1", "c2"));
//! registry.emit(DiagramEvent::delete("e1")); // no handler: dropped
//!
//! assert_eq!(seen.borrow().len(), 1);
//! assert_eq!(seen.borrow()[0].destination, "c2");
//! ```

use std::fmt;
use std::rc::Rc;

use log::trace;
use serde::Serialize;

/// Request to connect two components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectEvent {
    pub source: String,
    pub destination: String,
}

/// A node was dragged to a new position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropEvent {
    pub id: String,
    pub x: f32,
    pub y: f32,
}

/// Request to delete a component or connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteEvent {
    pub id: String,
}

/// The closed set of intents a diagram can emit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiagramEvent {
    Connect(ConnectEvent),
    Drop(DropEvent),
    Delete(DeleteEvent),
}

impl DiagramEvent {
    pub fn connect(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::Connect(ConnectEvent {
            source: source.into(),
            destination: destination.into(),
        })
    }

    pub fn drop(id: impl Into<String>, x: f32, y: f32) -> Self {
        Self::Drop(DropEvent { id: id.into(), x, y })
    }

    pub fn delete(id: impl Into<String>) -> Self {
        Self::Delete(DeleteEvent { id: id.into() })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Connect(_) => EventKind::Connect,
            Self::Drop(_) => EventKind::Drop,
            Self::Delete(_) => EventKind::Delete,
        }
    }
}

/// Name of an intent, used for handler lookup and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connect,
    Drop,
    Delete,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Drop => "drop",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Handler<T> = Rc<dyn Fn(&T)>;

/// One optional handler per [`EventKind`].
///
/// Registering a handler replaces the previous one for that kind. Emitting an
/// event without a handler is a silent no-op. Handlers run synchronously on
/// the calling thread; there is no queue.
///
/// Clones share the handlers, so a caller can emit from a clone while the
/// original stays free for re-registration.
#[derive(Clone, Default)]
pub struct EventRegistry {
    connect: Option<Handler<ConnectEvent>>,
    drop: Option<Handler<DropEvent>>,
    delete: Option<Handler<DeleteEvent>>,
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("connect", &self.connect.is_some())
            .field("drop", &self.drop.is_some())
            .field("delete", &self.delete.is_some())
            .finish()
    }
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_connect(&mut self, handler: impl Fn(&ConnectEvent) + 'static) {
        self.connect = Some(Rc::new(handler));
    }

    pub fn on_drop(&mut self, handler: impl Fn(&DropEvent) + 'static) {
        self.drop = Some(Rc::new(handler));
    }

    pub fn on_delete(&mut self, handler: impl Fn(&DeleteEvent) + 'static) {
        self.delete = Some(Rc::new(handler));
    }

    /// Call the handler registered for this event's kind, if any.
    ///
    /// Returns `true` if a handler ran.
    pub fn emit(&self, event: DiagramEvent) -> bool {
        let kind = event.kind();
        let handled = match &event {
            DiagramEvent::Connect(payload) => Self::dispatch(&self.connect, payload),
            DiagramEvent::Drop(payload) => Self::dispatch(&self.drop, payload),
            DiagramEvent::Delete(payload) => Self::dispatch(&self.delete, payload),
        };
        if !handled {
            trace!(kind = kind.name(); "No handler registered, intent dropped");
        }
        handled
    }

    fn dispatch<T>(handler: &Option<Handler<T>>, payload: &T) -> bool {
        match handler {
            Some(handler) => {
                (**handler)(payload);
                true
            }
            None => false,
        }
    }
}
