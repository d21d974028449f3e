//! Events and the listener registry
//!
//! Listeners either carry a host-routed action (`Handler::Action`), which the
//! registry hands back to the caller, or a user callback that runs during
//! delivery.

use std::fmt;
use std::rc::Rc;

use super::node::NodeId;

pub const MOUSE_DOWN: &str = "mousedown";
pub const MOUSE_ENTER: &str = "mouseenter";
pub const MOUSE_LEAVE: &str = "mouseleave";
pub const TOUCH_START: &str = "touchstart";
pub const CLICK: &str = "click";
pub const RESIZE: &str = "resize";
pub const TRANSITION_END: &str = "transitionend";

/// Whether a native event propagates from its target up to the document
pub fn bubbles(name: &str) -> bool {
    matches!(name, MOUSE_DOWN | TOUCH_START | CLICK | TRANSITION_END)
}

pub fn is_cancelable(name: &str) -> bool {
    matches!(name, MOUSE_DOWN | TOUCH_START | CLICK)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Node(NodeId),
    Document,
    Window,
}

impl EventTarget {
    pub fn node(self) -> Option<NodeId> {
        match self {
            EventTarget::Node(id) => Some(id),
            _ => None,
        }
    }
}

impl From<NodeId> for EventTarget {
    fn from(id: NodeId) -> Self {
        EventTarget::Node(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    target: EventTarget,
    cancelable: bool,
    default_prevented: bool,
    in_passive_listener: bool,
}

impl Event {
    /// Native event; cancelability follows the event name
    pub fn native(name: &str, target: EventTarget) -> Self {
        Self {
            name: name.to_string(),
            target,
            cancelable: is_cancelable(name),
            default_prevented: false,
            in_passive_listener: false,
        }
    }

    /// Namespaced widget event, e.g. `show.bs.tooltip`
    pub fn custom(kind: &str, component: &str, target: NodeId, cancelable: bool) -> Self {
        Self {
            name: format!("{kind}.bs.{component}"),
            target: EventTarget::Node(target),
            cancelable,
            default_prevented: false,
            in_passive_listener: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> EventTarget {
        self.target
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Ignored for non-cancelable events and inside passive listeners
    pub fn prevent_default(&mut self) {
        if self.cancelable && !self.in_passive_listener {
            self.default_prevented = true;
        }
    }

    /// Clear per-dispatch state so the event object can be dispatched again
    pub fn reset(&mut self) {
        self.default_prevented = false;
        self.in_passive_listener = false;
    }
}

pub type Callback = Rc<dyn Fn(&mut Event)>;

#[derive(Clone)]
pub enum Handler<A> {
    Action(A),
    Callback(Callback),
}

impl<A: fmt::Debug> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Handler::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Listener<A> {
    id: ListenerId,
    target: EventTarget,
    name: String,
    passive: bool,
    handler: Handler<A>,
}

/// Every listener registered on the page, in registration order
#[derive(Debug)]
pub struct Listeners<A> {
    next_id: u64,
    entries: Vec<Listener<A>>,
}

impl<A: Clone> Listeners<A> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    pub fn on(
        &mut self,
        target: EventTarget,
        name: &str,
        handler: Handler<A>,
        passive: bool,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Listener {
            id,
            target,
            name: name.to_string(),
            passive,
            handler,
        });
        id
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|l| l.id == id)
    }

    /// Number of listeners for `name` on `target`
    pub fn count(&self, target: EventTarget, name: &str) -> usize {
        self.entries
            .iter()
            .filter(|l| l.target == target && l.name == name)
            .count()
    }

    /// Deliver `event` along `path`, running callbacks in place.
    ///
    /// Routed actions are returned in delivery order, paired with the
    /// listener id so the caller can skip listeners removed mid-dispatch.
    pub fn deliver(&self, event: &mut Event, path: &[EventTarget]) -> Vec<(ListenerId, A)> {
        let mut actions = Vec::new();
        for target in path {
            let matching: Vec<&Listener<A>> = self
                .entries
                .iter()
                .filter(|l| l.target == *target && l.name == event.name)
                .collect();
            for listener in matching {
                match &listener.handler {
                    Handler::Action(action) => actions.push((listener.id, action.clone())),
                    Handler::Callback(callback) => {
                        event.in_passive_listener = listener.passive;
                        callback(event);
                        event.in_passive_listener = false;
                    }
                }
            }
        }
        actions
    }
}

impl<A: Clone> Default for Listeners<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
