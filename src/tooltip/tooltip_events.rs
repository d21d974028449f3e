//! Listener wiring for the tooltip
//!
//! Trigger listeners live for the whole life of an instance. Dismissal
//! listeners (outside touch, window resize) only while the tooltip is shown.

use crate::dom::events::{
    EventTarget, Handler, ListenerId, Listeners, MOUSE_DOWN, MOUSE_ENTER, MOUSE_LEAVE, RESIZE,
    TOUCH_START,
};
use crate::dom::{Document, NodeId};

use super::tooltip_state::InstanceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipAction {
    Show,
    Hide,
    /// Hide unless the touch landed on the tooltip or the reference element
    TouchOutside,
}

/// Listener payload routed back to the `owner` instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipListener {
    pub owner: InstanceId,
    pub action: TooltipAction,
}

fn route(owner: InstanceId, action: TooltipAction) -> Handler<TooltipListener> {
    Handler::Action(TooltipListener { owner, action })
}

pub fn attach_triggers(
    listeners: &mut Listeners<TooltipListener>,
    element: NodeId,
    owner: InstanceId,
) -> Vec<ListenerId> {
    let target = EventTarget::Node(element);
    vec![
        listeners.on(target, MOUSE_DOWN, route(owner, TooltipAction::Show), false),
        listeners.on(target, MOUSE_ENTER, route(owner, TooltipAction::Show), false),
        listeners.on(target, MOUSE_LEAVE, route(owner, TooltipAction::Hide), false),
    ]
}

pub fn attach_dismissal(listeners: &mut Listeners<TooltipListener>, owner: InstanceId) -> Vec<ListenerId> {
    vec![
        listeners.on(
            EventTarget::Document,
            TOUCH_START,
            route(owner, TooltipAction::TouchOutside),
            true,
        ),
        listeners.on(
            EventTarget::Window,
            RESIZE,
            route(owner, TooltipAction::Hide),
            true,
        ),
    ]
}

pub fn detach(listeners: &mut Listeners<TooltipListener>, ids: &mut Vec<ListenerId>) {
    for id in ids.drain(..) {
        listeners.off(id);
    }
}

/// True when `target` is neither inside the tooltip nor inside the element
pub fn is_outside(doc: &Document, element: NodeId, tip: Option<NodeId>, target: EventTarget) -> bool {
    let Some(node) = target.node() else {
        return true;
    };
    let on_tip = tip.is_some_and(|tip| doc.contains(tip, node));
    !on_tip && !doc.contains(element, node)
}

#[cfg(test)]
#[path = "tooltip_events_tests.rs"]
mod tooltip_events_tests;
