//! Tests for tooltip/tooltip_events

use super::*;

const OWNER: InstanceId = InstanceId(7);

fn setup() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::from_body_markup(r#"<button id="el"><i id="icon"></i></button><p id="other"></p>"#);
    let el = doc.query_selector("#el").unwrap().unwrap();
    let other = doc.query_selector("#other").unwrap().unwrap();
    let tip = doc.create_element("div");
    let body = doc.body();
    doc.append_child(body, tip);
    (doc, el, other, tip)
}

#[test]
fn test_attach_triggers_registers_three_listeners() {
    let (_, el, _, _) = setup();
    let mut listeners = Listeners::new();

    let ids = attach_triggers(&mut listeners, el, OWNER);

    assert_eq!(ids.len(), 3);
    let target = EventTarget::Node(el);
    assert_eq!(listeners.count(target, MOUSE_DOWN), 1);
    assert_eq!(listeners.count(target, MOUSE_ENTER), 1);
    assert_eq!(listeners.count(target, MOUSE_LEAVE), 1);
}

#[test]
fn test_trigger_actions_route_to_owner() {
    let (_, el, _, _) = setup();
    let mut listeners = Listeners::new();
    attach_triggers(&mut listeners, el, OWNER);

    let mut event = crate::dom::events::Event::native(MOUSE_LEAVE, EventTarget::Node(el));
    let routed = listeners.deliver(&mut event, &[EventTarget::Node(el)]);

    assert_eq!(routed.len(), 1);
    assert_eq!(
        routed[0].1,
        TooltipListener {
            owner: OWNER,
            action: TooltipAction::Hide
        }
    );
}

#[test]
fn test_attach_dismissal_targets_document_and_window() {
    let mut listeners = Listeners::new();

    let mut ids = attach_dismissal(&mut listeners, OWNER);

    assert_eq!(listeners.count(EventTarget::Document, TOUCH_START), 1);
    assert_eq!(listeners.count(EventTarget::Window, RESIZE), 1);

    detach(&mut listeners, &mut ids);
    assert!(ids.is_empty());
    assert!(listeners.is_empty());
}

#[test]
fn test_is_outside() {
    let (doc, el, other, tip) = setup();
    let icon = doc.query_selector("#icon").unwrap().unwrap();

    assert!(is_outside(&doc, el, Some(tip), EventTarget::Node(other)));
    assert!(is_outside(&doc, el, Some(tip), EventTarget::Document));
    assert!(!is_outside(&doc, el, Some(tip), EventTarget::Node(el)));
    assert!(!is_outside(&doc, el, Some(tip), EventTarget::Node(icon)));
    assert!(!is_outside(&doc, el, Some(tip), EventTarget::Node(tip)));
    assert!(is_outside(&doc, el, None, EventTarget::Node(tip)));
}
