//! Tests for tooltip/tooltip_node

use insta::assert_snapshot;

use super::*;
use crate::config::TooltipDefaults;
use crate::tooltip::tooltip_options::{TooltipOptions, resolve_config};

fn setup(markup: &str, options: TooltipOptions) -> (Document, NodeId, TooltipConfig) {
    let doc = Document::from_body_markup(markup);
    let el = doc.query_selector("#el").unwrap().unwrap();
    let config = resolve_config(&doc, el, &options, &TooltipDefaults::default()).unwrap();
    (doc, el, config)
}

#[test]
fn test_read_title_lookup_order() {
    let doc = Document::from_body_markup(
        r#"<a id="a" title="one" data-title="two"></a><a id="b" data-title="two" data-original-title="three"></a><a id="c" data-original-title="three"></a><a id="d" title="" data-title="two"></a><a id="e"></a>"#,
    );
    let title = |sel: &str| read_title(&doc, doc.query_selector(sel).unwrap().unwrap());

    assert_eq!(title("#a"), Some("one".to_string()));
    assert_eq!(title("#b"), Some("two".to_string()));
    assert_eq!(title("#c"), Some("three".to_string()));
    assert_eq!(title("#d"), Some("two".to_string()));
    assert_eq!(title("#e"), None);
}

#[test]
fn test_default_markup() {
    let (mut doc, el, config) = setup(r#"<a id="el" title="Save">x</a>"#, TooltipOptions::default());

    let (tip, title) = create_tooltip_node(&mut doc, el, &config).unwrap();

    assert_eq!(title, "Save");
    assert_eq!(doc.parent(tip), Some(doc.body()));
    assert_snapshot!(
        doc.outer_markup(tip),
        @r#"<div style="left: 0; top: 0" role="tooltip" class="tooltip fade bs-tooltip-top"><div class="arrow"></div><div class="tooltip-inner">Save</div></div>"#
    );
}

#[test]
fn test_default_markup_keeps_title_untrimmed_as_text() {
    let (mut doc, el, config) = setup(r#"<a id="el" title=" <b>x</b> ">x</a>"#, TooltipOptions::default());

    let (tip, _) = create_tooltip_node(&mut doc, el, &config).unwrap();
    let inner = doc.query_selector_in(tip, ".tooltip-inner").unwrap().unwrap();

    assert_eq!(doc.text_content(inner), " <b>x</b> ");
    assert!(doc.children(inner).iter().all(|c| doc.tag(*c).is_none()));
}

#[test]
fn test_template_markup() {
    let (mut doc, el, config) = setup(
        r#"<a id="el" title=" <b>Hi</b> ">x</a>"#,
        TooltipOptions {
            template: Some(
                r#"  <div class="tooltip custom" role="note"><div class="tooltip-inner">placeholder</div></div>  "#
                    .to_string(),
            ),
            ..Default::default()
        },
    );

    let (tip, _) = create_tooltip_node(&mut doc, el, &config).unwrap();

    assert_snapshot!(
        doc.outer_markup(tip),
        @r#"<div class="tooltip custom fade bs-tooltip-top" style="left: 0; top: 0" role="tooltip"><div class="tooltip-inner"><b>Hi</b></div></div>"#
    );
}

#[test]
fn test_template_without_root_element_falls_back_to_default() {
    let (mut doc, el, config) = setup(
        r#"<a id="el" title="Save">x</a>"#,
        TooltipOptions {
            template: Some("just text".to_string()),
            ..Default::default()
        },
    );

    let (tip, _) = create_tooltip_node(&mut doc, el, &config).unwrap();

    assert!(doc.query_selector_in(tip, ".arrow").unwrap().is_some());
}

#[test]
fn test_template_without_inner_keeps_template_content() {
    let (mut doc, el, config) = setup(
        r#"<a id="el" title="Save">x</a>"#,
        TooltipOptions {
            template: Some(r#"<div class="bubble"><span>static</span></div>"#.to_string()),
            ..Default::default()
        },
    );

    let (tip, _) = create_tooltip_node(&mut doc, el, &config).unwrap();

    assert_eq!(doc.text_content(tip), "static");
    assert!(doc.has_class(tip, "bubble"));
    assert!(doc.has_class(tip, "tooltip"));
}

#[test]
fn test_placement_class_only_for_requested_placement() {
    let (mut doc, el, config) = setup(
        r#"<a id="el" title="Save">x</a>"#,
        TooltipOptions {
            placement: Some("bottom".to_string()),
            ..Default::default()
        },
    );

    let (tip, _) = create_tooltip_node(&mut doc, el, &config).unwrap();

    assert!(doc.has_class(tip, "bs-tooltip-bottom"));
    let placement_classes: Vec<&str> = doc
        .classes(tip)
        .filter(|c| c.starts_with("bs-tooltip-"))
        .collect();
    assert_eq!(placement_classes, vec!["bs-tooltip-bottom"]);
}

#[test]
fn test_no_title_aborts_without_creating_node() {
    let (mut doc, el, config) = setup(r#"<a id="el">x</a>"#, TooltipOptions::default());
    let before = doc.inner_markup(doc.body());

    assert!(create_tooltip_node(&mut doc, el, &config).is_none());
    assert_eq!(doc.inner_markup(doc.body()), before);
}

#[test]
fn test_appends_to_resolved_container() {
    let (mut doc, el, config) = setup(
        r#"<div class="modal"><a id="el" title="Save">x</a></div>"#,
        TooltipOptions::default(),
    );
    let modal = doc.query_selector(".modal").unwrap().unwrap();

    let (tip, _) = create_tooltip_node(&mut doc, el, &config).unwrap();

    assert_eq!(doc.parent(tip), Some(modal));
    assert!(!doc.has_class(tip, SHOW_CLASS));
}
