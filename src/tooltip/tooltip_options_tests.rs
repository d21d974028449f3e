//! Tests for tooltip/tooltip_options

use super::*;
use proptest::prelude::*;

fn doc_with(markup: &str) -> (Document, NodeId) {
    let doc = Document::from_body_markup(markup);
    let el = doc.query_selector("#el").unwrap().unwrap();
    (doc, el)
}

fn resolve(markup: &str, options: TooltipOptions) -> TooltipConfig {
    let (doc, el) = doc_with(markup);
    resolve_config(&doc, el, &options, &TooltipDefaults::default()).unwrap()
}

#[test]
fn test_defaults_without_options_or_data() {
    let config = resolve(r#"<a id="el" title="t">x</a>"#, TooltipOptions::default());
    assert_eq!(config.animation, "fade");
    assert_eq!(config.placement, "top");
    assert_eq!(config.template, None);
    assert_eq!(config.delay, 200);
    assert_eq!(config.placement_class, "bs-tooltip-top");
}

#[test]
fn test_data_attributes_fill_in() {
    let config = resolve(
        r#"<a id="el" data-animation="zoom" data-placement="left" data-delay="75">x</a>"#,
        TooltipOptions::default(),
    );
    assert_eq!(config.animation, "zoom");
    assert_eq!(config.placement, "left");
    assert_eq!(config.delay, 75);
    assert_eq!(config.placement_class, "bs-tooltip-left");
}

#[test]
fn test_explicit_options_win_over_data() {
    let config = resolve(
        r#"<a id="el" data-animation="zoom" data-placement="left" data-delay="75">x</a>"#,
        TooltipOptions {
            animation: Some("slide".to_string()),
            placement: Some("bottom".to_string()),
            delay: Some(500),
            ..Default::default()
        },
    );
    assert_eq!(config.animation, "slide");
    assert_eq!(config.placement, "bottom");
    assert_eq!(config.delay, 500);
}

#[test]
fn test_explicit_fade_is_treated_as_unset() {
    assert_eq!(resolve_animation(Some("fade"), Some("zoom"), "fade"), "zoom");
    assert_eq!(resolve_animation(Some("fade"), None, "fade"), "fade");
    assert_eq!(resolve_animation(Some(""), Some("zoom"), "fade"), "zoom");
}

#[test]
fn test_empty_placement_falls_through() {
    assert_eq!(resolve_placement(Some(""), Some(""), "top"), "top");
    assert_eq!(resolve_placement(None, Some("right"), "top"), "right");
}

#[test]
fn test_parse_delay_takes_leading_integer() {
    assert_eq!(parse_delay("150"), Some(150));
    assert_eq!(parse_delay(" 150ms"), Some(150));
    assert_eq!(parse_delay("-5"), Some(-5));
    assert_eq!(parse_delay("+7"), Some(7));
    assert_eq!(parse_delay("1.9"), Some(1));
    assert_eq!(parse_delay("slow"), None);
    assert_eq!(parse_delay(""), None);
}

#[test]
fn test_resolve_delay_edge_cases() {
    assert_eq!(resolve_delay(None, None, 200), 200);
    assert_eq!(resolve_delay(None, Some("abc"), 200), 200);
    assert_eq!(resolve_delay(None, Some("0"), 200), 200);
    assert_eq!(resolve_delay(Some(0), Some("90"), 200), 90);
    assert_eq!(resolve_delay(None, Some("-40"), 200), 0);
    assert_eq!(resolve_delay(Some(10), Some("90"), 200), 10);
}

#[test]
fn test_template_empty_string_is_none() {
    let config = resolve(
        r#"<a id="el">x</a>"#,
        TooltipOptions {
            template: Some(String::new()),
            ..Default::default()
        },
    );
    assert_eq!(config.template, None);
}

#[test]
fn test_container_defaults_to_body() {
    let (doc, el) = doc_with(r#"<a id="el">x</a>"#);
    let container = resolve_container(&doc, el, &TooltipOptions::default(), &DataAttributes::default()).unwrap();
    assert_eq!(container, doc.body());
}

#[test]
fn test_container_priority_order() {
    let (doc, el) = doc_with(
        r##"<div class="modal"><div class="fixed-bottom"><div class="fixed-top"><a id="el" data-container="#side">x</a></div></div></div><aside id="side"></aside><main id="main"></main>"##,
    );
    let data = DataAttributes::read(&doc, el);
    let main = doc.query_selector("#main").unwrap().unwrap();
    let side = doc.query_selector("#side").unwrap().unwrap();
    let top = doc.query_selector(".fixed-top").unwrap().unwrap();

    let explicit = TooltipOptions {
        container: Some(Target::from("#main")),
        ..Default::default()
    };
    assert_eq!(resolve_container(&doc, el, &explicit, &data).unwrap(), main);
    assert_eq!(
        resolve_container(&doc, el, &TooltipOptions::default(), &data).unwrap(),
        side
    );
    assert_eq!(
        resolve_container(&doc, el, &TooltipOptions::default(), &DataAttributes::default()).unwrap(),
        top
    );
}

#[test]
fn test_container_fixed_bottom_before_modal() {
    let (doc, el) = doc_with(r#"<div class="modal"><div class="fixed-bottom"><a id="el">x</a></div></div>"#);
    let bottom = doc.query_selector(".fixed-bottom").unwrap().unwrap();
    let container = resolve_container(&doc, el, &TooltipOptions::default(), &DataAttributes::default()).unwrap();
    assert_eq!(container, bottom);
}

#[test]
fn test_container_inside_modal() {
    let (doc, el) = doc_with(r#"<div class="modal"><a id="el">x</a></div>"#);
    let modal = doc.query_selector(".modal").unwrap().unwrap();
    let container = resolve_container(&doc, el, &TooltipOptions::default(), &DataAttributes::default()).unwrap();
    assert_eq!(container, modal);
}

#[test]
fn test_unmatched_explicit_container_falls_through() {
    let (doc, el) = doc_with(r#"<a id="el">x</a>"#);
    let options = TooltipOptions {
        container: Some(Target::from("#nowhere")),
        ..Default::default()
    };
    let container = resolve_container(&doc, el, &options, &DataAttributes::default()).unwrap();
    assert_eq!(container, doc.body());
}

#[test]
fn test_invalid_explicit_container_selector_is_an_error() {
    let (doc, el) = doc_with(r#"<a id="el">x</a>"#);
    let options = TooltipOptions {
        container: Some(Target::from("div > a")),
        ..Default::default()
    };
    assert!(resolve_container(&doc, el, &options, &DataAttributes::default()).is_err());
}

#[test]
fn test_invalid_data_container_selector_is_ignored() {
    let (doc, el) = doc_with(r#"<a id="el" data-container="a > b">x</a>"#);
    let data = DataAttributes::read(&doc, el);
    let container = resolve_container(&doc, el, &TooltipOptions::default(), &data).unwrap();
    assert_eq!(container, doc.body());
}

// Any explicit non-zero delay is taken verbatim.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_explicit_delay_wins(delay in 1u64..100_000, data in "[0-9]{0,5}") {
        prop_assert_eq!(resolve_delay(Some(delay), Some(&data), 200), delay);
    }

    #[test]
    fn prop_placement_class_follows_placement(placement in "[a-z]{1,10}") {
        let config = resolve(
            r#"<a id="el">x</a>"#,
            TooltipOptions { placement: Some(placement.clone()), ..Default::default() },
        );
        prop_assert_eq!(config.placement_class, format!("bs-tooltip-{}", placement));
    }
}
