//! Tests for dom/markup

use super::*;
use proptest::prelude::*;

fn element(tag: &str, attributes: &[(&str, &str)], children: Vec<MarkupNode>) -> MarkupNode {
    MarkupNode::Element {
        tag: tag.to_string(),
        attributes: attributes
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
        children,
    }
}

fn text(s: &str) -> MarkupNode {
    MarkupNode::Text(s.to_string())
}

#[test]
fn test_parse_plain_text() {
    assert_eq!(parse_fragment("hello"), vec![text("hello")]);
}

#[test]
fn test_parse_empty_input() {
    assert!(parse_fragment("").is_empty());
}

#[test]
fn test_parse_nested_elements() {
    let nodes = parse_fragment(r#"<div class="tooltip"><div class="arrow"></div><div class="tooltip-inner">x</div></div>"#);
    assert_eq!(
        nodes,
        vec![element(
            "div",
            &[("class", "tooltip")],
            vec![
                element("div", &[("class", "arrow")], vec![]),
                element("div", &[("class", "tooltip-inner")], vec![text("x")]),
            ]
        )]
    );
}

#[test]
fn test_parse_attribute_forms() {
    let nodes = parse_fragment(r#"<input type=checkbox checked data-x='a "b"' id="i">"#);
    assert_eq!(
        nodes,
        vec![element(
            "input",
            &[
                ("type", "checkbox"),
                ("checked", ""),
                ("data-x", "a \"b\""),
                ("id", "i")
            ],
            vec![]
        )]
    );
}

#[test]
fn test_parse_lowercases_tag_and_attribute_names() {
    let nodes = parse_fragment(r#"<DIV Data-Title="Hi"></DIV>"#);
    assert_eq!(nodes, vec![element("div", &[("data-title", "Hi")], vec![])]);
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let nodes = parse_fragment(r#"<a id="one" id="two"></a>"#);
    assert_eq!(nodes, vec![element("a", &[("id", "one")], vec![])]);
}

#[test]
fn test_void_and_self_closing_elements_have_no_children() {
    let nodes = parse_fragment("<br>after<span/>tail");
    assert_eq!(
        nodes,
        vec![
            element("br", &[], vec![]),
            text("after"),
            element("span", &[], vec![]),
            text("tail"),
        ]
    );
}

#[test]
fn test_unclosed_elements_close_at_end() {
    let nodes = parse_fragment("<p><b>bold");
    assert_eq!(
        nodes,
        vec![element("p", &[], vec![element("b", &[], vec![text("bold")])])]
    );
}

#[test]
fn test_stray_closing_tag_is_ignored() {
    assert_eq!(parse_fragment("a</div>b"), vec![text("ab")]);
}

#[test]
fn test_closing_outer_tag_closes_inner() {
    let nodes = parse_fragment("<div><span>x</div>y");
    assert_eq!(
        nodes,
        vec![
            element("div", &[], vec![element("span", &[], vec![text("x")])]),
            text("y"),
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(parse_fragment("a<!-- note -->b"), vec![text("ab")]);
}

#[test]
fn test_lone_angle_bracket_is_text() {
    assert_eq!(parse_fragment("1 < 2"), vec![text("1 < 2")]);
}

#[test]
fn test_unterminated_tag_is_text() {
    assert_eq!(parse_fragment("<div class"), vec![text("<div class")]);
}

#[test]
fn test_decode_entities() {
    assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
    assert_eq!(decode_entities("&#65;&#x42;"), "AB");
    assert_eq!(decode_entities("&unknown; &"), "&unknown; &");
}

#[test]
fn test_escape_text_and_attribute() {
    assert_eq!(escape_text("<b> & </b>"), "&lt;b&gt; &amp; &lt;/b&gt;");
    assert_eq!(escape_attribute(r#"say "hi" & go"#), "say &quot;hi&quot; &amp; go");
}

// Escaped text always parses back to exactly one text node with the original content.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_escaped_text_is_preserved(s in "[a-zA-Z0-9 <>&\"';]{1,40}") {
        let nodes = parse_fragment(&escape_text(&s));
        prop_assert_eq!(nodes, vec![MarkupNode::Text(s.clone())]);
    }
}
