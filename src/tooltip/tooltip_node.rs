//! Tooltip node factory

use super::tooltip_options::TooltipConfig;
use crate::dom::{Document, MarkupNode, NodeId, parse_fragment};

/// Attributes a title may live in, in lookup order
pub const TITLE_ATTRIBUTES: [&str; 3] = ["title", "data-title", "data-original-title"];
/// Where the native title is parked while the widget is bound
pub const BACKUP_TITLE_ATTRIBUTE: &str = "data-original-title";

pub const TOOLTIP_CLASS: &str = "tooltip";
pub const INNER_CLASS: &str = "tooltip-inner";
pub const ARROW_CLASS: &str = "arrow";
pub const SHOW_CLASS: &str = "show";

/// First non-empty title attribute on the element
pub fn read_title(doc: &Document, element: NodeId) -> Option<String> {
    TITLE_ATTRIBUTES
        .iter()
        .filter_map(|name| doc.attribute(element, name))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Build the tooltip node and append it to the container.
///
/// The title is read again because the markup may have changed since the
/// widget was constructed. Returns `None` when there is no title to show.
pub fn create_tooltip_node(
    doc: &mut Document,
    element: NodeId,
    config: &TooltipConfig,
) -> Option<(NodeId, String)> {
    let title = read_title(doc, element)?;
    let tip = doc.create_element("div");

    let templated = match config.template.as_deref() {
        Some(template) => apply_template(doc, tip, template, &title),
        None => false,
    };
    if !templated {
        build_default_markup(doc, tip, &title);
    }

    doc.set_style(tip, "left", "0");
    doc.set_style(tip, "top", "0");
    doc.set_attribute(tip, "role", "tooltip");
    doc.add_class(tip, TOOLTIP_CLASS);
    doc.add_class(tip, &config.animation);
    doc.add_class(tip, &config.placement_class);

    doc.append_child(config.container, tip);
    Some((tip, title))
}

fn build_default_markup(doc: &mut Document, tip: NodeId, title: &str) {
    let arrow = doc.create_element("div");
    doc.add_class(arrow, ARROW_CLASS);
    doc.append_child(tip, arrow);

    let inner = doc.create_element("div");
    doc.add_class(inner, INNER_CLASS);
    doc.append_child(tip, inner);
    doc.set_text(inner, title);
}

/// Copy the template root's classes and content onto `tip`
fn apply_template(doc: &mut Document, tip: NodeId, template: &str, title: &str) -> bool {
    let fragment = parse_fragment(template.trim());
    let Some(MarkupNode::Element {
        attributes,
        children,
        ..
    }) = fragment.into_iter().find(MarkupNode::is_element)
    else {
        log::warn!("Tooltip template has no root element; using default markup");
        return false;
    };

    if let Some((_, class)) = attributes.iter().find(|(name, _)| name == "class") {
        doc.set_attribute(tip, "class", class);
    }
    doc.append_markup(tip, &children);

    let inner = doc
        .descendants(tip)
        .into_iter()
        .find(|n| doc.has_class(*n, INNER_CLASS));
    match inner {
        Some(inner) => doc.set_inner_markup(inner, title.trim()),
        None => log::warn!("Tooltip template has no .{} element", INNER_CLASS),
    }
    true
}

#[cfg(test)]
#[path = "tooltip_node_tests.rs"]
mod tooltip_node_tests;
