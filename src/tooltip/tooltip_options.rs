//! Option resolution
//!
//! Explicit options win over `data-*` attributes, which win over the
//! configured defaults.

use crate::config::{DEFAULT_ANIMATION, TooltipDefaults};
use crate::dom::{Document, NodeId};
use crate::error::Result;

/// An element handle or a selector to look one up with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Node(NodeId),
    Selector(String),
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Target::Node(id)
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

/// Resolve a target; `Ok(None)` when nothing matches
pub fn query_target(doc: &Document, target: &Target) -> Result<Option<NodeId>> {
    match target {
        Target::Node(id) => Ok(doc.is_live(*id).then_some(*id)),
        Target::Selector(selector) => doc.query_selector(selector),
    }
}

/// Options passed at construction; everything is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TooltipOptions {
    pub animation: Option<String>,
    pub placement: Option<String>,
    /// Markup whose root element becomes the tooltip
    pub template: Option<String>,
    /// Hide delay in milliseconds
    pub delay: Option<u64>,
    pub container: Option<Target>,
}

/// `data-*` attributes read from the reference element at construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataAttributes {
    pub animation: Option<String>,
    pub placement: Option<String>,
    pub delay: Option<String>,
    pub container: Option<String>,
}

impl DataAttributes {
    pub fn read(doc: &Document, element: NodeId) -> Self {
        let read = |name: &str| doc.attribute(element, name).map(str::to_string);
        Self {
            animation: read("data-animation"),
            placement: read("data-placement"),
            delay: read("data-delay"),
            container: read("data-container"),
        }
    }
}

/// Effective configuration of one widget instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipConfig {
    pub animation: String,
    pub placement: String,
    pub template: Option<String>,
    pub delay: u64,
    pub container: NodeId,
    /// `bs-tooltip-<placement>`
    pub placement_class: String,
}

impl TooltipConfig {
    pub fn is_animated(&self) -> bool {
        !self.animation.is_empty()
    }
}

/// Where the container may come from, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerSource {
    Explicit,
    DataAttribute,
    FixedTop,
    FixedBottom,
    Modal,
    Body,
}

pub const CONTAINER_SOURCES: [ContainerSource; 6] = [
    ContainerSource::Explicit,
    ContainerSource::DataAttribute,
    ContainerSource::FixedTop,
    ContainerSource::FixedBottom,
    ContainerSource::Modal,
    ContainerSource::Body,
];

impl ContainerSource {
    fn resolve(
        self,
        doc: &Document,
        element: NodeId,
        options: &TooltipOptions,
        data: &DataAttributes,
    ) -> Result<Option<NodeId>> {
        match self {
            ContainerSource::Explicit => match &options.container {
                Some(target) => query_target(doc, target),
                None => Ok(None),
            },
            ContainerSource::DataAttribute => {
                let Some(selector) = data.container.as_deref().filter(|s| !s.is_empty()) else {
                    return Ok(None);
                };
                // Page markup is not ours to reject; a bad selector just falls through.
                Ok(doc.query_selector(selector).unwrap_or_else(|e| {
                    log::warn!("Ignoring data-container: {}", e);
                    None
                }))
            }
            ContainerSource::FixedTop => doc.closest(element, ".fixed-top"),
            ContainerSource::FixedBottom => doc.closest(element, ".fixed-bottom"),
            ContainerSource::Modal => doc.closest(element, ".modal"),
            ContainerSource::Body => Ok(Some(doc.body())),
        }
    }
}

pub fn resolve_container(
    doc: &Document,
    element: NodeId,
    options: &TooltipOptions,
    data: &DataAttributes,
) -> Result<NodeId> {
    for source in CONTAINER_SOURCES {
        if let Some(container) = source.resolve(doc, element, options, data)? {
            return Ok(container);
        }
    }
    Ok(doc.body())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// An explicit `"fade"` counts as unset, so the data-attribute can still win.
pub fn resolve_animation(explicit: Option<&str>, data: Option<&str>, default: &str) -> String {
    non_empty(explicit)
        .filter(|a| *a != DEFAULT_ANIMATION)
        .or(non_empty(data))
        .unwrap_or(default)
        .to_string()
}

pub fn resolve_placement(explicit: Option<&str>, data: Option<&str>, default: &str) -> String {
    non_empty(explicit)
        .or(non_empty(data))
        .unwrap_or(default)
        .to_string()
}

/// Leading-integer parse: `" 150ms"` is 150, `"abc"` is nothing
pub fn parse_delay(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Zero and unparsable values fall back to the default; negatives clamp to 0
pub fn resolve_delay(explicit: Option<u64>, data: Option<&str>, default: u64) -> u64 {
    let parsed = match explicit.filter(|d| *d != 0) {
        Some(d) => i64::try_from(d).ok(),
        None => data.and_then(parse_delay),
    };
    match parsed {
        None | Some(0) => default,
        Some(d) => u64::try_from(d).unwrap_or(0),
    }
}

pub fn resolve_config(
    doc: &Document,
    element: NodeId,
    options: &TooltipOptions,
    defaults: &TooltipDefaults,
) -> Result<TooltipConfig> {
    let data = DataAttributes::read(doc, element);

    let animation = resolve_animation(
        options.animation.as_deref(),
        data.animation.as_deref(),
        &defaults.animation,
    );
    let placement = resolve_placement(
        options.placement.as_deref(),
        data.placement.as_deref(),
        &defaults.placement,
    );
    let template = options.template.clone().filter(|t| !t.is_empty());
    let delay = resolve_delay(options.delay, data.delay.as_deref(), defaults.delay);
    let container = resolve_container(doc, element, options, &data)?;
    let placement_class = format!("bs-tooltip-{placement}");

    Ok(TooltipConfig {
        animation,
        placement,
        template,
        delay,
        container,
        placement_class,
    })
}

#[cfg(test)]
#[path = "tooltip_options_tests.rs"]
mod tooltip_options_tests;
