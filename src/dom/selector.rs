//! Compound selectors joined by the descendant combinator
//!
//! Supported: `tag`, `*`, `#id`, `.class`, `[attr]`, `[attr=value]` and
//! whitespace between compounds. Anything else is rejected up front.

use std::iter::Peekable;
use std::str::Chars;

use super::document::Document;
use super::node::NodeId;
use crate::error::{HovertipError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag) = doc.tag(node) else {
            return false;
        };
        if let Some(expected) = &self.tag
            && expected != "*"
            && expected != tag
        {
            return false;
        }
        if let Some(id) = &self.id
            && doc.attribute(node, "id") != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|class| doc.has_class(node, class)) {
            return false;
        }
        self.attributes.iter().all(|attr| match (&attr.value, doc.attribute(node, &attr.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

/// A parsed selector, matched right to left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let mut chars = source.trim().chars().peekable();
        let mut compounds = Vec::new();
        let mut current = Compound::default();

        while let Some(&c) = chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    chars.next();
                    if !current.is_empty() {
                        compounds.push(std::mem::take(&mut current));
                    }
                }
                '#' => {
                    chars.next();
                    current.id = Some(read_ident(&mut chars, source, "id")?);
                }
                '.' => {
                    chars.next();
                    current.classes.push(read_ident(&mut chars, source, "class")?);
                }
                '[' => {
                    chars.next();
                    current.attributes.push(read_attribute(&mut chars, source)?);
                }
                '*' => {
                    chars.next();
                    set_tag(&mut current, "*".to_string(), source)?;
                }
                c if is_ident_char(c) => {
                    let tag = read_ident(&mut chars, source, "tag")?.to_ascii_lowercase();
                    set_tag(&mut current, tag, source)?;
                }
                other => {
                    return Err(HovertipError::selector(
                        source,
                        format!("unsupported character '{other}'"),
                    ));
                }
            }
        }

        if !current.is_empty() {
            compounds.push(current);
        }
        if compounds.is_empty() {
            return Err(HovertipError::selector(source, "empty selector"));
        }
        Ok(Self { compounds })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((last, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(doc, node) {
            return false;
        }

        // Greedy ancestor walk is exact for descendant-only chains.
        let mut remaining = ancestors.iter().rev().peekable();
        let mut cursor = doc.parent(node);
        while let Some(compound) = remaining.peek() {
            let Some(candidate) = cursor else {
                return false;
            };
            if compound.matches(doc, candidate) {
                remaining.next();
            }
            cursor = doc.parent(candidate);
        }
        true
    }
}

fn set_tag(current: &mut Compound, tag: String, source: &str) -> Result<()> {
    if !current.is_empty() {
        return Err(HovertipError::selector(source, "type selector must come first"));
    }
    current.tag = Some(tag);
    Ok(())
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &mut Peekable<Chars<'_>>, source: &str, what: &str) -> Result<String> {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    if ident.is_empty() {
        return Err(HovertipError::selector(source, format!("expected {what} name")));
    }
    Ok(ident)
}

fn read_attribute(chars: &mut Peekable<Chars<'_>>, source: &str) -> Result<AttributeMatch> {
    let name = read_ident(chars, source, "attribute")?.to_ascii_lowercase();
    match chars.next() {
        Some(']') => Ok(AttributeMatch { name, value: None }),
        Some('=') => {
            let value = match chars.peek() {
                Some(&q) if q == '"' || q == '\'' => {
                    chars.next();
                    let mut value = String::new();
                    loop {
                        match chars.next() {
                            Some(c) if c == q => break,
                            Some(c) => value.push(c),
                            None => {
                                return Err(HovertipError::selector(source, "unterminated string"));
                            }
                        }
                    }
                    value
                }
                _ => read_ident(chars, source, "attribute value")?,
            };
            match chars.next() {
                Some(']') => Ok(AttributeMatch {
                    name,
                    value: Some(value),
                }),
                _ => Err(HovertipError::selector(source, "unterminated attribute selector")),
            }
        }
        _ => Err(HovertipError::selector(source, "unterminated attribute selector")),
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
