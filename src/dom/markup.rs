//! Markup fragment parsing and escaping
//!
//! The parser is deliberately forgiving, the way `innerHTML` assignment is:
//! it never fails. Stray closing tags are dropped, unclosed elements are
//! closed at end of input and a `<` that does not start a tag is kept as text.

/// Parsed markup tree, detached from any document
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
    Text(String),
}

impl MarkupNode {
    pub fn is_element(&self) -> bool {
        matches!(self, MarkupNode::Element { .. })
    }
}

pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

struct OpenElement {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<MarkupNode>,
}

impl OpenElement {
    fn into_node(self) -> MarkupNode {
        MarkupNode::Element {
            tag: self.tag,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

struct OpenTag {
    name: String,
    attributes: Vec<(String, String)>,
    self_closing: bool,
    /// Bytes consumed, including the closing `>`
    len: usize,
}

/// Parse a markup fragment into a forest of nodes
pub fn parse_fragment(input: &str) -> Vec<MarkupNode> {
    let mut roots = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }

        if let Some(after) = rest.strip_prefix("</")
            && let Some(end) = after.find('>')
        {
            let name = after[..end].trim().to_ascii_lowercase();
            rest = &after[end + 1..];
            close_element(&mut stack, &mut roots, &name);
            continue;
        }

        if rest.starts_with('<')
            && let Some(tag) = parse_open_tag(rest)
        {
            rest = &rest[tag.len..];
            if tag.self_closing || is_void(&tag.name) {
                let node = MarkupNode::Element {
                    tag: tag.name,
                    attributes: tag.attributes,
                    children: Vec::new(),
                };
                push_node(&mut stack, &mut roots, node);
            } else {
                stack.push(OpenElement {
                    tag: tag.name,
                    attributes: tag.attributes,
                    children: Vec::new(),
                });
            }
            continue;
        }

        // Plain text up to the next tag. A '<' that failed to parse as a tag
        // is consumed as text.
        let skip = usize::from(rest.starts_with('<'));
        let end = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
        push_text(&mut stack, &mut roots, decode_entities(&rest[..end]));
        rest = &rest[end..];
    }

    while let Some(open) = stack.pop() {
        let node = open.into_node();
        push_node(&mut stack, &mut roots, node);
    }

    roots
}

fn push_node(stack: &mut [OpenElement], roots: &mut Vec<MarkupNode>, node: MarkupNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn push_text(stack: &mut [OpenElement], roots: &mut Vec<MarkupNode>, text: String) {
    if text.is_empty() {
        return;
    }
    let siblings = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => roots,
    };
    if let Some(MarkupNode::Text(prev)) = siblings.last_mut() {
        prev.push_str(&text);
    } else {
        siblings.push(MarkupNode::Text(text));
    }
}

fn close_element(stack: &mut Vec<OpenElement>, roots: &mut Vec<MarkupNode>, name: &str) {
    let Some(depth) = stack.iter().rposition(|open| open.tag == name) else {
        return;
    };
    while stack.len() > depth {
        if let Some(open) = stack.pop() {
            let node = open.into_node();
            push_node(stack, roots, node);
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'
}

/// Parse `<name attr="v" ...>` at the start of `input`
fn parse_open_tag(input: &str) -> Option<OpenTag> {
    let body = input.strip_prefix('<')?;
    if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let name_len = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();
    let mut pos = name_len;
    let mut attributes: Vec<(String, String)> = Vec::new();

    loop {
        let rest = &body[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();

        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with("/>") {
            return Some(OpenTag {
                name,
                attributes,
                self_closing: true,
                len: 1 + pos + 2,
            });
        }
        if trimmed.starts_with('>') {
            return Some(OpenTag {
                name,
                attributes,
                self_closing: false,
                len: 1 + pos + 1,
            });
        }

        let attr_len = trimmed
            .find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/')
            .unwrap_or(trimmed.len());
        if attr_len == 0 {
            // A lone '/' or '=' inside a tag is skipped.
            pos += 1;
            continue;
        }
        let attr_name = trimmed[..attr_len].to_ascii_lowercase();
        pos += attr_len;

        let rest = &body[pos..];
        let after_ws = rest.trim_start();
        let value = if let Some(after_eq) = after_ws.strip_prefix('=') {
            let value_src = after_eq.trim_start();
            let consumed_before_value = rest.len() - value_src.len();
            let quote = value_src.chars().next().filter(|c| *c == '"' || *c == '\'');
            match quote {
                Some(q) => {
                    let close = value_src[1..].find(q)?;
                    pos += consumed_before_value + close + 2;
                    decode_entities(&value_src[1..1 + close])
                }
                None => {
                    let end = value_src
                        .find(|c: char| c.is_whitespace() || c == '>')
                        .unwrap_or(value_src.len());
                    pos += consumed_before_value + end;
                    decode_entities(&value_src[..end])
                }
            }
        } else {
            String::new()
        };

        if !attributes.iter().any(|(n, _)| *n == attr_name) {
            attributes.push((attr_name, value));
        }
    }
}

/// Decode the basic named entities and numeric character references
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match candidate.find(';').filter(|end| *end <= 10) {
            Some(end) => match decode_entity(&candidate[1..end]) {
                Some(c) => {
                    out.push(c);
                    rest = &candidate[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &candidate[1..];
                }
            },
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod markup_tests;
