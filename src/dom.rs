//! In-memory document model
//!
//! A small arena-backed DOM: elements with attributes, text nodes, a lenient
//! markup parser, compound selectors and an event listener registry. The
//! tooltip widget only ever touches the page through this module.

mod document;
pub mod events;
mod markup;
mod node;
mod selector;

pub use document::Document;
pub use markup::{MarkupNode, decode_entities, escape_attribute, escape_text, parse_fragment};
pub use node::{NodeId, NodeKind, Rect};
pub use selector::Selector;
