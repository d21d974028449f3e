//! Tooltip positioning
//!
//! The widget only decides *when* to position; *how* is up to a [`StyleTip`]
//! implementation supplied by the host.

use crate::dom::{Document, NodeId, Rect};

pub trait StyleTip {
    /// Place `tip` against `element` on the `placement` side, in `container`
    /// coordinates
    fn style_tip(
        &self,
        doc: &mut Document,
        element: NodeId,
        tip: NodeId,
        placement: &str,
        container: NodeId,
    );
}

/// Centers the tooltip on the requested side using host-supplied layout boxes.
///
/// Missing boxes count as empty rectangles at the origin. Unknown placements
/// are treated as `top`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectStyler {
    /// Space between the reference element and the tooltip
    pub gap: f64,
}

impl RectStyler {
    pub fn new(gap: f64) -> Self {
        Self { gap }
    }

    pub fn offsets(&self, reference: Rect, tip: Rect, container: Rect, placement: &str) -> (f64, f64) {
        let x = reference.x - container.x;
        let y = reference.y - container.y;
        let centered_left = x + (reference.width - tip.width) / 2.0;
        let centered_top = y + (reference.height - tip.height) / 2.0;

        match placement {
            "bottom" => (y + reference.height + self.gap, centered_left),
            "left" => (centered_top, x - tip.width - self.gap),
            "right" => (centered_top, x + reference.width + self.gap),
            _ => (y - tip.height - self.gap, centered_left),
        }
    }
}

impl StyleTip for RectStyler {
    fn style_tip(
        &self,
        doc: &mut Document,
        element: NodeId,
        tip: NodeId,
        placement: &str,
        container: NodeId,
    ) {
        let reference = doc.rect(element).unwrap_or_default();
        let tip_rect = doc.rect(tip).unwrap_or_default();
        let container_rect = doc.rect(container).unwrap_or_default();

        let (top, left) = self.offsets(reference, tip_rect, container_rect, placement);
        doc.set_style(tip, "top", &format!("{top}px"));
        doc.set_style(tip, "left", &format!("{left}px"));
    }
}
