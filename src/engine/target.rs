//! Finding the element that receives scroll deltas.

use crate::geometry::Point;
use crate::page::{NodeId, Page};

/// Where a frame's delta is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// The viewport.
    Page,
    /// A scroll container inside the document.
    Element(NodeId),
}

/// Whether an element can be scrolled by the user on at least one axis.
///
/// Requires `overflow: auto|scroll` on an axis whose content is larger than
/// the visible box on that same axis.
#[must_use]
pub fn is_scroll_container<P: Page + ?Sized>(page: &P, node: NodeId) -> bool {
    let overflow = page.overflow(node);
    let metrics = page.scroll_metrics(node);
    (overflow.y.is_user_scrollable() && metrics.overflows_y())
        || (overflow.x.is_user_scrollable() && metrics.overflows_x())
}

/// Nearest scroll container at or above the element under `point`.
///
/// `<body>` and `<html>` end the walk; when nothing qualifies the viewport is
/// the target.
#[must_use]
pub fn resolve_scroll_target<P: Page + ?Sized>(page: &P, point: Point) -> ScrollTarget {
    let mut current = page.element_at(point);
    while let Some(node) = current {
        if page.is_document_root(node) {
            break;
        }
        if is_scroll_container(page, node) {
            return ScrollTarget::Element(node);
        }
        current = page.parent(node);
    }
    ScrollTarget::Page
}
