//! Deciding whether a middle-button press starts autoscroll.
//!
//! Presses on links keep their open-in-new-tab behavior, and presses inside
//! editable content or form controls keep paste and selection behavior.

use crate::page::{MouseButton, NodeId, Page};

/// Controls whose own middle-click behavior must be preserved.
const FORM_CONTROLS: [&str; 3] = ["input", "textarea", "select"];

/// Why a press was left to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassReason {
    /// Not the middle button.
    NotMiddleButton,
    /// On or inside a link with a destination.
    Hyperlink,
    /// On or inside editable content.
    ContentEditable,
    /// Directly on an input, textarea or select.
    FormControl,
}

/// Outcome of inspecting a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Let the page handle the press.
    Ignore(PassReason),
    /// Take the press for autoscroll.
    Engage,
}

/// Inspect a button press on `target`.
///
/// Walks from the target up to (not including) `<body>`, checking each element
/// for a link before checking it for editability. The target's own tag and
/// editability are checked after the walk.
#[must_use]
pub fn inspect<P: Page + ?Sized>(page: &P, button: MouseButton, target: Option<NodeId>) -> Verdict {
    if button != MouseButton::Middle {
        return Verdict::Ignore(PassReason::NotMiddleButton);
    }
    let Some(target) = target else {
        return Verdict::Engage;
    };

    let mut current = Some(target);
    while let Some(node) = current {
        if page.is_document_root(node) {
            break;
        }
        if is_link(page, node) {
            return Verdict::Ignore(PassReason::Hyperlink);
        }
        if page.is_content_editable(node) {
            return Verdict::Ignore(PassReason::ContentEditable);
        }
        current = page.parent(node);
    }

    let tag = page.tag_name(target);
    if FORM_CONTROLS
        .iter()
        .any(|control| tag.eq_ignore_ascii_case(control))
    {
        return Verdict::Ignore(PassReason::FormControl);
    }
    if page.is_content_editable(target) {
        return Verdict::Ignore(PassReason::ContentEditable);
    }

    Verdict::Engage
}

fn is_link<P: Page + ?Sized>(page: &P, node: NodeId) -> bool {
    page.tag_name(node).eq_ignore_ascii_case("a") && page.href(node).is_some()
}
