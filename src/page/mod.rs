//! The page the engine scrolls.
//!
//! Everything the engine needs from a document lives behind [`Page`]: hit
//! testing, ancestor traversal, a few computed style reads, the two scroll
//! primitives, and the host services (listeners, animation frames, timers, the
//! on-screen indicator). [`PageTree`] is an in-memory implementation.

mod tree;

pub use tree::{ElementSpec, PageTree, ScrollRecord};

use crate::geometry::{Point, ScrollDelta};
use anyhow::Result;
use std::time::Duration;

/// Handle to an element in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Computed value of `overflow-x` / `overflow-y`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// `visible`
    #[default]
    Visible,
    /// `hidden`
    Hidden,
    /// `clip`
    Clip,
    /// `auto`
    Auto,
    /// `scroll`
    Scroll,
}

impl Overflow {
    /// Whether the user may scroll an element with this overflow.
    #[must_use]
    pub const fn is_user_scrollable(self) -> bool {
        matches!(self, Self::Auto | Self::Scroll)
    }
}

/// Computed overflow on both axes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverflowStyle {
    /// `overflow-x`
    pub x: Overflow,
    /// `overflow-y`
    pub y: Overflow,
}

impl OverflowStyle {
    /// The same overflow on both axes.
    #[must_use]
    pub const fn both(overflow: Overflow) -> Self {
        Self {
            x: overflow,
            y: overflow,
        }
    }
}

/// Content and visible sizes of an element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollMetrics {
    /// `scrollWidth`
    pub scroll_width: u32,
    /// `clientWidth`
    pub client_width: u32,
    /// `scrollHeight`
    pub scroll_height: u32,
    /// `clientHeight`
    pub client_height: u32,
}

impl ScrollMetrics {
    /// Whether content is wider than the visible box.
    #[must_use]
    pub const fn overflows_x(self) -> bool {
        self.scroll_width > self.client_width
    }

    /// Whether content is taller than the visible box.
    #[must_use]
    pub const fn overflows_y(self) -> bool {
        self.scroll_height > self.client_height
    }
}

/// Mouse buttons, numbered as `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Button 0, usually left
    Primary,
    /// Button 1, usually the wheel
    Middle,
    /// Button 2, usually right
    Secondary,
    /// Any other button
    Other(u8),
}

impl MouseButton {
    /// Decode a `MouseEvent.button` index.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `Escape`
    Escape,
    /// Anything else
    Other,
}

/// Event types the engine listens for while a gesture runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    /// `mousemove`
    PointerMove,
    /// `mouseup`
    PointerUp,
    /// `keydown`
    KeyDown,
    /// `contextmenu`
    ContextMenu,
}

/// Registration flags. A listener is only removed by a call with identical flags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerOptions {
    /// Run during the capture phase
    pub capture: bool,
    /// Promise never to cancel the event
    pub passive: bool,
}

/// Pending animation frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// An indicator element placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndicatorId(pub u64);

/// A document plus the host services around it.
pub trait Page {
    /// Topmost element at a viewport point, if any.
    fn element_at(&self, point: Point) -> Option<NodeId>;

    /// Parent element, `None` at the top of the tree.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether the node is `<body>` or `<html>`.
    fn is_document_root(&self, node: NodeId) -> bool;

    /// Lowercase tag name.
    fn tag_name(&self, node: NodeId) -> &str;

    /// Resolved link destination, for elements that have one.
    fn href(&self, node: NodeId) -> Option<&str>;

    /// Whether the element is editable, including editability inherited from ancestors.
    fn is_content_editable(&self, node: NodeId) -> bool;

    /// Computed overflow.
    fn overflow(&self, node: NodeId) -> OverflowStyle;

    /// Content and client sizes.
    fn scroll_metrics(&self, node: NodeId) -> ScrollMetrics;

    /// Scroll the viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport cannot be scrolled.
    fn scroll_page_by(&mut self, delta: ScrollDelta) -> Result<()>;

    /// Add to an element's `scrollLeft` / `scrollTop`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element can no longer be scrolled.
    fn scroll_element_by(&mut self, node: NodeId, delta: ScrollDelta) -> Result<()>;

    /// Place an indicator with its top-left corner at `top_left`.
    fn show_indicator(&mut self, top_left: Point, size: f64) -> IndicatorId;

    /// Remove an indicator. Unknown ids are ignored.
    fn remove_indicator(&mut self, id: IndicatorId);

    /// Register a document-level listener.
    fn add_listener(&mut self, kind: ListenerKind, options: ListenerOptions);

    /// Unregister a listener previously added with the same flags.
    fn remove_listener(&mut self, kind: ListenerKind, options: ListenerOptions);

    /// Ask for a callback on the next animation frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending frame request.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Ask for a callback after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a pending timer.
    fn clear_timeout(&mut self, handle: TimerHandle);
}
